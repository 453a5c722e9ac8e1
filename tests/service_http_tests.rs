//! HTTP integration tests for the geocoder and router against mock servers.

use campus_sync::geo::Coordinates;
use campus_sync::models::{Config, HttpConfig};
use campus_sync::services::{Geocoder, Navigator, RouteSource, Router};
use campus_sync::utils::http;
use serde_json::json;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> reqwest::Client {
    http::create_client(&HttpConfig::default()).unwrap()
}

#[tokio::test]
async fn test_geocoder_resolves_first_hit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Vanagaram"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"lat": "13.0478", "lon": "80.1430", "display_name": "Vanagaram, Chennai"},
            {"lat": "0.0", "lon": "0.0", "display_name": "decoy"}
        ])))
        .mount(&server)
        .await;

    let geocoder = Geocoder::new(client(), server.uri());
    let hit = geocoder.resolve("Vanagaram").await.unwrap().unwrap();

    assert!((hit.lat - 13.0478).abs() < 1e-9);
    assert!((hit.lng - 80.1430).abs() < 1e-9);
}

#[tokio::test]
async fn test_geocoder_empty_result_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let geocoder = Geocoder::new(client(), server.uri());
    assert!(geocoder.resolve("nowhere at all").await.unwrap().is_none());
}

#[tokio::test]
async fn test_geocoder_server_error_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let geocoder = Geocoder::new(client(), server.uri());
    assert!(geocoder.resolve("Vanagaram").await.is_err());
}

#[tokio::test]
async fn test_router_parses_road_route_and_skips_arrival_step() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/foot/.+;.+$"))
        .and(query_param("overview", "full"))
        .and(query_param("geometries", "geojson"))
        .and(query_param("steps", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "Ok",
            "routes": [{
                "distance": 420.5,
                "duration": 300.0,
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[80.0418, 13.0082], [80.0420, 13.0090], [80.0422, 13.0102]]
                },
                "legs": [{
                    "steps": [
                        {"distance": 200.0, "maneuver": {"type": "depart", "modifier": ""}},
                        {"distance": 220.5, "maneuver": {"type": "turn", "modifier": "left"}},
                        {"distance": 0.0, "maneuver": {"type": "arrive", "modifier": ""}}
                    ]
                }]
            }]
        })))
        .mount(&server)
        .await;

    let router = Router::new(client(), server.uri(), 10, 1.4);
    let from = Coordinates::new(13.0082, 80.0418);
    let to = Coordinates::new(13.0102, 80.0422);
    let plan = router.walking_route(from, to).await;

    assert_eq!(plan.source, RouteSource::Road);
    assert!((plan.distance_m - 420.5).abs() < 1e-9);
    assert!((plan.duration_s - 300.0).abs() < 1e-9);
    assert_eq!(plan.walking_minutes(), 5);

    // GeoJSON pairs come back lng-first and are flipped into lat/lng points.
    assert_eq!(plan.points.len(), 3);
    assert!((plan.points[0].lat - 13.0082).abs() < 1e-9);
    assert!((plan.points[0].lng - 80.0418).abs() < 1e-9);

    let instructions: Vec<_> = plan.steps.iter().map(|s| s.instruction.as_str()).collect();
    assert_eq!(instructions, vec!["depart", "turn left"]);
}

#[tokio::test]
async fn test_router_server_error_falls_back_to_straight_line() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/foot/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let router = Router::new(client(), server.uri(), 10, 1.4);
    let from = Coordinates::new(13.0082, 80.0418);
    let to = Coordinates::new(13.0102, 80.0422);
    let plan = router.walking_route(from, to).await;

    assert_eq!(plan.source, RouteSource::StraightLine);
    assert_eq!(plan.points, vec![from, to]);
    assert!(plan.steps.is_empty());
    // Duration is the straight-line distance at the configured walking speed.
    assert!((plan.duration_s - plan.distance_m / 1.4).abs() < 1e-9);
}

#[tokio::test]
async fn test_router_empty_route_list_falls_back() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/foot/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": "NoRoute", "routes": []})),
        )
        .mount(&server)
        .await;

    let router = Router::new(client(), server.uri(), 10, 1.4);
    let plan = router
        .walking_route(
            Coordinates::new(13.0082, 80.0418),
            Coordinates::new(13.0102, 80.0422),
        )
        .await;

    assert_eq!(plan.source, RouteSource::StraightLine);
}

#[tokio::test]
async fn test_navigator_summary_when_routing_is_down() {
    // No mock mounted: every routing request gets a 404 and degrades.
    let server = MockServer::start().await;
    let config = Config::default();
    let router = Router::new(client(), server.uri(), 2, config.router.walking_speed_mps);
    let navigator = Navigator::new(&config, router);

    let summary = navigator
        .navigate_from_point(Coordinates::new(13.008207, 80.003396), "Library Block")
        .await
        .unwrap();

    assert_eq!(summary.from, "Your Location");
    assert_eq!(summary.to, "Library Block");
    assert_eq!(summary.plan.source, RouteSource::StraightLine);
    assert!(summary.plan.distance_m > 100.0);
    assert!(summary.proximity_note().is_none());
    assert!(summary.straight_line_instruction().contains(summary.direction));

    // Adjacent labs are a few meters apart.
    let close = navigator
        .navigate("Solid Mechanics Lab", "Fluid Mechanics Lab")
        .await
        .unwrap();
    assert_eq!(close.proximity_note(), Some("You're very close to your destination!"));

    assert!(navigator.navigate("Hut Cafe", "Nowhere Hall").await.is_err());
}

#[tokio::test]
async fn test_router_garbage_body_falls_back() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/foot/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let router = Router::new(client(), server.uri(), 10, 1.4);
    let plan = router
        .walking_route(
            Coordinates::new(13.0082, 80.0418),
            Coordinates::new(13.0102, 80.0422),
        )
        .await;

    assert_eq!(plan.source, RouteSource::StraightLine);
}
