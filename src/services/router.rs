//! Walking-route computation.
//!
//! Asks an OSRM-compatible service for a foot route between two points. Any
//! failure (network error, non-200 status, empty route list) degrades to a
//! straight two-point line at an assumed walking speed; nothing is retried.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::geo::{self, Coordinates};

/// How a route plan was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteSource {
    /// Computed by the routing service along real paths.
    Road,
    /// Straight-line fallback estimate.
    StraightLine,
}

/// One turn-by-turn instruction.
#[derive(Debug, Clone)]
pub struct RouteStep {
    pub instruction: String,
    pub distance_m: f64,
}

/// A computed walking route.
#[derive(Debug, Clone)]
pub struct RoutePlan {
    /// Path as lat/lng points, start to destination.
    pub points: Vec<Coordinates>,
    pub distance_m: f64,
    pub duration_s: f64,
    pub steps: Vec<RouteStep>,
    pub source: RouteSource,
}

impl RoutePlan {
    /// Walking time rounded down to whole minutes.
    pub fn walking_minutes(&self) -> u64 {
        (self.duration_s / 60.0) as u64
    }
}

// --- OSRM response shapes (GeoJSON geometry, [lng, lat] pairs) ---

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
    distance: f64,
    duration: f64,
    #[serde(default)]
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    #[serde(default)]
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    #[serde(default)]
    steps: Vec<OsrmStep>,
}

#[derive(Debug, Deserialize)]
struct OsrmStep {
    #[serde(default)]
    maneuver: OsrmManeuver,
    #[serde(default)]
    distance: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OsrmManeuver {
    #[serde(rename = "type", default = "default_maneuver")]
    kind: String,
    #[serde(default)]
    modifier: String,
}

fn default_maneuver() -> String {
    "continue".to_string()
}

/// Client for the walking-route service.
pub struct Router {
    client: Client,
    base_url: String,
    timeout: Duration,
    walking_speed_mps: f64,
}

impl Router {
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        timeout_secs: u64,
        walking_speed_mps: f64,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
            walking_speed_mps,
        }
    }

    /// Compute a walking route, falling back to a straight-line estimate on
    /// any service failure.
    pub async fn walking_route(&self, from: Coordinates, to: Coordinates) -> RoutePlan {
        match self.fetch_route(from, to).await {
            Ok(Some(plan)) => plan,
            Ok(None) => {
                log::warn!("Routing service returned no routes; using straight-line estimate");
                self.fallback(from, to)
            }
            Err(e) => {
                log::warn!("Routing request failed ({e}); using straight-line estimate");
                self.fallback(from, to)
            }
        }
    }

    /// Straight two-point line at the configured walking speed.
    pub fn fallback(&self, from: Coordinates, to: Coordinates) -> RoutePlan {
        let distance_m = geo::distance_m(from, to);
        RoutePlan {
            points: vec![from, to],
            distance_m,
            duration_s: distance_m / self.walking_speed_mps,
            steps: Vec::new(),
            source: RouteSource::StraightLine,
        }
    }

    async fn fetch_route(
        &self,
        from: Coordinates,
        to: Coordinates,
    ) -> crate::error::Result<Option<RoutePlan>> {
        // OSRM takes lng,lat pairs in the path.
        let url = format!(
            "{}/route/v1/foot/{},{};{},{}",
            self.base_url, from.lng, from.lat, to.lng, to.lat
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("overview", "full"),
                ("geometries", "geojson"),
                ("steps", "true"),
            ])
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            log::warn!("Routing service returned HTTP {}", response.status());
            return Ok(None);
        }

        let body: OsrmResponse = response.json().await?;
        let Some(route) = body.routes.into_iter().next() else {
            return Ok(None);
        };

        let points = route
            .geometry
            .coordinates
            .iter()
            .map(|&[lng, lat]| Coordinates::new(lat, lng))
            .collect();

        let steps = route
            .legs
            .first()
            .map(|leg| {
                leg.steps
                    .iter()
                    .filter(|s| s.maneuver.kind != "arrive")
                    .map(|s| RouteStep {
                        instruction: format!("{} {}", s.maneuver.kind, s.maneuver.modifier)
                            .trim()
                            .to_string(),
                        distance_m: s.distance,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Some(RoutePlan {
            points,
            distance_m: route.distance,
            duration_s: route.duration,
            steps,
            source: RouteSource::Road,
        }))
    }
}
