//! Free-text location geocoding.
//!
//! Thin client for a Nominatim-compatible search endpoint. One query, first
//! hit wins; an empty result set means the location could not be resolved.

use reqwest::Client;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::geo::Coordinates;

/// One entry of a Nominatim search response. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
struct GeocodeHit {
    lat: String,
    lon: String,
}

/// Client for resolving free-text locations to coordinates.
pub struct Geocoder {
    client: Client,
    base_url: String,
}

impl Geocoder {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Resolve a location string to coordinates.
    ///
    /// Returns `Ok(None)` when the service has no match; transport and
    /// decoding failures are errors.
    pub async fn resolve(&self, location: &str) -> Result<Option<Coordinates>> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("q", location), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::geocode(
                location,
                format!("service returned HTTP {}", response.status()),
            ));
        }

        let hits: Vec<GeocodeHit> = response.json().await?;
        let Some(hit) = hits.into_iter().next() else {
            log::warn!("No geocoding result for '{location}'");
            return Ok(None);
        };

        let lat: f64 = hit
            .lat
            .parse()
            .map_err(|e| AppError::geocode(location, format!("bad latitude '{}': {e}", hit.lat)))?;
        let lng: f64 = hit.lon.parse().map_err(|e| {
            AppError::geocode(location, format!("bad longitude '{}': {e}", hit.lon))
        })?;

        Ok(Some(Coordinates::new(lat, lng)))
    }
}
