//! Named campus landmarks.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;

/// A fixed, named campus coordinate. Static reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Landmark {
    /// Landmark name (e.g., "Library Block")
    pub name: String,

    /// Latitude in decimal degrees
    pub lat: f64,

    /// Longitude in decimal degrees
    pub lng: f64,
}

impl Landmark {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}
