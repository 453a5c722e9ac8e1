//! Bus stop reference data.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;

/// One row of the bus-stop CSV.
///
/// The source data does not always carry coordinates; missing values are
/// synthesized by the stop finder in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusStop {
    /// Stop name
    #[serde(rename = "Bus Stop")]
    pub name: String,

    /// Route serving the stop
    #[serde(rename = "Bus Route")]
    pub route: String,

    #[serde(rename = "Latitude", default)]
    pub latitude: Option<f64>,

    #[serde(rename = "Longitude", default)]
    pub longitude: Option<f64>,
}

impl BusStop {
    /// Coordinates, if the row carries both.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
            _ => None,
        }
    }
}
