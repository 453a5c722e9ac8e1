// src/services/mod.rs

//! Outward-facing services: geocoding, routing, stop lookup and navigation.

mod geocoder;
mod navigator;
mod router;
mod stops;

pub use geocoder::Geocoder;
pub use navigator::{NavigationSummary, Navigator};
pub use router::{RoutePlan, RouteSource, RouteStep, Router};
pub use stops::{NearestStop, StopFinder};
