// src/models/mod.rs

//! Domain models for the campus-sync application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod landmark;
mod listing;
mod schedule;
mod stop;

// Re-export all public types
pub use config::{Config, GeocoderConfig, HttpConfig, RouterConfig};
pub use landmark::Landmark;
pub use listing::{Listing, ListingKind, NewListing};
pub use schedule::{Assignment, ScheduleData, ScheduleEvent};
pub use stop::BusStop;
