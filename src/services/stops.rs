//! Nearest bus stop lookup.
//!
//! Loads the stop reference CSV once and linearly scans it for the minimum
//! great-circle distance. No distance threshold: if any stop exists, a
//! nearest one is always returned, however far away.

use std::path::Path;

use crate::error::Result;
use crate::geo::{self, Coordinates};
use crate::models::BusStop;

/// Base coordinates used when the CSV carries no Latitude/Longitude columns.
/// Stops are spread out in input order, matching the original reference data.
const SYNTH_BASE_LAT: f64 = 13.0087;
const SYNTH_BASE_LNG: f64 = 80.0034;
const SYNTH_STEP_DEG: f64 = 0.001;

/// A stop resolved against a user location.
#[derive(Debug, Clone)]
pub struct NearestStop {
    pub name: String,
    pub route: String,
    pub coordinates: Coordinates,
    pub distance_km: f64,
}

/// In-memory bus stop index.
pub struct StopFinder {
    stops: Vec<(BusStop, Coordinates)>,
}

impl StopFinder {
    /// Load stops from a CSV file with `Bus Stop`/`Bus Route` columns and
    /// optional coordinates.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;
        let mut records = Vec::new();
        for row in reader.deserialize::<BusStop>() {
            records.push(row?);
        }
        log::info!(
            "Loaded {} bus stops from {}",
            records.len(),
            path.as_ref().display()
        );
        Ok(Self::from_records(records))
    }

    /// Build a finder from already-parsed records, synthesizing coordinates
    /// for rows that lack them.
    pub fn from_records(records: Vec<BusStop>) -> Self {
        let stops = records
            .into_iter()
            .enumerate()
            .map(|(i, stop)| {
                let coords = stop.coordinates().unwrap_or_else(|| {
                    Coordinates::new(
                        SYNTH_BASE_LAT + i as f64 * SYNTH_STEP_DEG,
                        SYNTH_BASE_LNG + i as f64 * SYNTH_STEP_DEG,
                    )
                });
                (stop, coords)
            })
            .collect();
        Self { stops }
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Scan all stops for the minimum distance to the user location.
    ///
    /// Ties are broken by first-encountered (input) order. Returns `None`
    /// only when no stops are loaded.
    pub fn nearest(&self, user: Coordinates) -> Option<NearestStop> {
        let mut best: Option<(usize, f64)> = None;

        for (i, (_, coords)) in self.stops.iter().enumerate() {
            let distance = geo::distance_km(user, *coords);
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((i, distance));
            }
        }

        best.map(|(i, distance_km)| {
            let (stop, coords) = &self.stops[i];
            NearestStop {
                name: stop.name.clone(),
                route: stop.route.clone(),
                coordinates: *coords,
                distance_km,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn stop(name: &str, route: &str, lat: Option<f64>, lng: Option<f64>) -> BusStop {
        BusStop {
            name: name.to_string(),
            route: route.to_string(),
            latitude: lat,
            longitude: lng,
        }
    }

    #[test]
    fn nearest_of_three_fixture_stops() {
        let finder = StopFinder::from_records(vec![
            stop("Far", "10A", Some(13.10), Some(80.10)),
            stop("Near", "21B", Some(13.01), Some(80.01)),
            stop("Middle", "33C", Some(13.05), Some(80.05)),
        ]);

        let found = finder.nearest(Coordinates::new(13.0, 80.0)).unwrap();
        assert_eq!(found.name, "Near");
        assert_eq!(found.route, "21B");
        assert!(found.distance_km > 0.0);
    }

    #[test]
    fn ties_break_by_input_order() {
        // Two stops at the same coordinates: the first one wins.
        let finder = StopFinder::from_records(vec![
            stop("First", "1", Some(13.02), Some(80.02)),
            stop("Second", "2", Some(13.02), Some(80.02)),
        ]);

        let found = finder.nearest(Coordinates::new(13.0, 80.0)).unwrap();
        assert_eq!(found.name, "First");
    }

    #[test]
    fn empty_index_yields_none() {
        let finder = StopFinder::from_records(Vec::new());
        assert!(finder.nearest(Coordinates::new(13.0, 80.0)).is_none());
    }

    #[test]
    fn missing_coordinates_are_synthesized_in_order() {
        let finder = StopFinder::from_records(vec![
            stop("A", "1", None, None),
            stop("B", "2", None, None),
        ]);

        // User sits on the second synthesized point.
        let user = Coordinates::new(
            SYNTH_BASE_LAT + SYNTH_STEP_DEG,
            SYNTH_BASE_LNG + SYNTH_STEP_DEG,
        );
        let found = finder.nearest(user).unwrap();
        assert_eq!(found.name, "B");
        assert!(found.distance_km < 1e-6);
    }

    #[test]
    fn loads_csv_without_coordinate_columns() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Bus Stop,Bus Route").unwrap();
        writeln!(file, "Vanagaram,102").unwrap();
        writeln!(file, "Poonamallee,55K").unwrap();
        file.flush().unwrap();

        let finder = StopFinder::load(file.path()).unwrap();
        assert_eq!(finder.len(), 2);

        let found = finder
            .nearest(Coordinates::new(SYNTH_BASE_LAT, SYNTH_BASE_LNG))
            .unwrap();
        assert_eq!(found.name, "Vanagaram");
    }
}
