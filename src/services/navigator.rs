//! Campus navigation between named landmarks.

use crate::error::{AppError, Result};
use crate::geo::{self, Coordinates};
use crate::models::Config;
use crate::services::{RoutePlan, Router};

/// A computed route between two campus points, with heading information.
#[derive(Debug, Clone)]
pub struct NavigationSummary {
    pub from: String,
    pub to: String,
    pub plan: RoutePlan,
    /// Forward azimuth from start to destination, degrees [0, 360).
    pub bearing_deg: f64,
    /// Nearest 8-point compass label for the bearing.
    pub direction: &'static str,
}

impl NavigationSummary {
    /// Short proximity note for near destinations, if any.
    pub fn proximity_note(&self) -> Option<&'static str> {
        if self.plan.distance_m < 50.0 {
            Some("You're very close to your destination!")
        } else if self.plan.distance_m < 100.0 {
            Some("You're nearby! Just a short walk away.")
        } else {
            None
        }
    }

    /// Fallback instruction when the service provided no steps.
    pub fn straight_line_instruction(&self) -> String {
        format!(
            "Walk {} ({:.0}°) for approximately {:.0} meters",
            self.direction, self.bearing_deg, self.plan.distance_m
        )
    }
}

/// Resolves landmark names and produces walking routes between them.
pub struct Navigator<'a> {
    config: &'a Config,
    router: Router,
}

impl<'a> Navigator<'a> {
    pub fn new(config: &'a Config, router: Router) -> Self {
        Self { config, router }
    }

    /// Look up a landmark's coordinates by name.
    pub fn locate(&self, name: &str) -> Result<Coordinates> {
        self.config
            .landmark(name)
            .map(|l| l.coordinates())
            .ok_or_else(|| AppError::validation(format!("Unknown campus landmark '{name}'")))
    }

    /// Route between two named landmarks.
    pub async fn navigate(&self, from: &str, to: &str) -> Result<NavigationSummary> {
        let start = self.locate(from)?;
        let end = self.locate(to)?;
        Ok(self.summarize(from, to, start, end).await)
    }

    /// Route from arbitrary coordinates (e.g., a live position) to a landmark.
    pub async fn navigate_from_point(
        &self,
        start: Coordinates,
        to: &str,
    ) -> Result<NavigationSummary> {
        let end = self.locate(to)?;
        Ok(self.summarize("Your Location", to, start, end).await)
    }

    async fn summarize(
        &self,
        from: &str,
        to: &str,
        start: Coordinates,
        end: Coordinates,
    ) -> NavigationSummary {
        let plan = self.router.walking_route(start, end).await;

        // Heading is always the straight-line azimuth between the endpoints,
        // independent of the path the route takes.
        let bearing_deg = geo::bearing(start, end);

        NavigationSummary {
            from: from.to_string(),
            to: to.to_string(),
            plan,
            bearing_deg,
            direction: geo::compass_point(bearing_deg),
        }
    }
}
