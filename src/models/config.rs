//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::Landmark;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client behavior settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Geocoding service settings
    #[serde(default)]
    pub geocoder: GeocoderConfig,

    /// Walking-route service settings
    #[serde(default)]
    pub router: RouterConfig,

    /// Campus landmark definitions
    #[serde(default = "defaults::default_landmarks")]
    pub landmarks: Vec<Landmark>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::config("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::config("http.timeout_secs must be > 0"));
        }
        if self.router.timeout_secs == 0 {
            return Err(AppError::config("router.timeout_secs must be > 0"));
        }
        if self.router.walking_speed_mps <= 0.0 {
            return Err(AppError::config("router.walking_speed_mps must be > 0"));
        }
        if self.geocoder.base_url.trim().is_empty() {
            return Err(AppError::config("geocoder.base_url is empty"));
        }
        if self.router.base_url.trim().is_empty() {
            return Err(AppError::config("router.base_url is empty"));
        }
        url::Url::parse(&self.geocoder.base_url)?;
        url::Url::parse(&self.router.base_url)?;
        if self.landmarks.is_empty() {
            return Err(AppError::config("No landmarks defined"));
        }
        Ok(())
    }

    /// Find a landmark by exact name.
    pub fn landmark(&self, name: &str) -> Option<&Landmark> {
        self.landmarks.iter().find(|l| l.name == name)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            geocoder: GeocoderConfig::default(),
            router: RouterConfig::default(),
            landmarks: defaults::default_landmarks(),
        }
    }
}

/// HTTP client behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Geocoding service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    /// Base URL of the Nominatim-compatible geocoding service
    #[serde(default = "defaults::geocoder_url")]
    pub base_url: String,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::geocoder_url(),
        }
    }
}

/// Walking-route service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Base URL of the OSRM-compatible routing service
    #[serde(default = "defaults::router_url")]
    pub base_url: String,

    /// Timeout for routing requests in seconds
    #[serde(default = "defaults::router_timeout")]
    pub timeout_secs: u64,

    /// Assumed walking speed for the straight-line fallback, in m/s
    #[serde(default = "defaults::walking_speed")]
    pub walking_speed_mps: f64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::router_url(),
            timeout_secs: defaults::router_timeout(),
            walking_speed_mps: defaults::walking_speed(),
        }
    }
}

mod defaults {
    use crate::models::Landmark;

    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; campus-sync/1.0)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Service defaults
    pub fn geocoder_url() -> String {
        "https://nominatim.openstreetmap.org".into()
    }
    pub fn router_url() -> String {
        "http://router.project-osrm.org".into()
    }
    pub fn router_timeout() -> u64 {
        10
    }
    pub fn walking_speed() -> f64 {
        1.4
    }

    // Landmark defaults
    pub fn default_landmarks() -> Vec<Landmark> {
        vec![
            Landmark::new("REC Ground", 13.008583, 80.004445),
            Landmark::new("REC Basketball Court", 13.009092, 80.004046),
            Landmark::new("Xerox", 13.008434, 80.003711),
            Landmark::new("B Block", 13.009143, 80.003212),
            Landmark::new("Aircraft", 13.009475, 80.003025),
            Landmark::new("REC Main Gate", 13.010573, 80.002384),
            Landmark::new("Architecture Block", 13.008279, 80.001577),
            Landmark::new("Heka", 13.007728, 80.002058),
            Landmark::new("D Block", 13.007839, 80.002421),
            Landmark::new("Indoor Auditorium", 13.008360, 80.005498),
            Landmark::new("Cafe Coffee Day", 13.008654, 80.005464),
            Landmark::new("Library Block", 13.008949, 80.005462),
            Landmark::new("Transport Office", 13.009275, 80.005503),
            Landmark::new("Tech Lounge", 13.009452, 80.005065),
            Landmark::new("A Block", 13.009449, 80.004216),
            Landmark::new("Ladies Hostel", 13.007242, 80.005592),
            Landmark::new("Boys Mess", 13.007440, 80.004371),
            Landmark::new("Hut Cafe", 13.008207, 80.003396),
            Landmark::new("REC Cafe", 13.008335, 80.002526),
            Landmark::new("Mechanical Block", 13.007880, 80.002729),
            Landmark::new("Solid Mechanics Lab", 13.008224, 80.002942),
            Landmark::new("Fluid Mechanics Lab", 13.008253, 80.003116),
            Landmark::new("Students Parking", 13.012133, 80.000642),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.http.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_unparsable_base_url() {
        let mut config = Config::default();
        config.router.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_walking_speed() {
        let mut config = Config::default();
        config.router.walking_speed_mps = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn landmark_lookup_by_name() {
        let config = Config::default();
        let lib = config.landmark("Library Block").unwrap();
        assert!((lib.lat - 13.008949).abs() < 1e-9);
        assert!(config.landmark("Unknown Hall").is_none());
    }
}
