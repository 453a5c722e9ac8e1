// src/error.rs

//! Unified error handling for the campus-sync application.

use std::fmt;

use thiserror::Error;

/// Result type alias for campus-sync operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// CSV reference data could not be read
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Free-text location could not be resolved
    #[error("Geocoding error for '{query}': {message}")]
    Geocode { query: String, message: String },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a geocoding error for a query.
    pub fn geocode(query: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Geocode {
            query: query.into(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helper_constructors_format_their_messages() {
        assert_eq!(
            AppError::config("router.base_url is empty").to_string(),
            "Configuration error: router.base_url is empty"
        );
        assert_eq!(
            AppError::validation("no such listing").to_string(),
            "Validation error: no such listing"
        );
        assert_eq!(
            AppError::geocode("Vanagaram", "service returned HTTP 503").to_string(),
            "Geocoding error for 'Vanagaram': service returned HTTP 503"
        );
    }

    #[test]
    fn from_conversions_wrap_source_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(AppError::from(io), AppError::Io(_)));

        let toml = toml::from_str::<toml::Value>("not [valid").unwrap_err();
        assert!(matches!(AppError::from(toml), AppError::Toml(_)));
    }
}
