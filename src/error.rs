//! Domain-specific error types for tech-trends

use thiserror::Error;

/// Main error type for the tech-trends library
#[derive(Error, Debug)]
pub enum TechTrendsError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Unknown domain: {message}")]
    UnknownDomain { message: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("Chart rendering error: {message}")]
    Chart { message: String },

    #[error("PDF rendering error: {message}")]
    Pdf { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for TechTrendsError {
    fn from(err: csv::Error) -> Self {
        TechTrendsError::Export {
            message: format!("CSV failure: {}", err),
        }
    }
}

impl From<serde_json::Error> for TechTrendsError {
    fn from(err: serde_json::Error) -> Self {
        TechTrendsError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for TechTrendsError {
    fn from(err: toml::de::Error) -> Self {
        TechTrendsError::Config {
            message: err.to_string(),
        }
    }
}

impl From<genpdf::error::Error> for TechTrendsError {
    fn from(err: genpdf::error::Error) -> Self {
        TechTrendsError::Pdf {
            message: err.to_string(),
        }
    }
}

impl From<chrono::ParseError> for TechTrendsError {
    fn from(err: chrono::ParseError) -> Self {
        TechTrendsError::Validation {
            message: format!("Date parsing error: {}", err),
        }
    }
}

/// Result type alias for tech-trends operations
pub type Result<T> = std::result::Result<T, TechTrendsError>;
