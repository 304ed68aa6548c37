// src/error.rs

//! Unified error handling for the digest application.

use std::fmt;

use thiserror::Error;

/// Result type alias for digest operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Exit status for a successful run.
pub const EXIT_OK: u8 = 0;
/// Exit status for a missing credential or unusable configuration.
pub const EXIT_CONFIG: u8 = 2;
/// Exit status for fetch, parse, or I/O failures.
pub const EXIT_FAILURE: u8 = 3;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client could not be built or used
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error (missing credential, unusable endpoint)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration value out of range
    #[error("Validation error: {0}")]
    Validation(String),

    /// Page could not be fetched after all attempts
    #[error("Fetch failed for {context}: {message}")]
    Fetch { context: String, message: String },

    /// Input file for the summary is absent
    #[error("Missing input file {path}")]
    MissingInput { path: String },

    /// Input file for the summary has the wrong shape
    #[error("Failed to load {path}: {message}")]
    MalformedInput { path: String, message: String },
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

    /// Create a terminal fetch error with context.
    pub fn fetch(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a malformed input error.
    pub fn malformed(path: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::MalformedInput {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::Validation(_) | Self::Toml(_) | Self::Url(_) => EXIT_CONFIG,
            _ => EXIT_FAILURE,
        }
    }
}
