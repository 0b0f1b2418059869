//! Core error types for dayplan-core.
//!
//! The planning engine itself cannot fail once its settings are validated;
//! every failure here originates at an input boundary (request parsing,
//! settings validation) or in configuration storage.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dayplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Planning request errors
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure of a planning request at the boundary.
///
/// Both categories are user-correctable and are reported with status 400.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Request body is not well-formed JSON or does not match the record shapes.
#[derive(Error, Debug)]
#[error("Malformed request body: {source}")]
pub struct ParseError {
    #[from]
    source: serde_json::Error,
}

impl ParseError {
    /// Line of the body where parsing stopped.
    pub fn line(&self) -> usize {
        self.source.line()
    }
}

/// Validation errors for day settings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required settings field absent or empty
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    /// Not a calendar date
    #[error("Invalid date for '{field}': {value}")]
    InvalidDate { field: &'static str, value: String },

    /// Not a time of day
    #[error("Invalid time of day for '{field}': {value}")]
    InvalidTime { field: &'static str, value: String },

    /// Day end not after day start
    #[error("Invalid time range: dayEnd ({end}) must be later than dayStart ({start})")]
    InvalidTimeRange {
        start: chrono::NaiveTime,
        end: chrono::NaiveTime,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not name a configuration value
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Data directory could not be prepared
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
