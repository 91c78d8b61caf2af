//! Error types for the workout_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for workout_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Export was requested but the session log holds no entries
    #[error("Nothing to export: the workout log is empty")]
    EmptyLog,

    /// Caller-supplied input was rejected (missing names, field not valid for kind)
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
