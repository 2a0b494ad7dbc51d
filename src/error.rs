//! Error types for the artifact working set.

use thiserror::Error;

/// Core working-set errors. Only construction can fail; unknown ids are soft no-ops.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorksetError {
    #[error("Invalid capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),
}

/// Errors surfaced by configuration, scripts and the CLI.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Working set error: {0}")]
    Workset(#[from] WorksetError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Script error at line {line}: {message}")]
    ScriptError { line: usize, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
