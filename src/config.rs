//! Configuration System
//!
//! Layered configuration for the working set and logging, built with the `config` crate:
//! built-in defaults, a global file, workspace files and `ARTISET__*` environment variables.

use crate::error::{ApiError, WorksetError};
use crate::logging::LoggingConfig;
use crate::workset::Workset;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use merge::DEFAULT_CAPACITY;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtisetConfig {
    /// Working-set settings
    #[serde(default)]
    pub workset: WorksetConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Working-set settings, fixed for the lifetime of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorksetConfig {
    /// Maximum number of artifacts held at once
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl Default for WorksetConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

impl WorksetConfig {
    pub fn validate(&self) -> Result<(), WorksetError> {
        if self.capacity < 1 {
            return Err(WorksetError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }

    /// Build an empty working set with this capacity.
    pub fn build<P>(&self) -> Result<Workset<P>, WorksetError> {
        Workset::new(self.capacity)
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Workset: {0}")]
    Workset(String),
    #[error("Logging: {0}")]
    Logging(String),
}

impl ArtisetConfig {
    /// Validate the entire configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.workset.validate() {
            errors.push(ValidationError::Workset(e.to_string()));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and fold all errors into one `ApiError`.
    pub fn ensure_valid(&self) -> Result<(), ApiError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })
    }
}
