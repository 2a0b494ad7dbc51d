//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

/// Map domain/service errors to a single line for stderr.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::ConfigError(msg) => format!("config: {}", msg.replace('\n', "; ")),
        ApiError::ScriptError { line, message } => format!("script:{}: {}", line, message),
        other => other.to_string(),
    }
}
