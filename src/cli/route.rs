//! CLI route: single route table and run context. Dispatches to services and presentation.

use crate::config::{ArtisetConfig, ConfigLoader};
use crate::error::ApiError;
use crate::script::{load_script, replay};
use crate::views::{ViewOrdering, ViewPolicy};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_config_json, format_config_text, format_replay_json, format_replay_text,
};

/// Runtime context for CLI execution: workspace and effective configuration.
pub struct RunContext {
    config: ArtisetConfig,
    workspace_root: PathBuf,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(ref cfg_path) => ConfigLoader::load_from_file(cfg_path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        config.ensure_valid()?;
        Ok(Self {
            config,
            workspace_root,
        })
    }

    pub fn from_config(config: ArtisetConfig, workspace_root: PathBuf) -> Result<Self, ApiError> {
        config.ensure_valid()?;
        Ok(Self {
            config,
            workspace_root,
        })
    }

    pub fn config(&self) -> &ArtisetConfig {
        &self.config
    }

    pub fn workspace_root(&self) -> &PathBuf {
        &self.workspace_root
    }

    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let result = match command {
            Commands::Replay {
                script,
                capacity,
                format,
                events,
                order,
                visible_only,
            } => {
                let policy = ViewPolicy {
                    ordering: parse_ordering(order)?,
                    visible_only: *visible_only,
                };
                let script_path = if script.is_absolute() {
                    script.clone()
                } else {
                    self.workspace_root.join(script)
                };
                let commands = load_script(&script_path)?;
                let capacity = capacity.unwrap_or(self.config.workset.capacity);
                let report = replay(&commands, capacity)?;
                match format.as_str() {
                    "json" => format_replay_json(&report, &policy, *events),
                    "text" => Ok(format_replay_text(&report, &policy, *events)),
                    other => Err(invalid_format(other)),
                }
            }
            Commands::Config { format } => match format.as_str() {
                "json" => format_config_json(&self.config),
                "text" => format_config_text(&self.config),
                other => Err(invalid_format(other)),
            },
        };
        info!(
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }
}

fn parse_ordering(order: &str) -> Result<ViewOrdering, ApiError> {
    match order {
        "position" => Ok(ViewOrdering::Position),
        "recency" => Ok(ViewOrdering::Recency),
        other => Err(ApiError::ConfigError(format!(
            "Invalid order: {} (must be 'position' or 'recency')",
            other
        ))),
    }
}

fn invalid_format(format: &str) -> ApiError {
    ApiError::ConfigError(format!(
        "Invalid output format: {} (must be 'text' or 'json')",
        format
    ))
}
