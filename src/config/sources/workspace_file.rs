//! Per-workspace config files under `<root>/config/`.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Selects `config/<name>.toml` layered over `config/config.toml`.
pub const ENV_SELECTOR: &str = "ARTISET_ENV";
const DEFAULT_ENV: &str = "development";

/// Candidate files in merge order; later files win.
pub fn workspace_config_files(workspace_root: &Path) -> [PathBuf; 2] {
    let dir = workspace_root.join("config");
    let env = std::env::var(ENV_SELECTOR)
        .ok()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_ENV.to_string());
    [dir.join("config.toml"), dir.join(env + ".toml")]
}

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let layered = workspace_config_files(workspace_root)
        .into_iter()
        .filter(|path| path.is_file())
        .fold(builder, |builder, path| {
            debug!(config_path = %path.display(), "Layering workspace configuration");
            builder.add_source(File::from(path))
        });
    Ok(layered)
}
