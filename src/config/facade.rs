//! Config loader: layers defaults, global file, workspace files and environment.

use super::merge;
use super::sources::{environment, global_file, workspace_file};
use super::ArtisetConfig;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    ///
    /// Precedence (lowest to highest): defaults, global file, workspace
    /// `config/config.toml`, workspace `config/{ARTISET_ENV}.toml`, `ARTISET__*` variables.
    pub fn load(workspace_root: &Path) -> Result<ArtisetConfig, ConfigError> {
        let builder = merge::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);
        builder.build()?.try_deserialize()
    }

    /// Load from one explicit file on top of the defaults. Environment variables still apply.
    pub fn load_from_file(path: &Path) -> Result<ArtisetConfig, ConfigError> {
        let builder = merge::builder_with_defaults()?
            .add_source(File::from(path.to_path_buf()).required(true));
        let builder = environment::add_to_builder(builder);
        builder.build()?.try_deserialize()
    }

    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    /// Built-in defaults only.
    pub fn defaults() -> ArtisetConfig {
        ArtisetConfig::default()
    }
}
