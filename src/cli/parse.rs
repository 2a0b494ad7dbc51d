//! CLI parse: clap types for artiset. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// artiset - bounded, focus-aware working set for chat artifacts
#[derive(Parser)]
#[command(name = "artiset")]
#[command(about = "Bounded, focus-aware working set for AI-generated chat artifacts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (for config/config.toml lookup)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a script of working-set commands and print the resulting state
    Replay {
        /// Script file (one command per line)
        script: PathBuf,
        /// Capacity override (defaults to workset.capacity from config)
        #[arg(long)]
        capacity: Option<usize>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Include the change log
        #[arg(long)]
        events: bool,
        /// Row ordering (position or recency)
        #[arg(long, default_value = "position")]
        order: String,
        /// Hide minimized artifacts
        #[arg(long)]
        visible_only: bool,
    },
    /// Show the effective configuration
    Config {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
