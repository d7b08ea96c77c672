//! Command implementations for the opp CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod completions;
pub mod config;
pub mod dashboard;
pub mod export;
pub mod list;
pub mod options;
pub mod preset;
pub mod session;
pub mod share;
pub mod show;
pub mod submit;
pub mod theme;
pub mod workspace;

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use opptrack_query::DEFAULT_DEBOUNCE;

use crate::cli::Cli;
use config::Config;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Tracker error (unknown id, invalid criteria, persistence).
    #[error(transparent)]
    Tracker(#[from] opptrack_query::TrackerError),

    /// Filter criteria or query string error.
    #[error("filter error: {0}")]
    Filter(#[from] opptrack_query::FilterError),

    /// Persisted state error.
    #[error("state error: {0}")]
    StateStore(#[from] opptrack_query::StateStoreError),

    /// CSV export error.
    #[error("export error: {0}")]
    Export(#[from] opptrack_query::ExportError),

    /// Dataset could not be loaded.
    #[error("dataset error: {0}")]
    Data(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
    /// Delay before committed filters drive the view.
    pub debounce: Duration,
    /// Alternative dataset file.
    pub data_path: Option<PathBuf>,
    /// Default directory for CSV exports.
    pub export_dir: Option<PathBuf>,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments and the loaded config.
    ///
    /// Flags win over config values. Colors are also disabled when `NO_COLOR`
    /// is set.
    pub fn from_cli(cli: &Cli, config: &Config) -> Self {
        let colors_enabled = config.output.color.unwrap_or(true);
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && colors_enabled && env::var_os("NO_COLOR").is_none(),
            quiet: cli.quiet,
            verbose: cli.verbose,
            debounce: config
                .filters
                .debounce_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_DEBOUNCE),
            data_path: cli.data.clone().or_else(|| config.data.clone()),
            export_dir: config.export.directory.clone(),
        }
    }
}
