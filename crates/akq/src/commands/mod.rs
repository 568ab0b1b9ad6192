//! Command implementations for the akq CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod compile;
pub mod completions;
pub mod config;
pub mod fields;
pub mod request;

use std::env;

use armonik_api_rs::error::ConfigError;
use armonik_filter_rs::{FilterError, ParseError};

use crate::cli::Cli;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Expression parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Filter construction error.
    #[error("filter error: {0}")]
    Filter(#[from] FilterError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Refused operation, e.g. overwriting an existing config file.
    #[error("{0}")]
    Refused(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CommandError {
    /// Returns the error code string for JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            CommandError::Parse(_) => "PARSE_ERROR",
            CommandError::Filter(_) => "FILTER_ERROR",
            CommandError::Config(_) => "CONFIG_ERROR",
            CommandError::Refused(_) => "REFUSED",
            CommandError::Io(_) => "IO_ERROR",
            CommandError::Json(_) => "JSON_ERROR",
        }
    }

    /// Returns the underlying filter or parse error code, if any.
    pub fn detail(&self) -> Option<&'static str> {
        match self {
            CommandError::Parse(e) => Some(e.code()),
            CommandError::Filter(e) => Some(e.code()),
            _ => None,
        }
    }

    /// Returns the process exit code.
    pub fn exit_code(&self) -> u8 {
        match self {
            CommandError::Parse(_) | CommandError::Filter(_) => 1,
            CommandError::Json(_) => 1,
            CommandError::Io(_) => 3,
            CommandError::Refused(_) => 4,
            CommandError::Config(_) => 5,
        }
    }
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
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    ///
    /// Colors are also disabled when `NO_COLOR` is set.
    pub fn from_cli(cli: &Cli) -> Self {
        let no_color_env = env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color && !no_color_env,
            quiet: cli.quiet,
            verbose: cli.verbose,
        }
    }
}
