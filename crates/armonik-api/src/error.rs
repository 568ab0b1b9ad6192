//! Error types for the ArmoniK API crate.

use std::path::PathBuf;

use thiserror::Error;

/// A specialized Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while resolving the client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No home or XDG config directory could be determined.
    #[error("could not determine config directory")]
    NoConfigDir,

    /// The config file exists but could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`crate::config::ClientConfig`].
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The config could not be serialized.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The config file could not be written.
    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A setting has an unusable value.
    #[error("invalid config value for {field}: {message}")]
    Invalid {
        /// The offending setting.
        field: &'static str,
        /// Why it was rejected.
        message: String,
    },
}

impl ConfigError {
    /// Creates an invalid value error.
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            message: message.into(),
        }
    }
}
