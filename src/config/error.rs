//! Errors raised while loading and checking podcast-rs settings.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required TOML layer (usually `default.toml`) is absent.
    #[error("Required configuration file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error(
        "{dir_var} and {file_var} cannot both be set. Use {dir_var} for layered \
         configuration or {file_var} for a single configuration file."
    )]
    ConflictingSources {
        dir_var: &'static str,
        file_var: &'static str,
    },

    /// Value of `PODCAST_APP_ENV` or `--env` that names no known environment.
    #[error(
        "Invalid environment '{0}'. Valid values are: development, test, staging, production"
    )]
    UnknownEnvironment(String),

    /// The merged sources do not fit the `Settings` shape.
    #[error("Failed to deserialize configuration: {0}")]
    Deserialize(#[source] config::ConfigError),

    /// A setting parsed fine but its value is unusable.
    #[error("Invalid setting {key}: {message}")]
    InvalidSetting { key: String, message: String },

    #[error("Configuration source error: {0}")]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidSetting {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Dotted settings key the error is about, if it concerns a single one.
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidSetting { key, .. } => Some(key),
            _ => None,
        }
    }
}
