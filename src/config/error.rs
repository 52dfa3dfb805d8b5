//! Error type shared by the config loader and validators

use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading or validating a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for '{field}': {message}")]
    Validation { field: String, message: String },
}
