//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Feed definition errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("feed definition parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("feed definition validation error: {0}")]
    Validation(String),
}
