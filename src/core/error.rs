//! Typed errors for the engine and its configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced synchronously by engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A caller asked for something that cannot be produced
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be loaded or failed validation
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors loading or validating an [`EngineConfig`](super::EngineConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid JSON for the config schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the engine cannot run with
    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;
