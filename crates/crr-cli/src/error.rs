//! Error type of the command-line front end.

use thiserror::Error;

use crate::config::ConfigError;

/// Everything that can abort a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    /// Model construction or pricing failed.
    #[error(transparent)]
    Pricing(#[from] crr_core::Error),

    /// The configuration is missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialising results to JSON failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Shorthand result type for the CLI.
pub type Result<T> = std::result::Result<T, CliError>;
