//! CLI error types

use thiserror::Error;
use valuation_core::types::ValuationError;

use crate::config::ConfigError;

/// Errors surfaced by `valuer` commands
#[derive(Debug, Error)]
pub enum CliError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid case file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration could not be rendered: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Valuation failed: {0}")]
    Valuation(#[from] ValuationError),

    #[error("Validation failed with {0} error finding(s)")]
    ValidationFailed(usize),
}

/// Result alias for CLI commands
pub type Result<T> = std::result::Result<T, CliError>;
