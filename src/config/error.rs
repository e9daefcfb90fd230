//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Vote frequency must be at least 1")]
    InvalidVoteFrequency,

    #[error("Max suggestions must be at least 1")]
    InvalidMaxSuggestions,

    #[error("Max conversation turns must be at least 1")]
    InvalidMaxTurns,

    #[error("Temperature {name} = {value} is outside 0.0..=2.0")]
    InvalidTemperature { name: &'static str, value: f32 },

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Script id cannot be empty")]
    EmptyScriptId,
}
