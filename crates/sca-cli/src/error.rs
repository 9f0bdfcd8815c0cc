//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The analysis call failed; no record was written
    #[error("Analysis failed: {0}")]
    Network(#[from] sca_webhook::WebhookError),

    /// The record pipeline failed
    #[error("Capture failed: {0}")]
    Store(#[from] sca_store::StoreError),

    /// File watcher error
    #[error("Watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
