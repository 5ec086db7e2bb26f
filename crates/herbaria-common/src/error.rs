//! Error types shared across the herbaria crates

use thiserror::Error;

/// Result type alias for herbaria operations
pub type Result<T> = std::result::Result<T, HerbariaError>;

/// Main error type for herbaria
#[derive(Error, Debug)]
pub enum HerbariaError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl HerbariaError {
    /// Shorthand for a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        HerbariaError::Config(message.into())
    }
}
