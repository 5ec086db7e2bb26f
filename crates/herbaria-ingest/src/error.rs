use std::path::PathBuf;

use herbaria_common::HerbariaError;

use crate::records::DecodeError;

/// Result type for ingestion operations
pub type Result<T> = std::result::Result<T, IngestError>;

/// Errors that abort an ingestion or validation pass
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {source}", path.display())]
    Decode {
        path: PathBuf,
        line: u64,
        #[source]
        source: DecodeError,
    },

    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    #[error(transparent)]
    Common(#[from] HerbariaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by a [`crate::sink::RecordSink`]
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Batch rejected: {0}")]
    Rejected(String),
}
