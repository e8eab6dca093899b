//! Core error types for lectio-core.
//!
//! Only persistence failures cross the engine boundary; malformed slots,
//! history entries and documents are recovered locally (skipped or treated
//! as empty defaults).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for lectio-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Preference/history store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Store-specific errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to write a resource document
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize a resource document
    #[error("Failed to serialize {path}: {source}")]
    SerializeFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
