//! Error types for content store access

use std::path::PathBuf;
use thiserror::Error;

use crate::model::{Collection, RecordId};

/// Content store error
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server returned an error
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Update targeted a row that does not exist
    #[error("{collection} row {id} not found")]
    NotFound { collection: Collection, id: RecordId },

    /// Singleton read matched more than one row
    #[error("{0} holds more than one row")]
    MultipleRows(Collection),

    /// Seed file could not be read
    #[error("failed to read seed {path}: {source}")]
    Seed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Store settings are unusable
    #[error("invalid store configuration: {0}")]
    InvalidConfig(String),

    /// Failure injected by a test double
    #[error("injected failure: {0}")]
    Injected(String),
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
