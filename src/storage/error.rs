//! Storage-specific error types.

use std::path::PathBuf;

/// Errors that can occur while reading or writing the to-do slot.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The slot exists but could not be read
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The slot could not be written
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The slot holds something other than a list of to-do items
    #[error("Corrupt to-do data: {0}")]
    Corrupt(String),

    /// The collection could not be serialized
    #[error("Failed to serialize to-do list: {0}")]
    Serialization(#[from] serde_json::Error),
}
