//! Error types for snapshot persistence

use thiserror::Error;

/// Errors that can occur while persisting or loading snapshots
#[derive(Debug, Error)]
pub enum StorageError {
    /// SQLite-level failure
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Filesystem failure
    #[error("IO error: {0}")]
    Io(String),

    /// HTTP request to the persistence API failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Persistence API rejected the request
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Snapshot could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Connection mutex poisoned
    #[error("Storage lock poisoned")]
    Lock,
}
