//! Storage error types.

use thiserror::Error;

/// Errors that can occur when using a storage medium.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the medium.
    #[error("Failed to open storage: {0}")]
    Open(String),

    /// Failed to encode or decode a value.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The medium rejected the operation.
    #[error("Storage operation failed: {0}")]
    Backend(String),

    /// Writing the value would exceed the medium's quota.
    #[error("Quota exceeded writing {key}: {needed} bytes needed, quota is {quota}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
