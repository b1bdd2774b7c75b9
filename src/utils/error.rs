//! Error Handling
//!
//! Unified error types for the memory bridge.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Backing store could not be created or opened
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// A specific operation failed against an open store
    #[error("Store operation '{operation}' failed: {message}")]
    StoreOperationFailed {
        operation: &'static str,
        message: String,
    },

    /// SQLite errors (auto-converted from rusqlite::Error)
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a storage-unavailable error
    pub fn storage_unavailable(msg: impl Into<String>) -> Self {
        Self::StorageUnavailable(msg.into())
    }

    /// Create a store-operation error naming the failed operation
    pub fn store_operation(operation: &'static str, msg: impl Into<String>) -> Self {
        Self::StoreOperationFailed {
            operation,
            message: msg.into(),
        }
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Map a SQLite error into a `StoreOperationFailed` for `operation`.
    pub fn op(operation: &'static str) -> impl FnOnce(rusqlite::Error) -> AppError {
        move |e| AppError::store_operation(operation, e.to_string())
    }
}
