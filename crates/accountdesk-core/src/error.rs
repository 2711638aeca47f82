//! Error types for the core library.

use thiserror::Error;

use crate::account::AccountId;

/// Errors that can occur in registry and storage operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Stored data could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// I/O error from a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data lists the same account id more than once.
    #[error("Duplicate account id in stored data: {0}")]
    DuplicateAccountId(AccountId),

    /// Every account id has been issued; the counter cannot advance.
    #[error("Account id space exhausted at {0}")]
    IdSpaceExhausted(u64),

    /// Store rejected the operation.
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
