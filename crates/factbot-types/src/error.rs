//! Shared error types for factbot.

use thiserror::Error;

/// Top-level error type for factbot.
#[derive(Error, Debug)]
pub enum FactbotError {
    /// The fact store failed to read or write.
    #[error("Store error: {0}")]
    Store(String),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Invalid user input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Alias for Result with FactbotError.
pub type FactbotResult<T> = Result<T, FactbotError>;
