//! Kernel-specific error types.

use factbot_types::error::FactbotError;
use thiserror::Error;

/// Kernel error type wrapping FactbotError with kernel-specific context.
#[derive(Error, Debug)]
pub enum KernelError {
    /// A wrapped FactbotError.
    #[error(transparent)]
    Factbot(#[from] FactbotError),

    /// The kernel failed to boot.
    #[error("Boot failed: {0}")]
    BootFailed(String),
}

/// Alias for kernel results.
pub type KernelResult<T> = Result<T, KernelError>;
