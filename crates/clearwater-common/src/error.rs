//! Common error types for the clearwater workspace.

use thiserror::Error;

/// Common result type for clearwater operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for clearwater.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid data.
    #[error("invalid data: {0}")]
    InvalidData(String),
}
