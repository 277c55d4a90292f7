//! Crypto error types.

use thiserror::Error;

/// Errors from key handling and signature verification.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoError {
    /// The bytes do not form a valid Ed25519 public key.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// Signature verification failed.
    #[error("invalid signature")]
    InvalidSignature,

    /// Wrong input length.
    #[error("invalid length: expected {expected}, got {got}")]
    InvalidLength { expected: usize, got: usize },
}
