//! Hashing and Ed25519 signatures for the clearwater ledger core.
//!
//! Ledger-entry indexes and transaction ids are SHA-512-half digests
//! (the first 32 bytes of SHA-512); account ids are derived from Ed25519
//! public keys. This crate provides both, plus the key and signature types
//! used by the transaction engine.

pub mod error;
pub mod hash;
pub mod keys;

pub use error::CryptoError;
pub use hash::{sha256, sha512_half, sha512_half_multi};
pub use keys::{PublicKey, SecretKey, Signature};
