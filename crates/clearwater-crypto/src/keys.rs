//! Ed25519 key types.
//!
//! - [`PublicKey`]: a 32-byte Ed25519 verifying key
//! - [`SecretKey`]: a 32-byte Ed25519 signing key
//! - [`Signature`]: a 64-byte Ed25519 signature
//!
//! An account id is derived from a public key by hashing the key material
//! and truncating to 160 bits; see [`PublicKey::account_id`].

use crate::error::CryptoError;
use crate::hash::sha256;
use clearwater_common::Uint160;
use ed25519_dalek::{SigningKey, VerifyingKey};
use std::fmt;

/// An Ed25519 public key (verifying key).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(VerifyingKey);

impl PublicKey {
    /// Creates a public key from raw 32-byte Ed25519 key material.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidPublicKey`] if the bytes do not
    /// represent a valid point on the Ed25519 curve.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        let key = VerifyingKey::from_bytes(bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self(key))
    }

    /// Creates a public key from a byte slice of any length.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidLength`] if the slice is not 32 bytes,
    /// or [`CryptoError::InvalidPublicKey`] if the bytes are invalid.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; 32] = bytes.try_into().map_err(|_| CryptoError::InvalidLength {
            expected: 32,
            got: bytes.len(),
        })?;
        Self::from_bytes(&arr)
    }

    /// Returns the raw 32-byte key material.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// Derives the 160-bit account id for this key.
    ///
    /// The id is the first 20 bytes of the SHA-256 of the key material.
    pub fn account_id(&self) -> Uint160 {
        let digest = sha256(self.as_bytes());
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&digest.as_bytes()[..20]);
        Uint160::new(bytes)
    }

    /// Verifies an Ed25519 signature over a message.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidSignature`] if verification fails.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), CryptoError> {
        use ed25519_dalek::Verifier;
        let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
        self.0
            .verify(message, &sig)
            .map_err(|_| CryptoError::InvalidSignature)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", hex::encode(self.as_bytes()))
    }
}

/// An Ed25519 secret key (signing key).
///
/// The `Debug` implementation does not reveal the key material, and the
/// underlying key zeroizes itself on drop.
pub struct SecretKey {
    inner: SigningKey,
}

impl SecretKey {
    /// Generates a new random secret key using the OS random number generator.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        Self {
            inner: SigningKey::generate(&mut csprng),
        }
    }

    /// Creates a secret key from a 32-byte seed.
    ///
    /// Deterministic: the same seed always produces the same key.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            inner: SigningKey::from_bytes(seed),
        }
    }

    /// Signs a message, producing a 64-byte Ed25519 signature.
    pub fn sign(&self, message: &[u8]) -> Signature {
        use ed25519_dalek::Signer;
        Signature(self.inner.sign(message).to_bytes())
    }

    /// Derives the corresponding public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.inner.verifying_key())
    }

    /// Returns the raw 32-byte seed.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.inner.as_bytes()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey([REDACTED])")
    }
}

impl Clone for SecretKey {
    fn clone(&self) -> Self {
        Self {
            inner: SigningKey::from_bytes(self.inner.as_bytes()),
        }
    }
}

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub [u8; 64]);

impl Signature {
    /// Returns the raw 64-byte signature.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Creates a signature from raw bytes.
    ///
    /// No validation is performed; use [`PublicKey::verify`] to check validity.
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Creates a signature from a byte slice of any length.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidLength`] if the slice is not 64 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; 64] = bytes.try_into().map_err(|_| CryptoError::InvalidLength {
            expected: 64,
            got: bytes.len(),
        })?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", hex::encode(&self.0[..8]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signing_round_trip() {
        let secret = SecretKey::generate();
        let public = secret.public_key();

        let message = b"hello world";
        let signature = secret.sign(message);

        assert!(public.verify(message, &signature).is_ok());
        assert!(public.verify(b"wrong message", &signature).is_err());
    }

    #[test]
    fn test_seed_is_deterministic() {
        let a = SecretKey::from_seed(&[7u8; 32]);
        let b = SecretKey::from_seed(&[7u8; 32]);
        assert_eq!(a.public_key(), b.public_key());
        assert_eq!(a.sign(b"msg"), b.sign(b"msg"));
    }

    #[test]
    fn test_account_id_derivation() {
        let secret = SecretKey::from_seed(&[1u8; 32]);
        let id = secret.public_key().account_id();
        assert!(!id.is_zero());

        // Distinct keys get distinct ids.
        let other = SecretKey::from_seed(&[2u8; 32]);
        assert_ne!(id, other.public_key().account_id());
    }

    #[test]
    fn test_from_slice_length_checks() {
        assert!(matches!(
            PublicKey::from_slice(&[0u8; 31]),
            Err(CryptoError::InvalidLength { expected: 32, .. })
        ));
        assert!(matches!(
            Signature::from_slice(&[0u8; 63]),
            Err(CryptoError::InvalidLength { expected: 64, .. })
        ));
    }
}
