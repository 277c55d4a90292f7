//! SHA-256 and SHA-512-half hashing.
//!
//! SHA-512-half, the first 32 bytes of a SHA-512 digest, is the ledger's
//! workhorse hash: entry indexes, transaction ids, and claim digests are all
//! SHA-512-half values. SHA-256 is used only for account-id derivation.

use clearwater_common::Uint256;
use sha2::{Digest, Sha256, Sha512};

/// Computes the SHA-256 hash of the given data.
pub fn sha256(data: &[u8]) -> Uint256 {
    let digest = Sha256::digest(data);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    Uint256::new(bytes)
}

/// Computes the SHA-512-half hash of the given data.
///
/// This is the first 32 bytes of the SHA-512 digest.
pub fn sha512_half(data: &[u8]) -> Uint256 {
    let digest = Sha512::digest(data);
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest[..32]);
    Uint256::new(bytes)
}

/// Computes the SHA-512-half hash of multiple data chunks.
///
/// Equivalent to concatenating all chunks and hashing the result, but
/// avoids the intermediate buffer. Index derivation hashes a domain prefix
/// followed by the identifying fields this way.
pub fn sha512_half_multi(chunks: &[&[u8]]) -> Uint256 {
    let mut hasher = Sha512::new();
    for chunk in chunks {
        hasher.update(chunk);
    }
    let digest = hasher.finalize();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest[..32]);
    Uint256::new(bytes)
}
