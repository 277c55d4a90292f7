//! Fixed-width identifier types.
//!
//! The ledger addresses everything by fixed-width big-endian byte strings:
//! accounts, currencies, and generators by 160-bit ids, ledger entries and
//! transactions by 256-bit indexes. Ordering is lexicographic on the raw
//! bytes, which is what the credit-line canonicalization relies on.

use std::fmt;

/// A 160-bit identifier for accounts, currencies, and generators.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Uint160(pub [u8; 20]);

impl Uint160 {
    /// The all-zero id. As a currency tag this denotes the native currency.
    pub const ZERO: Self = Self([0u8; 20]);

    /// Create from raw bytes.
    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Check if this is the zero id.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Widen to a 256-bit value: the 20 id bytes followed by 12 zero bytes.
    ///
    /// Used to derive a directory base key from an account id.
    pub fn extend(&self) -> Uint256 {
        let mut bytes = [0u8; 32];
        bytes[..20].copy_from_slice(&self.0);
        Uint256(bytes)
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Uint160 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uint160({})", self.to_hex())
    }
}

impl fmt::Display for Uint160 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 20]> for Uint160 {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Uint160 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A 256-bit value: ledger-entry indexes and transaction ids.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Uint256(pub [u8; 32]);

impl Uint256 {
    /// The all-zero value.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Create from raw bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Check if this is the zero value.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Uint256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uint256({})", self.to_hex())
    }
}

impl fmt::Display for Uint256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl From<[u8; 32]> for Uint256 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Uint256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
