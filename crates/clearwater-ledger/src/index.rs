//! Ledger-entry index derivation.
//!
//! Entry indexes are SHA-512-half digests over a short domain prefix and
//! the entry's identifying fields. Content addressing breaks the reference
//! cycle between accounts, directories, and credit lines: entries refer to
//! each other by index, never by pointer.

use crate::entry::EntryKind;
use clearwater_common::{Uint160, Uint256};
use clearwater_crypto::sha512_half_multi;

const ACCOUNT_PREFIX: &[u8] = b"account";
const DIR_PREFIX: &[u8] = b"dir";
const LINE_PREFIX: &[u8] = b"line";
const GENERATOR_PREFIX: &[u8] = b"gen";

/// Index of an account root.
pub fn account_root_index(account_id: Uint160) -> Uint256 {
    sha512_half_multi(&[ACCOUNT_PREFIX, account_id.as_bytes()])
}

/// Index of the directory root for `(base, kind)`.
pub fn dir_root_index(base: Uint256, kind: EntryKind) -> Uint256 {
    sha512_half_multi(&[DIR_PREFIX, base.as_bytes(), &[kind.tag()]])
}

/// Index of directory page `node_no` for `(base, kind)`.
pub fn dir_node_index(base: Uint256, kind: EntryKind, node_no: u64) -> Uint256 {
    sha512_half_multi(&[
        DIR_PREFIX,
        base.as_bytes(),
        &[kind.tag()],
        &node_no.to_be_bytes(),
    ])
}

/// Index of the credit line between two accounts in one currency.
///
/// The account pair is canonicalized (low id first) before hashing, so
/// both directions address the same entry.
pub fn ripple_state_index(a: Uint160, b: Uint160, currency: Uint160) -> Uint256 {
    let (low, high) = if a < b { (a, b) } else { (b, a) };
    sha512_half_multi(&[
        LINE_PREFIX,
        low.as_bytes(),
        high.as_bytes(),
        currency.as_bytes(),
    ])
}

/// Index of a generator registration.
pub fn generator_index(generator_id: Uint160) -> Uint256 {
    sha512_half_multi(&[GENERATOR_PREFIX, generator_id.as_bytes()])
}
