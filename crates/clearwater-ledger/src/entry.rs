//! Typed ledger entries.
//!
//! Every piece of ledger state is a [`LedgerEntry`] keyed by a 256-bit
//! index. The index is derived from the entry's identifying fields (see
//! [`crate::index`]), so an entry's identity and its location coincide.

use clearwater_common::{Amount, Uint160, Uint256};

/// Ledger-entry type tag.
///
/// Doubles as the `kind` discriminator for directories: each `(base, kind)`
/// pair names an independent paged index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EntryKind {
    AccountRoot = 1,
    DirRoot = 2,
    DirNode = 3,
    RippleState = 4,
    GeneratorMap = 5,
}

impl EntryKind {
    /// The tag byte used in index derivation.
    pub fn tag(self) -> u8 {
        self as u8
    }
}

/// The root entry of an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRoot {
    pub index: Uint256,
    pub account_id: Uint160,
    /// Native-currency balance.
    pub balance: Amount,
    /// The next expected transaction sequence from this account.
    pub sequence: u32,
    /// Generator id authorized to sign for this account, once claimed.
    pub authorized_key: Option<Uint160>,
}

/// The root of a paged directory: the inclusive range of live page numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirRoot {
    pub index: Uint256,
    pub first_node: u64,
    pub last_node: u64,
}

/// Maximum number of indexes held by one directory page.
pub const DIR_NODE_MAX: usize = 32;

/// One page of a paged directory.
///
/// Holds at most [`DIR_NODE_MAX`] indexes; order within a page is not
/// meaningful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirNode {
    pub index: Uint256,
    pub indexes: Vec<Uint256>,
}

/// A bidirectional credit line between two accounts in one currency.
///
/// Canonicalized so that `low_id < high_id` lexicographically; a
/// transactor's side (low or high) is derived from the ordering, never
/// stored as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RippleState {
    pub index: Uint256,
    /// Balance as seen from the low side; the currency tags the line.
    pub balance: Amount,
    pub low_limit: Amount,
    pub high_limit: Amount,
    pub low_id: Uint160,
    pub high_id: Uint160,
    pub flags: u32,
}

impl RippleState {
    /// The low account has indexed this line in its line directory.
    pub const FLAG_LOW_INDEXED: u32 = 0x0001;
    /// The high account has indexed this line in its line directory.
    pub const FLAG_HIGH_INDEXED: u32 = 0x0002;
}

/// Registration of a generator: the public-key identity bound to an
/// account at claim time, with its encrypted generator blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorMap {
    pub index: Uint256,
    pub generator_id: Uint160,
    pub generator: Vec<u8>,
}

/// A typed ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEntry {
    AccountRoot(AccountRoot),
    DirRoot(DirRoot),
    DirNode(DirNode),
    RippleState(RippleState),
    GeneratorMap(GeneratorMap),
}

impl LedgerEntry {
    /// The entry's 256-bit index.
    pub fn index(&self) -> Uint256 {
        match self {
            LedgerEntry::AccountRoot(e) => e.index,
            LedgerEntry::DirRoot(e) => e.index,
            LedgerEntry::DirNode(e) => e.index,
            LedgerEntry::RippleState(e) => e.index,
            LedgerEntry::GeneratorMap(e) => e.index,
        }
    }

    /// The entry's type tag.
    pub fn kind(&self) -> EntryKind {
        match self {
            LedgerEntry::AccountRoot(_) => EntryKind::AccountRoot,
            LedgerEntry::DirRoot(_) => EntryKind::DirRoot,
            LedgerEntry::DirNode(_) => EntryKind::DirNode,
            LedgerEntry::RippleState(_) => EntryKind::RippleState,
            LedgerEntry::GeneratorMap(_) => EntryKind::GeneratorMap,
        }
    }
}

impl From<AccountRoot> for LedgerEntry {
    fn from(e: AccountRoot) -> Self {
        LedgerEntry::AccountRoot(e)
    }
}

impl From<DirRoot> for LedgerEntry {
    fn from(e: DirRoot) -> Self {
        LedgerEntry::DirRoot(e)
    }
}

impl From<DirNode> for LedgerEntry {
    fn from(e: DirNode) -> Self {
        LedgerEntry::DirNode(e)
    }
}

impl From<RippleState> for LedgerEntry {
    fn from(e: RippleState) -> Self {
        LedgerEntry::RippleState(e)
    }
}

impl From<GeneratorMap> for LedgerEntry {
    fn from(e: GeneratorMap) -> Self {
        LedgerEntry::GeneratorMap(e)
    }
}
