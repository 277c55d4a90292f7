//! In-memory ledger store.
//!
//! [`Ledger`] wraps the mutable [`LedgerState`] in a lock held for the
//! whole of one transaction application; [`LedgerState`] is the account
//! state map plus the append-only transaction log. Getters hand out owned
//! snapshots; write-back is the only mutation path.

use crate::entry::{AccountRoot, DirNode, DirRoot, EntryKind, GeneratorMap, LedgerEntry, RippleState};
use crate::index;
use clearwater_common::{Uint160, Uint256};
use parking_lot::{Mutex, MutexGuard};
use std::collections::BTreeMap;
use tracing::warn;

/// Write-back mode for [`LedgerState::write_back`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// The entry must not exist yet.
    Create,
    /// The entry must already exist.
    Update,
}

/// A transaction recorded in the ledger's transaction log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedTransaction {
    /// Serialized transaction bytes.
    pub raw: Vec<u8>,
    /// Fee paid, in native currency units.
    pub fee: i64,
}

/// The mutable state of one ledger: entries plus the transaction log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerState {
    entries: BTreeMap<Uint256, LedgerEntry>,
    transactions: BTreeMap<Uint256, LoggedTransaction>,
}

impl LedgerState {
    /// Fetch the account root for `account_id`.
    pub fn get_account_root(&self, account_id: Uint160) -> Option<AccountRoot> {
        match self.entries.get(&index::account_root_index(account_id)) {
            Some(LedgerEntry::AccountRoot(e)) => Some(e.clone()),
            _ => None,
        }
    }

    /// Fetch a directory root by its index.
    pub fn get_dir_root(&self, root_index: Uint256) -> Option<DirRoot> {
        match self.entries.get(&root_index) {
            Some(LedgerEntry::DirRoot(e)) => Some(e.clone()),
            _ => None,
        }
    }

    /// Fetch a directory page by its index.
    pub fn get_dir_node(&self, node_index: Uint256) -> Option<DirNode> {
        match self.entries.get(&node_index) {
            Some(LedgerEntry::DirNode(e)) => Some(e.clone()),
            _ => None,
        }
    }

    /// Fetch the credit line between two accounts in one currency.
    ///
    /// The account pair is canonicalized internally; both directions find
    /// the same entry.
    pub fn get_ripple_state(
        &self,
        a: Uint160,
        b: Uint160,
        currency: Uint160,
    ) -> Option<RippleState> {
        match self.entries.get(&index::ripple_state_index(a, b, currency)) {
            Some(LedgerEntry::RippleState(e)) => Some(e.clone()),
            _ => None,
        }
    }

    /// Fetch a generator registration.
    pub fn get_generator(&self, generator_id: Uint160) -> Option<GeneratorMap> {
        match self.entries.get(&index::generator_index(generator_id)) {
            Some(LedgerEntry::GeneratorMap(e)) => Some(e.clone()),
            _ => None,
        }
    }

    /// Write an entry back into the state map.
    ///
    /// Returns `false` if the mode's existence precondition is violated:
    /// [`WriteMode::Create`] on a live index, or [`WriteMode::Update`] on a
    /// missing one. Callers treat that as a diverged staged view.
    pub fn write_back(&mut self, mode: WriteMode, entry: LedgerEntry) -> bool {
        let entry_index = entry.index();
        match mode {
            WriteMode::Create => {
                if self.entries.contains_key(&entry_index) {
                    warn!(index = %entry_index, "write_back: create over existing entry");
                    return false;
                }
            }
            WriteMode::Update => {
                if !self.entries.contains_key(&entry_index) {
                    warn!(index = %entry_index, "write_back: update of missing entry");
                    return false;
                }
            }
        }
        self.entries.insert(entry_index, entry);
        true
    }

    /// Remove an entry from the state map. Returns `false` if absent.
    pub fn delete_entry(&mut self, entry_index: Uint256) -> bool {
        self.entries.remove(&entry_index).is_some()
    }

    /// Whether a transaction id is already in the transaction log.
    pub fn has_transaction(&self, txid: Uint256) -> bool {
        self.transactions.contains_key(&txid)
    }

    /// Append a transaction to the log.
    pub fn add_transaction(&mut self, txid: Uint256, raw: Vec<u8>, fee: i64) {
        self.transactions.insert(txid, LoggedTransaction { raw, fee });
    }

    /// Look up a logged transaction.
    pub fn transaction(&self, txid: Uint256) -> Option<&LoggedTransaction> {
        self.transactions.get(&txid)
    }

    /// Number of logged transactions.
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Number of live entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Walk the directory for `(base, kind)` and collect every key in
    /// pages `[first_node..=last_node]`.
    ///
    /// Missing interior pages are skipped: deletion coalesces only at the
    /// boundaries, so holes inside the range are legitimate.
    pub fn directory_keys(&self, base: Uint256, kind: EntryKind) -> Vec<Uint256> {
        let Some(root) = self.get_dir_root(index::dir_root_index(base, kind)) else {
            return Vec::new();
        };
        let mut keys = Vec::new();
        for node_no in root.first_node..=root.last_node {
            if let Some(node) = self.get_dir_node(index::dir_node_index(base, kind, node_no)) {
                keys.extend(node.indexes.iter().copied());
            }
        }
        keys
    }
}

/// A ledger: shared state behind the per-ledger apply lock.
///
/// The transaction engine locks the ledger once per apply and performs all
/// reads and the final commit under that guard, giving serializable
/// semantics for transactions applied to the same ledger. Distinct ledgers
/// have distinct locks and may be applied in parallel.
#[derive(Debug, Default)]
pub struct Ledger {
    state: Mutex<LedgerState>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the exclusive apply lock.
    pub fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clearwater_common::Amount;

    fn account(seed: u8, balance: i64) -> AccountRoot {
        let account_id = Uint160::new([seed; 20]);
        AccountRoot {
            index: index::account_root_index(account_id),
            account_id,
            balance: Amount::native(balance),
            sequence: 0,
            authorized_key: None,
        }
    }

    #[test]
    fn test_write_back_create_then_update() {
        let mut state = LedgerState::default();
        let acct = account(1, 500);

        assert!(state.write_back(WriteMode::Create, acct.clone().into()));
        // Creating again over the same index is refused.
        assert!(!state.write_back(WriteMode::Create, acct.clone().into()));

        let mut modified = acct;
        modified.balance = Amount::native(400);
        assert!(state.write_back(WriteMode::Update, modified.clone().into()));

        let fetched = state.get_account_root(modified.account_id).unwrap();
        assert_eq!(fetched.balance, Amount::native(400));
    }

    #[test]
    fn test_update_of_missing_entry_is_refused() {
        let mut state = LedgerState::default();
        assert!(!state.write_back(WriteMode::Update, account(1, 500).into()));
    }

    #[test]
    fn test_delete_entry() {
        let mut state = LedgerState::default();
        let acct = account(1, 500);
        let entry_index = acct.index;

        assert!(state.write_back(WriteMode::Create, acct.into()));
        assert!(state.delete_entry(entry_index));
        assert!(!state.delete_entry(entry_index));
        assert_eq!(state.entry_count(), 0);
    }

    #[test]
    fn test_getters_see_only_their_kind() {
        let mut state = LedgerState::default();
        let acct = account(1, 500);
        let account_id = acct.account_id;
        assert!(state.write_back(WriteMode::Create, acct.into()));

        // The account-root index holds an account root, not a dir root.
        assert!(state
            .get_dir_root(index::account_root_index(account_id))
            .is_none());
        assert!(state.get_account_root(account_id).is_some());
    }

    #[test]
    fn test_ripple_state_lookup_is_direction_independent() {
        let mut state = LedgerState::default();
        let a = Uint160::new([1; 20]);
        let b = Uint160::new([2; 20]);
        let usd = Uint160::new([9; 20]);

        let line = RippleState {
            index: index::ripple_state_index(a, b, usd),
            balance: Amount::zero(usd),
            low_limit: Amount::new(100, usd),
            high_limit: Amount::zero(usd),
            low_id: a,
            high_id: b,
            flags: RippleState::FLAG_LOW_INDEXED,
        };
        assert!(state.write_back(WriteMode::Create, line.into()));

        assert!(state.get_ripple_state(a, b, usd).is_some());
        assert!(state.get_ripple_state(b, a, usd).is_some());
        assert!(state.get_ripple_state(a, b, Uint160::ZERO).is_none());
    }

    #[test]
    fn test_transaction_log() {
        let mut state = LedgerState::default();
        let txid = Uint256::new([7; 32]);

        assert!(!state.has_transaction(txid));
        state.add_transaction(txid, vec![1, 2, 3], 100);
        assert!(state.has_transaction(txid));
        assert_eq!(state.transaction(txid).unwrap().fee, 100);
        assert_eq!(state.transaction_count(), 1);
    }
}
