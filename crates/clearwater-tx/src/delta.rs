//! Staged ledger mutations.
//!
//! A transaction never writes to the store directly. Handlers stage typed
//! `(action, entry)` pairs into a [`LedgerDelta`]; if and only if the apply
//! ends in success, the delta is committed in staging order. A failed apply
//! drops the delta and the store is untouched.

use clearwater_ledger::{AccountRoot, LedgerEntry, LedgerState, WriteMode};

/// What happens to a staged entry at commit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryAction {
    /// The entry is new.
    Create,
    /// The entry replaces its committed copy.
    Modify,
    /// The entry is removed from the state map.
    Delete,
}

/// The ordered list of entries affected by one transaction.
///
/// Entry 0 is always the transaction's source account root, staged by the
/// validator before dispatch.
#[derive(Debug, Default)]
pub struct LedgerDelta {
    entries: Vec<(EntryAction, LedgerEntry)>,
}

impl LedgerDelta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an entry.
    pub fn push(&mut self, action: EntryAction, entry: impl Into<LedgerEntry>) {
        self.entries.push((action, entry.into()));
    }

    /// The staged entries, in staging order.
    pub fn entries(&self) -> &[(EntryAction, LedgerEntry)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The staged account root in `slot`.
    ///
    /// Panics if the slot holds a different entry kind; handlers only call
    /// this for slots they staged themselves.
    pub(crate) fn account_root(&self, slot: usize) -> &AccountRoot {
        match &self.entries[slot].1 {
            LedgerEntry::AccountRoot(account) => account,
            other => panic!("staged entry {slot} is not an account root: {:?}", other.kind()),
        }
    }

    /// Mutable access to the staged account root in `slot`.
    pub(crate) fn account_root_mut(&mut self, slot: usize) -> &mut AccountRoot {
        match &mut self.entries[slot].1 {
            LedgerEntry::AccountRoot(account) => account,
            other => panic!("staged entry {slot} is not an account root: {:?}", other.kind()),
        }
    }

    /// Apply every staged entry to the store, in order.
    ///
    /// A refused write-back here means the staged view and the store have
    /// diverged, which must never happen; it aborts the process rather
    /// than report a per-transaction failure.
    pub fn commit(self, state: &mut LedgerState) {
        for (action, entry) in self.entries {
            match action {
                EntryAction::Create => {
                    let ok = state.write_back(WriteMode::Create, entry);
                    assert!(ok, "commit: create write-back refused");
                }
                EntryAction::Modify => {
                    let ok = state.write_back(WriteMode::Update, entry);
                    assert!(ok, "commit: update write-back refused");
                }
                EntryAction::Delete => {
                    let entry_index = entry.index();
                    let ok = state.delete_entry(entry_index);
                    assert!(ok, "commit: delete of missing entry");
                }
            }
        }
    }
}
