//! Ledger-entry model and state store for the clearwater ledger core.
//!
//! A ledger is a map from 256-bit indexes to typed entries: account roots,
//! directory pages, credit lines, and generator registrations. This crate
//! provides the entry model, the index derivation scheme that addresses
//! entries, and an in-memory [`Ledger`] store with the transaction log.
//!
//! # Overview
//!
//! - [`entry`] - [`LedgerEntry`] variants and the [`EntryKind`] tag
//! - [`index`] - index derivation (SHA-512-half over domain-prefixed fields)
//! - [`store`] - [`Ledger`] / [`LedgerState`]: typed lookup, write-back,
//!   and the append-only transaction log
//!
//! All getters return owned snapshots. Mutation happens by staging modified
//! copies and writing them back; the store is the sole authority for
//! committed state.

pub mod entry;
pub mod index;
pub mod store;

pub use entry::{
    AccountRoot, DirNode, DirRoot, EntryKind, GeneratorMap, LedgerEntry, RippleState,
    DIR_NODE_MAX,
};
pub use store::{Ledger, LedgerState, LoggedTransaction, WriteMode};
