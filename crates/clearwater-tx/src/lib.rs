//! Transaction validation, dispatch, and application for the clearwater
//! ledger core.
//!
//! # Overview
//!
//! A signed [`TransactionFrame`] enters [`TransactionEngine::apply_transaction`].
//! The validator checks identity, signature, fee schedule, and sequence
//! against the fetched source account, staging the fee debit into a
//! [`LedgerDelta`]; the dispatcher then routes to the type handler
//! (claim, payment, credit-set, plus the reserved types). Handlers read
//! committed state through the store and append typed mutations to the
//! delta, using the [`directory`] subsystem to maintain secondary indexes.
//! On success the delta commits atomically and the raw transaction lands
//! in the ledger's transaction log; on any failure the store is untouched.
//!
//! Every apply returns one [`TxResultCode`], classed as success,
//! retryable, or malformed (see [`ResultClass`]).
//!
//! # Example
//!
//! ```
//! use clearwater_common::{Amount, FeeSchedule};
//! use clearwater_crypto::SecretKey;
//! use clearwater_ledger::{index, AccountRoot, Ledger, WriteMode};
//! use clearwater_tx::{
//!     ApplyParams, Transaction, TransactionEngine, TransactionType, TF_CREATE_ACCOUNT,
//! };
//! use std::sync::Arc;
//!
//! let ledger = Arc::new(Ledger::new());
//! let key = SecretKey::from_seed(&[1u8; 32]);
//! let source = key.public_key().account_id();
//! ledger.lock().write_back(
//!     WriteMode::Create,
//!     AccountRoot {
//!         index: index::account_root_index(source),
//!         account_id: source,
//!         balance: Amount::native(100_000),
//!         sequence: 0,
//!         authorized_key: None,
//!     }
//!     .into(),
//! );
//!
//! let engine = TransactionEngine::new(ledger, FeeSchedule::default());
//! let frame = Transaction {
//!     tx_type: TransactionType::Payment,
//!     source_account: source,
//!     fee: 1_000,
//!     flags: TF_CREATE_ACCOUNT,
//!     destination: Some(clearwater_common::Uint160::new([9u8; 20])),
//!     amount: Some(Amount::native(5_000)),
//!     ..Transaction::default()
//! }
//! .sign(&key);
//!
//! let result = engine.apply_transaction(&frame, ApplyParams::NONE);
//! assert!(result.is_success());
//! ```

mod apply;
mod delta;
pub mod directory;
mod frame;
mod operations;
mod result;

pub use apply::{ApplyParams, TransactionEngine};
pub use delta::{EntryAction, LedgerDelta};
pub use directory::{dir_add, dir_delete};
pub use frame::{Transaction, TransactionFrame, TransactionType, TF_CREATE_ACCOUNT};
pub use result::{ResultClass, TxResultCode};
