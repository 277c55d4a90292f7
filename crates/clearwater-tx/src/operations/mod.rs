//! Per-transaction-type handlers.
//!
//! The validator stages the fee-debited source account as delta entry 0
//! and then dispatches here. Each handler reads further entries through
//! the store, appends staged mutations, and returns a single result code;
//! the first non-success code aborts the transaction.

use crate::delta::LedgerDelta;
use crate::frame::{TransactionFrame, TransactionType};
use crate::result::TxResultCode;
use clearwater_ledger::LedgerState;
use tracing::debug;

mod claim;
mod credit_set;
mod payment;

pub(crate) use claim::do_claim;
pub(crate) use credit_set::do_credit_set;
pub(crate) use payment::do_payment;

/// Route a validated transaction to its handler.
pub(crate) fn dispatch(
    state: &LedgerState,
    txn: &TransactionFrame,
    delta: &mut LedgerDelta,
) -> TxResultCode {
    match txn.tx_type() {
        TransactionType::Claim => do_claim(state, txn, delta),
        TransactionType::CreditSet => do_credit_set(state, txn, delta),
        TransactionType::Payment => do_payment(state, txn, delta),
        TransactionType::Invoice => do_invoice(state, txn, delta),
        TransactionType::Offer => do_offer(state, txn, delta),
        TransactionType::TransitSet => do_transit_set(state, txn, delta),
        TransactionType::Invalid => {
            debug!("dispatch: invalid transaction type");
            TxResultCode::Invalid
        }
        _ => TxResultCode::Unknown,
    }
}

// Reserved handlers. The types and their result codes are part of the
// interface; the bodies are not implemented.

fn do_invoice(
    _state: &LedgerState,
    _txn: &TransactionFrame,
    _delta: &mut LedgerDelta,
) -> TxResultCode {
    TxResultCode::Unknown
}

fn do_offer(
    _state: &LedgerState,
    _txn: &TransactionFrame,
    _delta: &mut LedgerDelta,
) -> TxResultCode {
    TxResultCode::Unknown
}

fn do_transit_set(
    _state: &LedgerState,
    _txn: &TransactionFrame,
    _delta: &mut LedgerDelta,
) -> TxResultCode {
    // The transit rule set (better-than-current, better-than-next, overlap
    // detection) is unspecified; reject until it is.
    debug!("transit_set: not implemented");
    TxResultCode::Invalid
}
