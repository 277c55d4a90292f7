//! Credit-line handler.

use crate::delta::{EntryAction, LedgerDelta};
use crate::directory::dir_add;
use crate::frame::TransactionFrame;
use crate::result::TxResultCode;
use clearwater_common::Amount;
use clearwater_ledger::{index, EntryKind, LedgerState, RippleState};
use tracing::debug;

/// Establish or update the source's side of a credit line.
///
/// A line is one [`RippleState`] entry shared by both accounts, stored
/// under the canonical low/high ordering; the transactor's side is derived
/// from the ordering. The first time a side sets a limit, the line is
/// added to that account's line directory so clients can walk who the
/// account has extended credit to.
pub(crate) fn do_credit_set(
    state: &LedgerState,
    txn: &TransactionFrame,
    delta: &mut LedgerDelta,
) -> TxResultCode {
    let source_id = txn.source_account();

    let Some(dest_id) = txn.destination().filter(|dest| !dest.is_zero()) else {
        debug!("credit_set: destination account not specified");
        return TxResultCode::DestinationNeeded;
    };
    if source_id == dest_id {
        debug!("credit_set: source account is the destination");
        return TxResultCode::DestinationIsSource;
    }

    if state.get_account_root(dest_id).is_none() {
        debug!(destination = %dest_id, "credit_set: delay: destination does not exist");
        return TxResultCode::NoDestination;
    }

    let limit = txn.limit_amount().unwrap_or_default();
    let currency = limit.currency();
    let low_is_source = source_id < dest_id;
    let side_flag = if low_is_source {
        RippleState::FLAG_LOW_INDEXED
    } else {
        RippleState::FLAG_HIGH_INDEXED
    };

    let add_index;
    let line_index;

    match state.get_ripple_state(source_id, dest_id, currency) {
        Some(mut line) => {
            debug!(index = %line.index, "credit_set: modifying credit line");
            add_index = line.flags & side_flag == 0;

            // Each side updates only its own limit; the counterparty's
            // limit and the line balance are never touched here.
            if low_is_source {
                line.low_limit = limit;
            } else {
                line.high_limit = limit;
            }
            if add_index {
                line.flags |= side_flag;
            }

            line_index = line.index;
            delta.push(EntryAction::Modify, line);
        }
        None if limit.is_zero() => {
            debug!("credit_set: setting absent credit line to zero");
            return TxResultCode::NoLineZeroLimit;
        }
        None => {
            let (low_id, high_id) = if low_is_source {
                (source_id, dest_id)
            } else {
                (dest_id, source_id)
            };
            line_index = index::ripple_state_index(source_id, dest_id, currency);
            debug!(index = %line_index, "credit_set: creating credit line");

            add_index = true;
            delta.push(
                EntryAction::Create,
                RippleState {
                    index: line_index,
                    balance: Amount::zero(currency),
                    low_limit: if low_is_source {
                        limit
                    } else {
                        Amount::zero(currency)
                    },
                    high_limit: if low_is_source {
                        Amount::zero(currency)
                    } else {
                        limit
                    },
                    low_id,
                    high_id,
                    flags: side_flag,
                },
            );
        }
    }

    if add_index {
        // List the line in the source's line directory. The page number is
        // not recorded: line directories are never unwound.
        if let Err(code) = dir_add(
            state,
            delta,
            EntryKind::RippleState,
            source_id.extend(),
            line_index,
        ) {
            return code;
        }
    }

    TxResultCode::Success
}
