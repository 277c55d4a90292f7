//! Transaction application.
//!
//! [`TransactionEngine::apply_transaction`] is the single entry point: it
//! validates a signed frame against the current ledger state, dispatches
//! to the type handler, and commits the staged mutations on success. The
//! entire call runs under the ledger's apply lock; reads see committed
//! state only, and nothing touches the store until commit.

use crate::delta::{EntryAction, LedgerDelta};
use crate::frame::{TransactionFrame, TransactionType, TF_CREATE_ACCOUNT};
use crate::operations;
use crate::result::TxResultCode;
use clearwater_common::{Amount, FeeSchedule};
use clearwater_ledger::Ledger;
use std::ops::BitOr;
use std::sync::Arc;
use tracing::debug;

/// Flags modifying one apply call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApplyParams(u32);

impl ApplyParams {
    /// No special handling.
    pub const NONE: ApplyParams = ApplyParams(0);
    /// Skip fee enforcement; used for replay and validation scenarios.
    pub const NO_CHECK_FEE: ApplyParams = ApplyParams(0x0001);

    /// Whether every flag in `flags` is set.
    pub fn contains(self, flags: ApplyParams) -> bool {
        self.0 & flags.0 == flags.0
    }
}

impl BitOr for ApplyParams {
    type Output = ApplyParams;

    fn bitor(self, rhs: ApplyParams) -> ApplyParams {
        ApplyParams(self.0 | rhs.0)
    }
}

/// The state-transition engine for one ledger.
pub struct TransactionEngine {
    ledger: Arc<Ledger>,
    fees: FeeSchedule,
}

impl TransactionEngine {
    /// Create an engine applying to `ledger` under `fees`.
    pub fn new(ledger: Arc<Ledger>, fees: FeeSchedule) -> Self {
        Self { ledger, fees }
    }

    /// The ledger this engine applies to.
    pub fn ledger(&self) -> &Arc<Ledger> {
        &self.ledger
    }

    /// Apply one transaction.
    ///
    /// Returns exactly one result code. On [`TxResultCode::Success`] the
    /// staged mutations are committed and the transaction is appended to
    /// the ledger's transaction log; on any other code the store is left
    /// bit-identical to its pre-call state.
    pub fn apply_transaction(
        &self,
        txn: &TransactionFrame,
        params: ApplyParams,
    ) -> TxResultCode {
        let txid = txn.txid();
        if txid.is_zero() {
            debug!("apply: invalid transaction id");
            return TxResultCode::Invalid;
        }

        // The carried signing key lets us verify the signature without
        // touching the store; whether that key may act for the source
        // account is the handlers' concern.
        if !txn.check_sign() {
            debug!(txid = %txid, "apply: bad signature");
            return TxResultCode::Invalid;
        }

        let cost = match txn.tx_type() {
            TransactionType::Claim => 0,
            TransactionType::Payment => {
                if txn.flags() & TF_CREATE_ACCOUNT != 0 {
                    self.fees.fee_create
                } else {
                    self.fees.fee_default
                }
            }
            TransactionType::Invoice
            | TransactionType::Offer
            | TransactionType::CreditSet
            | TransactionType::TransitSet => self.fees.fee_default,
            TransactionType::Invalid => {
                debug!("apply: invalid transaction type");
                return TxResultCode::Invalid;
            }
            _ => {
                debug!(tx_type = ?txn.tx_type(), "apply: unknown transaction type");
                return TxResultCode::Unknown;
            }
        };

        let paid = txn.fee();
        if !params.contains(ApplyParams::NO_CHECK_FEE) {
            if cost > 0 {
                if paid < cost {
                    debug!(paid, cost, "apply: insufficient fee");
                    return TxResultCode::InsufficientFeePaid;
                }
            } else if paid != 0 {
                debug!(paid, "apply: fee not allowed");
                return TxResultCode::InsufficientFeePaid;
            }
        }

        let source_id = txn.source_account();
        if source_id.is_zero() {
            debug!("apply: bad source id");
            return TxResultCode::Invalid;
        }

        let mut state = self.ledger.lock();

        let Some(mut source) = state.get_account_root(source_id) else {
            debug!(source = %source_id, "apply: delay: source account does not exist");
            return TxResultCode::NoAccount;
        };

        // Deduct the fee in the staged copy so it is not spendable during
        // the transaction; the store only sees it if the apply succeeds.
        if cost > 0 {
            let fee = Amount::native(paid);
            if source.balance < fee {
                debug!(
                    balance = %source.balance,
                    paid,
                    "apply: delay: insufficient balance for fee"
                );
                return TxResultCode::InsufficientFeeBalance;
            }
            source.balance = source.balance - fee;
        }

        let tx_seq = txn.sequence();
        if cost > 0 {
            let account_seq = source.sequence;
            if tx_seq != account_seq {
                if account_seq < tx_seq {
                    debug!(tx_seq, account_seq, "apply: future sequence number");
                    return TxResultCode::PreSeq;
                }
                if state.has_transaction(txid) {
                    debug!(txid = %txid, "apply: transaction already applied");
                    return TxResultCode::AlreadyApplied;
                }
                debug!(tx_seq, account_seq, "apply: past sequence number");
                return TxResultCode::PastSeq;
            }
            source.sequence = tx_seq + 1;
        } else if tx_seq != 0 {
            debug!(tx_seq, "apply: sequence must be zero for free transactions");
            return TxResultCode::PastSeq;
        }

        let mut delta = LedgerDelta::new();
        delta.push(EntryAction::Modify, source);

        let result = operations::dispatch(&state, txn, &mut delta);

        if result.is_success() {
            delta.commit(&mut state);
            state.add_transaction(txid, txn.to_bytes(), paid);
        }

        result
    }
}
