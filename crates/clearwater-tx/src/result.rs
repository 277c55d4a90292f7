//! Transaction result codes.
//!
//! Every apply returns exactly one [`TxResultCode`]. Codes fall into three
//! behavioral classes (see [`ResultClass`]): terminal success, retryable
//! failures that may clear in a later ledger, and malformed transactions
//! that can never succeed as submitted and should be dropped.

/// Behavioral class of a result code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultClass {
    /// Mutations were committed.
    Success,
    /// The transaction may succeed in a later ledger; queue, don't drop.
    Retry,
    /// The transaction is structurally or semantically invalid; drop it.
    Malformed,
}

/// Result of applying a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxResultCode {
    /// The transaction was applied and committed.
    Success,

    // Retryable failures.
    /// Source account does not exist yet.
    NoAccount,
    /// Destination account does not exist yet.
    NoDestination,
    /// Setting an absent credit line to a zero limit is a no-op.
    NoLineZeroLimit,
    /// Source balance cannot cover the fee.
    InsufficientFeeBalance,
    /// Sequence is in the future.
    PreSeq,
    /// Sequence is in the past.
    PastSeq,
    /// This exact transaction is already in the ledger.
    AlreadyApplied,
    /// Directory page does not exist.
    NodeNotFound,
    /// Key is not present on the named directory page.
    NodeNotMentioned,
    /// Directory root is missing.
    NodeNoRoot,
    /// Account already has an authorized key.
    AlreadyClaimed,
    /// Destination account already exists.
    AlreadyCreated,
    /// Source balance cannot cover the transfer.
    Unfunded,
    /// Directory page numbers are exhausted.
    DirectoryFull,

    // Malformed transactions.
    /// Structurally or semantically invalid.
    Invalid,
    /// Unknown or unimplemented transaction type.
    Unknown,
    /// Fee is below the schedule, or present where none is allowed.
    InsufficientFeePaid,
    /// Destination account not specified.
    DestinationNeeded,
    /// Destination account is the source.
    DestinationIsSource,
    /// Native currency must be implicit, never spelled out.
    ExplicitNative,
    /// Account creation can only fund the native currency.
    CreateNonNative,
    /// Generator is already bound to another account.
    GeneratorInUse,
    /// Proposed transit terms are worse than the standing ones.
    TransitWorse,
}

impl TxResultCode {
    /// The behavioral class of this code.
    pub fn class(self) -> ResultClass {
        use TxResultCode::*;
        match self {
            Success => ResultClass::Success,
            NoAccount | NoDestination | NoLineZeroLimit | InsufficientFeeBalance | PreSeq
            | PastSeq | AlreadyApplied | NodeNotFound | NodeNotMentioned | NodeNoRoot
            | AlreadyClaimed | AlreadyCreated | Unfunded | DirectoryFull => ResultClass::Retry,
            Invalid | Unknown | InsufficientFeePaid | DestinationNeeded | DestinationIsSource
            | ExplicitNative | CreateNonNative | GeneratorInUse | TransitWorse => {
                ResultClass::Malformed
            }
        }
    }

    /// Whether mutations were committed.
    pub fn is_success(self) -> bool {
        self == TxResultCode::Success
    }

    /// Whether the transaction can never succeed as submitted.
    pub fn is_malformed(self) -> bool {
        self.class() == ResultClass::Malformed
    }

    /// Whether the transaction may succeed in a later ledger.
    pub fn is_retry(self) -> bool {
        self.class() == ResultClass::Retry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classes() {
        assert!(TxResultCode::Success.is_success());
        assert!(!TxResultCode::Success.is_malformed());

        assert!(TxResultCode::NoAccount.is_retry());
        assert!(TxResultCode::PastSeq.is_retry());
        assert!(TxResultCode::DirectoryFull.is_retry());

        assert!(TxResultCode::Invalid.is_malformed());
        assert!(TxResultCode::InsufficientFeePaid.is_malformed());
        assert!(TxResultCode::GeneratorInUse.is_malformed());
    }

    #[test]
    fn test_retry_is_not_success() {
        assert!(!TxResultCode::PreSeq.is_success());
        assert!(!TxResultCode::PreSeq.is_malformed());
        assert_eq!(TxResultCode::PreSeq.class(), ResultClass::Retry);
    }
}
