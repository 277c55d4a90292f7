//! Payment handler.

use crate::delta::{EntryAction, LedgerDelta};
use crate::frame::{TransactionFrame, TF_CREATE_ACCOUNT};
use crate::result::TxResultCode;
use clearwater_common::{Amount, Uint160};
use clearwater_ledger::{index, AccountRoot, LedgerState};
use tracing::debug;

/// Transfer value from the source to a destination account.
///
/// With the create flag the destination is created and funded; without it
/// the destination must exist. Only native transfers are implemented;
/// cross-currency payments would ride other accounts' offers and are
/// reserved.
pub(crate) fn do_payment(
    state: &LedgerState,
    txn: &TransactionFrame,
    delta: &mut LedgerDelta,
) -> TxResultCode {
    let source_id = txn.source_account();
    let dest_id = txn.destination().unwrap_or(Uint160::ZERO);

    if dest_id.is_zero() {
        debug!("payment: destination account not specified");
        return TxResultCode::Invalid;
    }
    if source_id == dest_id {
        debug!("payment: source account is the destination");
        return TxResultCode::Invalid;
    }

    let create = txn.flags() & TF_CREATE_ACCOUNT != 0;

    let mut currency = None;
    if let Some(tagged) = txn.currency() {
        if tagged.is_zero() {
            // The native currency is implicit, never spelled out.
            debug!("payment: native currency explicitly specified");
            return TxResultCode::ExplicitNative;
        }
        currency = Some(tagged);
    }

    match state.get_account_root(dest_id) {
        None if create && currency.is_some() => {
            debug!("payment: create may only fund the native currency");
            return TxResultCode::CreateNonNative;
        }
        None if !create => {
            debug!(destination = %dest_id, "payment: delay: destination does not exist");
            return TxResultCode::NoDestination;
        }
        None => {
            delta.push(
                EntryAction::Create,
                AccountRoot {
                    index: index::account_root_index(dest_id),
                    account_id: dest_id,
                    balance: Amount::native(0),
                    sequence: 1,
                    authorized_key: None,
                },
            );
        }
        Some(_) if create => {
            debug!(destination = %dest_id, "payment: account already created");
            return TxResultCode::AlreadyCreated;
        }
        Some(existing) => {
            delta.push(EntryAction::Modify, existing);
        }
    }

    let amount = txn.amount().unwrap_or_else(|| Amount::native(0));

    if currency.is_none() {
        let source_balance = delta.account_root(0).balance;
        if source_balance < amount {
            debug!(balance = %source_balance, %amount, "payment: delay: insufficient funds");
            return TxResultCode::Unfunded;
        }
        delta.account_root_mut(0).balance = source_balance - amount;

        let dest = delta.account_root_mut(1);
        dest.balance = dest.balance + amount;

        TxResultCode::Success
    } else {
        // Cross-currency payments need paths through offers.
        TxResultCode::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Transaction, TransactionType};
    use clearwater_crypto::SecretKey;
    use clearwater_ledger::{LedgerEntry, WriteMode};

    fn seed_account(state: &mut LedgerState, account_id: Uint160, balance: i64) {
        assert!(state.write_back(
            WriteMode::Create,
            AccountRoot {
                index: index::account_root_index(account_id),
                account_id,
                balance: Amount::native(balance),
                sequence: 0,
                authorized_key: None,
            }
            .into(),
        ));
    }

    fn stage_source(delta: &mut LedgerDelta, state: &LedgerState, account_id: Uint160) {
        delta.push(
            EntryAction::Modify,
            state.get_account_root(account_id).unwrap(),
        );
    }

    fn frame(key: &SecretKey, dest: Uint160, amount: i64, flags: u32) -> TransactionFrame {
        Transaction {
            tx_type: TransactionType::Payment,
            source_account: key.public_key().account_id(),
            fee: 100,
            flags,
            destination: Some(dest),
            amount: Some(Amount::native(amount)),
            ..Transaction::default()
        }
        .sign(key)
    }

    #[test]
    fn test_native_payment_moves_balance() {
        let key = SecretKey::from_seed(&[1; 32]);
        let source_id = key.public_key().account_id();
        let dest_id = Uint160::new([9; 20]);

        let mut state = LedgerState::default();
        seed_account(&mut state, source_id, 10_000);
        seed_account(&mut state, dest_id, 50);

        let mut delta = LedgerDelta::new();
        stage_source(&mut delta, &state, source_id);

        let result = do_payment(&state, &frame(&key, dest_id, 500, 0), &mut delta);
        assert_eq!(result, TxResultCode::Success);

        assert_eq!(delta.account_root(0).balance, Amount::native(9_500));
        assert_eq!(delta.account_root(1).balance, Amount::native(550));
    }

    #[test]
    fn test_payment_creates_destination() {
        let key = SecretKey::from_seed(&[1; 32]);
        let source_id = key.public_key().account_id();
        let dest_id = Uint160::new([9; 20]);

        let mut state = LedgerState::default();
        seed_account(&mut state, source_id, 10_000);

        let mut delta = LedgerDelta::new();
        stage_source(&mut delta, &state, source_id);

        let result = do_payment(
            &state,
            &frame(&key, dest_id, 500, TF_CREATE_ACCOUNT),
            &mut delta,
        );
        assert_eq!(result, TxResultCode::Success);

        let (action, entry) = &delta.entries()[1];
        assert_eq!(*action, EntryAction::Create);
        match entry {
            LedgerEntry::AccountRoot(dest) => {
                assert_eq!(dest.sequence, 1);
                assert_eq!(dest.balance, Amount::native(500));
            }
            other => panic!("expected account root, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_payment_missing_destination_is_delayed() {
        let key = SecretKey::from_seed(&[1; 32]);
        let source_id = key.public_key().account_id();

        let mut state = LedgerState::default();
        seed_account(&mut state, source_id, 10_000);
        let mut delta = LedgerDelta::new();
        stage_source(&mut delta, &state, source_id);

        let result = do_payment(&state, &frame(&key, Uint160::new([9; 20]), 500, 0), &mut delta);
        assert_eq!(result, TxResultCode::NoDestination);
    }

    #[test]
    fn test_payment_create_over_existing_account() {
        let key = SecretKey::from_seed(&[1; 32]);
        let source_id = key.public_key().account_id();
        let dest_id = Uint160::new([9; 20]);

        let mut state = LedgerState::default();
        seed_account(&mut state, source_id, 10_000);
        seed_account(&mut state, dest_id, 50);

        let mut delta = LedgerDelta::new();
        stage_source(&mut delta, &state, source_id);

        let result = do_payment(
            &state,
            &frame(&key, dest_id, 500, TF_CREATE_ACCOUNT),
            &mut delta,
        );
        assert_eq!(result, TxResultCode::AlreadyCreated);
    }

    #[test]
    fn test_payment_unfunded() {
        let key = SecretKey::from_seed(&[1; 32]);
        let source_id = key.public_key().account_id();
        let dest_id = Uint160::new([9; 20]);

        let mut state = LedgerState::default();
        seed_account(&mut state, source_id, 100);
        seed_account(&mut state, dest_id, 0);

        let mut delta = LedgerDelta::new();
        stage_source(&mut delta, &state, source_id);

        let result = do_payment(&state, &frame(&key, dest_id, 500, 0), &mut delta);
        assert_eq!(result, TxResultCode::Unfunded);
    }

    #[test]
    fn test_payment_to_self_is_invalid() {
        let key = SecretKey::from_seed(&[1; 32]);
        let source_id = key.public_key().account_id();

        let mut state = LedgerState::default();
        seed_account(&mut state, source_id, 10_000);
        let mut delta = LedgerDelta::new();
        stage_source(&mut delta, &state, source_id);

        let result = do_payment(&state, &frame(&key, source_id, 500, 0), &mut delta);
        assert_eq!(result, TxResultCode::Invalid);
    }

    #[test]
    fn test_payment_rejects_explicit_native_currency() {
        let key = SecretKey::from_seed(&[1; 32]);
        let source_id = key.public_key().account_id();
        let dest_id = Uint160::new([9; 20]);

        let mut state = LedgerState::default();
        seed_account(&mut state, source_id, 10_000);
        seed_account(&mut state, dest_id, 0);

        let mut delta = LedgerDelta::new();
        stage_source(&mut delta, &state, source_id);

        let txn = Transaction {
            tx_type: TransactionType::Payment,
            source_account: source_id,
            fee: 100,
            destination: Some(dest_id),
            amount: Some(Amount::native(500)),
            currency: Some(Uint160::ZERO),
            ..Transaction::default()
        }
        .sign(&key);

        assert_eq!(
            do_payment(&state, &txn, &mut delta),
            TxResultCode::ExplicitNative
        );
    }

    #[test]
    fn test_payment_create_non_native_is_rejected() {
        let key = SecretKey::from_seed(&[1; 32]);
        let source_id = key.public_key().account_id();
        let dest_id = Uint160::new([9; 20]);

        let mut state = LedgerState::default();
        seed_account(&mut state, source_id, 10_000);

        let mut delta = LedgerDelta::new();
        stage_source(&mut delta, &state, source_id);

        let usd = Uint160::new([5; 20]);
        let txn = Transaction {
            tx_type: TransactionType::Payment,
            source_account: source_id,
            fee: 100,
            flags: TF_CREATE_ACCOUNT,
            destination: Some(dest_id),
            amount: Some(Amount::new(500, usd)),
            currency: Some(usd),
            ..Transaction::default()
        }
        .sign(&key);

        assert_eq!(
            do_payment(&state, &txn, &mut delta),
            TxResultCode::CreateNonNative
        );
    }

    #[test]
    fn test_cross_currency_payment_is_reserved() {
        let key = SecretKey::from_seed(&[1; 32]);
        let source_id = key.public_key().account_id();
        let dest_id = Uint160::new([9; 20]);

        let mut state = LedgerState::default();
        seed_account(&mut state, source_id, 10_000);
        seed_account(&mut state, dest_id, 0);

        let mut delta = LedgerDelta::new();
        stage_source(&mut delta, &state, source_id);

        let usd = Uint160::new([5; 20]);
        let txn = Transaction {
            tx_type: TransactionType::Payment,
            source_account: source_id,
            fee: 100,
            destination: Some(dest_id),
            amount: Some(Amount::new(500, usd)),
            currency: Some(usd),
            ..Transaction::default()
        }
        .sign(&key);

        assert_eq!(do_payment(&state, &txn, &mut delta), TxResultCode::Unknown);
    }
}
