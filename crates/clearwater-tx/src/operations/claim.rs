//! Claim handler: first use of an account binds it to an authorized key.

use crate::delta::{EntryAction, LedgerDelta};
use crate::frame::TransactionFrame;
use crate::result::TxResultCode;
use clearwater_crypto::{sha512_half, PublicKey, Signature};
use clearwater_ledger::{index, GeneratorMap, LedgerState};
use tracing::debug;

/// Claim an unclaimed account: install its authorized key and register
/// the generator that backs it.
///
/// The transaction must be signed by the account's own key, carry the
/// encrypted generator blob, and prove control of the generator key by a
/// signature over the blob's digest. A generator may back at most one
/// account.
pub(crate) fn do_claim(
    state: &LedgerState,
    txn: &TransactionFrame,
    delta: &mut LedgerDelta,
) -> TxResultCode {
    let signer_id = txn.signing_pub_key().account_id();
    if signer_id != txn.source_account() {
        debug!(
            signer = %signer_id,
            source = %txn.source_account(),
            "claim: signing key is not the source account's key"
        );
        return TxResultCode::Invalid;
    }

    if delta.account_root(0).authorized_key.is_some() {
        debug!("claim: source already claimed");
        return TxResultCode::AlreadyClaimed;
    }

    let (Some(cipher), Some(pub_key), Some(signature)) = (
        txn.generator_cipher(),
        txn.claim_pub_key(),
        txn.claim_signature(),
    ) else {
        debug!("claim: missing claim fields");
        return TxResultCode::Invalid;
    };

    // The claim must prove control of the generator key: a signature over
    // the cipher digest under the carried public key.
    let Ok(account_public) = PublicKey::from_slice(pub_key) else {
        debug!("claim: malformed public key");
        return TxResultCode::Invalid;
    };
    let Ok(signature) = Signature::from_slice(signature) else {
        debug!("claim: malformed signature");
        return TxResultCode::Invalid;
    };
    let digest = sha512_half(cipher);
    if account_public.verify(digest.as_bytes(), &signature).is_err() {
        debug!("claim: bad signature, unauthorized claim");
        return TxResultCode::Invalid;
    }

    let generator_id = account_public.account_id();
    if state.get_generator(generator_id).is_some() {
        // One wallet per passphrase.
        debug!(generator = %generator_id, "claim: generator already in use");
        return TxResultCode::GeneratorInUse;
    }

    delta.account_root_mut(0).authorized_key = Some(generator_id);
    delta.push(
        EntryAction::Create,
        GeneratorMap {
            index: index::generator_index(generator_id),
            generator_id,
            generator: cipher.to_vec(),
        },
    );

    TxResultCode::Success
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{Transaction, TransactionType};
    use clearwater_common::Amount;
    use clearwater_crypto::SecretKey;
    use clearwater_ledger::AccountRoot;

    fn staged_source(delta: &mut LedgerDelta, key: &SecretKey) {
        let account_id = key.public_key().account_id();
        delta.push(
            EntryAction::Modify,
            AccountRoot {
                index: index::account_root_index(account_id),
                account_id,
                balance: Amount::native(1_000),
                sequence: 0,
                authorized_key: None,
            },
        );
    }

    fn claim_frame(key: &SecretKey, cipher: &[u8]) -> TransactionFrame {
        let digest = sha512_half(cipher);
        Transaction {
            tx_type: TransactionType::Claim,
            source_account: key.public_key().account_id(),
            generator_cipher: Some(cipher.to_vec()),
            claim_pub_key: Some(key.public_key().as_bytes().to_vec()),
            claim_signature: Some(key.sign(digest.as_bytes()).as_bytes().to_vec()),
            ..Transaction::default()
        }
        .sign(key)
    }

    #[test]
    fn test_claim_installs_key_and_generator() {
        let key = SecretKey::from_seed(&[1; 32]);
        let state = LedgerState::default();
        let mut delta = LedgerDelta::new();
        staged_source(&mut delta, &key);

        let frame = claim_frame(&key, b"cipher blob");
        assert_eq!(do_claim(&state, &frame, &mut delta), TxResultCode::Success);

        let expected_generator = key.public_key().account_id();
        assert_eq!(
            delta.account_root(0).authorized_key,
            Some(expected_generator)
        );
        // Entry 1 is the generator registration.
        assert_eq!(delta.len(), 2);
    }

    #[test]
    fn test_claim_rejects_foreign_signer() {
        let key = SecretKey::from_seed(&[1; 32]);
        let other = SecretKey::from_seed(&[2; 32]);
        let state = LedgerState::default();
        let mut delta = LedgerDelta::new();
        staged_source(&mut delta, &key);

        // Signed by `other`, naming `key`'s account as source.
        let digest = sha512_half(b"cipher");
        let frame = Transaction {
            tx_type: TransactionType::Claim,
            source_account: key.public_key().account_id(),
            generator_cipher: Some(b"cipher".to_vec()),
            claim_pub_key: Some(other.public_key().as_bytes().to_vec()),
            claim_signature: Some(other.sign(digest.as_bytes()).as_bytes().to_vec()),
            ..Transaction::default()
        }
        .sign(&other);

        assert_eq!(do_claim(&state, &frame, &mut delta), TxResultCode::Invalid);
    }

    #[test]
    fn test_claim_rejects_already_claimed() {
        let key = SecretKey::from_seed(&[1; 32]);
        let state = LedgerState::default();
        let mut delta = LedgerDelta::new();
        staged_source(&mut delta, &key);
        delta.account_root_mut(0).authorized_key = Some(key.public_key().account_id());

        let frame = claim_frame(&key, b"cipher");
        assert_eq!(
            do_claim(&state, &frame, &mut delta),
            TxResultCode::AlreadyClaimed
        );
    }

    #[test]
    fn test_claim_rejects_bad_proof() {
        let key = SecretKey::from_seed(&[1; 32]);
        let state = LedgerState::default();
        let mut delta = LedgerDelta::new();
        staged_source(&mut delta, &key);

        // Proof signed over the wrong cipher.
        let wrong_digest = sha512_half(b"other blob");
        let frame = Transaction {
            tx_type: TransactionType::Claim,
            source_account: key.public_key().account_id(),
            generator_cipher: Some(b"cipher".to_vec()),
            claim_pub_key: Some(key.public_key().as_bytes().to_vec()),
            claim_signature: Some(key.sign(wrong_digest.as_bytes()).as_bytes().to_vec()),
            ..Transaction::default()
        }
        .sign(&key);

        assert_eq!(do_claim(&state, &frame, &mut delta), TxResultCode::Invalid);
    }

    #[test]
    fn test_claim_rejects_generator_in_use() {
        let key = SecretKey::from_seed(&[1; 32]);
        let mut state = LedgerState::default();
        let mut delta = LedgerDelta::new();
        staged_source(&mut delta, &key);

        // Same generator already registered.
        let generator_id = key.public_key().account_id();
        assert!(state.write_back(
            clearwater_ledger::WriteMode::Create,
            GeneratorMap {
                index: index::generator_index(generator_id),
                generator_id,
                generator: b"elsewhere".to_vec(),
            }
            .into(),
        ));

        let frame = claim_frame(&key, b"cipher");
        assert_eq!(
            do_claim(&state, &frame, &mut delta),
            TxResultCode::GeneratorInUse
        );
    }
}
