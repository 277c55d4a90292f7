//! Transaction frame.
//!
//! [`Transaction`] is the plain field set a submitter fills in;
//! [`TransactionFrame`] is a signed transaction with its signing key,
//! signature, and id bound. The frame's byte serialization is the local
//! stand-in for the external wire codec: it exists so that signatures and
//! transaction ids have deterministic material to bind to, and is what the
//! ledger's transaction log records.

use clearwater_common::{Amount, Uint160, Uint256};
use clearwater_crypto::{sha512_half, PublicKey, SecretKey, Signature};

/// Transaction type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum TransactionType {
    #[default]
    Invalid = 0,
    Claim = 1,
    Payment = 2,
    Invoice = 3,
    Offer = 4,
    CreditSet = 5,
    TransitSet = 6,
    Take = 7,
    Cancel = 8,
    Store = 9,
    Delete = 10,
}

impl TransactionType {
    /// The tag byte used in serialization.
    pub fn tag(self) -> u8 {
        self as u8
    }
}

/// Payment flag: create the destination account.
pub const TF_CREATE_ACCOUNT: u32 = 0x0001_0000;

/// The unsigned field set of a transaction.
///
/// Optional fields are present only for the transaction types that use
/// them; handlers reject transactions missing the fields they need.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transaction {
    pub tx_type: TransactionType,
    pub source_account: Uint160,
    /// Fee offered, in native currency units.
    pub fee: i64,
    pub sequence: u32,
    pub flags: u32,
    pub destination: Option<Uint160>,
    pub amount: Option<Amount>,
    pub currency: Option<Uint160>,
    pub limit_amount: Option<Amount>,
    /// Encrypted generator blob (claim).
    pub generator_cipher: Option<Vec<u8>>,
    /// Raw public key authorizing the claim.
    pub claim_pub_key: Option<Vec<u8>>,
    /// Signature over the cipher digest under the claim key.
    pub claim_signature: Option<Vec<u8>>,
}

impl Transaction {
    /// Deterministic serialization of the fields, without key or signature.
    fn payload_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.push(self.tx_type.tag());
        buf.extend_from_slice(self.source_account.as_bytes());
        buf.extend_from_slice(&self.fee.to_be_bytes());
        buf.extend_from_slice(&self.sequence.to_be_bytes());
        buf.extend_from_slice(&self.flags.to_be_bytes());
        push_opt_id(&mut buf, self.destination.as_ref());
        push_opt_amount(&mut buf, self.amount.as_ref());
        push_opt_id(&mut buf, self.currency.as_ref());
        push_opt_amount(&mut buf, self.limit_amount.as_ref());
        push_opt_blob(&mut buf, self.generator_cipher.as_deref());
        push_opt_blob(&mut buf, self.claim_pub_key.as_deref());
        push_opt_blob(&mut buf, self.claim_signature.as_deref());
        buf
    }

    /// Sign with `key`, producing a sealed frame.
    ///
    /// The signing public key becomes part of the signed material, so a
    /// frame cannot be re-attributed to a different key.
    pub fn sign(self, key: &SecretKey) -> TransactionFrame {
        let signing_pub_key = key.public_key();
        let mut material = self.payload_bytes();
        material.extend_from_slice(signing_pub_key.as_bytes());
        let signing_hash = sha512_half(&material);
        let signature = key.sign(signing_hash.as_bytes());
        TransactionFrame::assemble(self, signing_pub_key, signature)
    }
}

fn push_opt_id(buf: &mut Vec<u8>, id: Option<&Uint160>) {
    match id {
        Some(id) => {
            buf.push(1);
            buf.extend_from_slice(id.as_bytes());
        }
        None => buf.push(0),
    }
}

fn push_opt_amount(buf: &mut Vec<u8>, amount: Option<&Amount>) {
    match amount {
        Some(amount) => {
            buf.push(1);
            buf.extend_from_slice(&amount.value().to_be_bytes());
            buf.extend_from_slice(amount.currency().as_bytes());
        }
        None => buf.push(0),
    }
}

fn push_opt_blob(buf: &mut Vec<u8>, blob: Option<&[u8]>) {
    match blob {
        Some(blob) => {
            buf.push(1);
            buf.extend_from_slice(&(blob.len() as u32).to_be_bytes());
            buf.extend_from_slice(blob);
        }
        None => buf.push(0),
    }
}

/// A signed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionFrame {
    tx: Transaction,
    signing_pub_key: PublicKey,
    signature: Signature,
    txid: Uint256,
}

impl TransactionFrame {
    fn assemble(tx: Transaction, signing_pub_key: PublicKey, signature: Signature) -> Self {
        let mut frame = Self {
            tx,
            signing_pub_key,
            signature,
            txid: Uint256::ZERO,
        };
        frame.txid = sha512_half(&frame.to_bytes());
        frame
    }

    /// The transaction id: the digest of the full signed serialization.
    pub fn txid(&self) -> Uint256 {
        self.txid
    }

    /// Full serialization: payload, signing key, signature.
    ///
    /// This is what the ledger's transaction log records.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = self.tx.payload_bytes();
        buf.extend_from_slice(self.signing_pub_key.as_bytes());
        buf.extend_from_slice(self.signature.as_bytes());
        buf
    }

    /// The digest the signature covers: payload plus signing key.
    pub fn signing_hash(&self) -> Uint256 {
        let mut material = self.tx.payload_bytes();
        material.extend_from_slice(self.signing_pub_key.as_bytes());
        sha512_half(&material)
    }

    /// Verify the frame's signature under its carried signing key.
    pub fn check_sign(&self) -> bool {
        self.signing_pub_key
            .verify(self.signing_hash().as_bytes(), &self.signature)
            .is_ok()
    }

    /// The signing public key carried by the transaction.
    pub fn signing_pub_key(&self) -> &PublicKey {
        &self.signing_pub_key
    }

    pub fn tx_type(&self) -> TransactionType {
        self.tx.tx_type
    }

    pub fn source_account(&self) -> Uint160 {
        self.tx.source_account
    }

    /// Fee offered, in native currency units.
    pub fn fee(&self) -> i64 {
        self.tx.fee
    }

    pub fn sequence(&self) -> u32 {
        self.tx.sequence
    }

    pub fn flags(&self) -> u32 {
        self.tx.flags
    }

    pub fn destination(&self) -> Option<Uint160> {
        self.tx.destination
    }

    pub fn amount(&self) -> Option<Amount> {
        self.tx.amount
    }

    pub fn currency(&self) -> Option<Uint160> {
        self.tx.currency
    }

    pub fn limit_amount(&self) -> Option<Amount> {
        self.tx.limit_amount
    }

    pub fn generator_cipher(&self) -> Option<&[u8]> {
        self.tx.generator_cipher.as_deref()
    }

    pub fn claim_pub_key(&self) -> Option<&[u8]> {
        self.tx.claim_pub_key.as_deref()
    }

    pub fn claim_signature(&self) -> Option<&[u8]> {
        self.tx.claim_signature.as_deref()
    }

    /// Flip a signature bit, invalidating the frame.
    #[cfg(test)]
    pub(crate) fn tamper_signature(mut self) -> Self {
        self.signature.0[0] ^= 0x01;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment(seed: u8) -> TransactionFrame {
        let key = SecretKey::from_seed(&[seed; 32]);
        Transaction {
            tx_type: TransactionType::Payment,
            source_account: key.public_key().account_id(),
            fee: 100,
            sequence: 3,
            destination: Some(Uint160::new([9; 20])),
            amount: Some(Amount::native(500)),
            ..Transaction::default()
        }
        .sign(&key)
    }

    #[test]
    fn test_sign_and_verify() {
        let frame = payment(1);
        assert!(frame.check_sign());
        assert!(!frame.txid().is_zero());
    }

    #[test]
    fn test_tampered_signature_fails() {
        let frame = payment(1).tamper_signature();
        assert!(!frame.check_sign());
    }

    #[test]
    fn test_txid_is_deterministic() {
        assert_eq!(payment(1).txid(), payment(1).txid());
        assert_ne!(payment(1).txid(), payment(2).txid());
    }

    #[test]
    fn test_txid_covers_every_field() {
        let key = SecretKey::from_seed(&[1; 32]);
        let base = Transaction {
            tx_type: TransactionType::Payment,
            source_account: key.public_key().account_id(),
            fee: 100,
            sequence: 3,
            destination: Some(Uint160::new([9; 20])),
            amount: Some(Amount::native(500)),
            ..Transaction::default()
        };

        let mut other = base.clone();
        other.amount = Some(Amount::native(501));
        assert_ne!(base.clone().sign(&key).txid(), other.sign(&key).txid());

        let mut other = base.clone();
        other.sequence = 4;
        assert_ne!(base.clone().sign(&key).txid(), other.sign(&key).txid());
    }

    #[test]
    fn test_optional_fields_round_into_payload() {
        let key = SecretKey::from_seed(&[1; 32]);
        let with_cipher = Transaction {
            tx_type: TransactionType::Claim,
            source_account: key.public_key().account_id(),
            generator_cipher: Some(vec![1, 2, 3]),
            ..Transaction::default()
        };
        let without = Transaction {
            tx_type: TransactionType::Claim,
            source_account: key.public_key().account_id(),
            ..Transaction::default()
        };
        assert_ne!(
            with_cipher.sign(&key).txid(),
            without.sign(&key).txid()
        );
    }
}
