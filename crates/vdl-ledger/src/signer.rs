use alloy_consensus::{SignableTransaction, TxLegacy};
use alloy_primitives::{keccak256, Address, PrimitiveSignature, TxKind, U256};
use k256::ecdsa::{signature::hazmat::PrehashSigner, SigningKey, VerifyingKey};

use vdl_types::TxRef;

use crate::error::{LedgerError, LedgerResult};
use crate::tx::TxRequest;

/// A signed transaction ready for submission.
#[derive(Clone, Debug)]
pub struct SignedTx {
    /// RLP-encoded signed transaction bytes.
    pub raw: Vec<u8>,
    /// keccak256 of the raw bytes; the transaction's on-chain reference.
    pub hash: TxRef,
}

/// Signs legacy (EIP-155) transactions with the notary's account key.
pub struct NotarySigner {
    key: SigningKey,
    address: Address,
}

impl NotarySigner {
    /// Build a signer, deriving the account address from the key.
    pub fn new(key: SigningKey) -> Self {
        let address = address_of(&key);
        Self { key, address }
    }

    /// The notary's account address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign a transaction request into raw submittable bytes.
    pub fn sign(&self, tx: &TxRequest) -> LedgerResult<SignedTx> {
        let legacy = TxLegacy {
            chain_id: Some(tx.chain_id),
            nonce: tx.nonce,
            gas_price: tx.gas_price,
            gas_limit: tx.gas_limit,
            to: TxKind::Call(tx.to),
            value: tx.value,
            input: tx.data.clone().into(),
        };

        let sighash = legacy.signature_hash();
        let (sig, recovery_id) = self
            .key
            .sign_prehash(sighash.as_ref())
            .map_err(|e| LedgerError::Signing(e.to_string()))?;
        let r = U256::from_be_slice(&sig.r().to_bytes());
        let s = U256::from_be_slice(&sig.s().to_bytes());
        let signature = PrimitiveSignature::new(r, s, recovery_id.is_y_odd());

        let signed = legacy.into_signed(signature);
        let mut raw = Vec::new();
        signed.rlp_encode(&mut raw);
        let hash = keccak256(&raw);

        Ok(SignedTx {
            raw,
            hash: TxRef::from_hash(hash.0),
        })
    }
}

impl std::fmt::Debug for NotarySigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Address only; key material stays out of logs.
        f.debug_struct("NotarySigner").field("address", &self.address).finish()
    }
}

/// Ethereum address of a secp256k1 key: keccak256 of the uncompressed
/// public key (sans format byte), last 20 bytes.
fn address_of(key: &SigningKey) -> Address {
    let verifying_key = VerifyingKey::from(key);
    let public_key = verifying_key.to_encoded_point(false);
    let hash = keccak256(&public_key.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    fn request(signer: &NotarySigner) -> TxRequest {
        TxRequest {
            from: signer.address(),
            to: Address::repeat_byte(0x42),
            value: U256::ZERO,
            gas_limit: 100_000,
            gas_price: 1_100_000_000,
            nonce: 7,
            data: b"deadbeef".to_vec(),
            chain_id: 12227332,
        }
    }

    #[test]
    fn address_is_deterministic() {
        let key = SigningKey::random(&mut OsRng);
        let a = NotarySigner::new(key.clone());
        let b = NotarySigner::new(key);
        assert_eq!(a.address(), b.address());
    }

    #[test]
    fn signing_is_deterministic_for_same_request() {
        let signer = NotarySigner::new(SigningKey::random(&mut OsRng));
        let tx = request(&signer);
        let first = signer.sign(&tx).unwrap();
        let second = signer.sign(&tx).unwrap();
        // RFC 6979 deterministic nonces: identical input, identical output.
        assert_eq!(first.raw, second.raw);
        assert_eq!(first.hash, second.hash);
    }

    #[test]
    fn hash_matches_raw_bytes() {
        let signer = NotarySigner::new(SigningKey::random(&mut OsRng));
        let signed = signer.sign(&request(&signer)).unwrap();
        assert_eq!(signed.hash, TxRef::from_hash(keccak256(&signed.raw).0));
        assert!(!signed.raw.is_empty());
    }

    #[test]
    fn different_nonces_produce_different_transactions() {
        let signer = NotarySigner::new(SigningKey::random(&mut OsRng));
        let mut tx = request(&signer);
        let first = signer.sign(&tx).unwrap();
        tx.nonce += 1;
        let second = signer.sign(&tx).unwrap();
        assert_ne!(first.hash, second.hash);
    }

    #[test]
    fn debug_omits_key_material() {
        let signer = NotarySigner::new(SigningKey::random(&mut OsRng));
        let debug = format!("{signer:?}");
        assert!(debug.contains("address"));
        assert!(!debug.to_lowercase().contains("key"));
    }
}
