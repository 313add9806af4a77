use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use vdl_types::TxRef;

/// An unsigned transaction carrying a document digest as calldata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxRequest {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub gas_limit: u64,
    pub gas_price: u128,
    pub nonce: u64,
    /// Payload data; for notarization, the digest's 64-char hex as bytes.
    pub data: Vec<u8>,
    pub chain_id: u64,
}

/// Final status of a mined transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub tx_ref: TxRef,
    /// 1 = success, 0 = failure.
    pub status: u64,
    pub block_number: Option<u64>,
}

impl TxReceipt {
    /// Status code for a successful transaction.
    pub const STATUS_SUCCESS: u64 = 1;
    /// Status code for a failed transaction.
    pub const STATUS_FAILURE: u64 = 0;

    /// Returns `true` if the transaction executed successfully.
    pub fn is_success(&self) -> bool {
        self.status == Self::STATUS_SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_predicates() {
        let ok = TxReceipt {
            tx_ref: TxRef::from_hash([1u8; 32]),
            status: TxReceipt::STATUS_SUCCESS,
            block_number: Some(10),
        };
        let failed = TxReceipt {
            status: TxReceipt::STATUS_FAILURE,
            ..ok.clone()
        };
        assert!(ok.is_success());
        assert!(!failed.is_success());
    }
}
