use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use alloy_primitives::{keccak256, Address};
use async_trait::async_trait;

use vdl_types::TxRef;

use crate::error::{LedgerError, LedgerResult};
use crate::traits::LedgerClient;
use crate::tx::{TxReceipt, TxRequest};

/// In-memory ledger for tests and embedding.
///
/// Behaves as a single-node chain that mines instantly: a submitted
/// transaction's receipt is available on the next lookup. Failure modes
/// (connect, estimate, submit, receipt lookup) and the mined status are
/// configurable so workflows can be driven into every terminal state.
pub struct InMemoryLedger {
    state: Mutex<LedgerState>,
    gas_price: u128,
    mined_status: u64,
    fail_connect: bool,
    fail_estimate: bool,
    fail_submit: bool,
    fail_receipt_lookup: bool,
    withhold_receipts: bool,
    receipt_lookups: AtomicU64,
}

#[derive(Default)]
struct LedgerState {
    submitted: Vec<Vec<u8>>,
    receipts: HashMap<TxRef, TxReceipt>,
}

impl InMemoryLedger {
    /// A ledger that confirms every submitted transaction.
    pub fn confirming() -> Self {
        Self {
            state: Mutex::new(LedgerState::default()),
            gas_price: 1_000_000_000,
            mined_status: TxReceipt::STATUS_SUCCESS,
            fail_connect: false,
            fail_estimate: false,
            fail_submit: false,
            fail_receipt_lookup: false,
            withhold_receipts: false,
            receipt_lookups: AtomicU64::new(0),
        }
    }

    /// Mine transactions with a failed status.
    pub fn with_failed_status(mut self) -> Self {
        self.mined_status = TxReceipt::STATUS_FAILURE;
        self
    }

    /// Reject gas estimation.
    pub fn with_estimate_failure(mut self) -> Self {
        self.fail_estimate = true;
        self
    }

    /// Reject submissions.
    pub fn with_submit_failure(mut self) -> Self {
        self.fail_submit = true;
        self
    }

    /// Refuse connections.
    pub fn with_connect_failure(mut self) -> Self {
        self.fail_connect = true;
        self
    }

    /// Error on every receipt lookup.
    pub fn with_receipt_lookup_failure(mut self) -> Self {
        self.fail_receipt_lookup = true;
        self
    }

    /// Never produce receipts (forces polling to time out).
    pub fn with_withheld_receipts(mut self) -> Self {
        self.withhold_receipts = true;
        self
    }

    /// Override the base gas price.
    pub fn with_gas_price(mut self, gas_price: u128) -> Self {
        self.gas_price = gas_price;
        self
    }

    /// Number of raw transactions submitted so far.
    pub fn submitted_count(&self) -> usize {
        self.state.lock().expect("ledger state poisoned").submitted.len()
    }

    /// Number of receipt lookups performed so far.
    pub fn receipt_lookups(&self) -> u64 {
        self.receipt_lookups.load(Ordering::SeqCst)
    }

    /// Insert a receipt directly (for verification tests against known refs).
    pub fn insert_receipt(&self, receipt: TxReceipt) {
        self.state
            .lock()
            .expect("ledger state poisoned")
            .receipts
            .insert(receipt.tx_ref, receipt);
    }
}

#[async_trait]
impl LedgerClient for InMemoryLedger {
    async fn ensure_connected(&self) -> LedgerResult<()> {
        if self.fail_connect {
            return Err(LedgerError::ConnectionFailed("in-memory ledger offline".into()));
        }
        Ok(())
    }

    async fn gas_price(&self) -> LedgerResult<u128> {
        Ok(self.gas_price)
    }

    async fn nonce_for(&self, _address: Address) -> LedgerResult<u64> {
        // Single funded account: the pending nonce advances with every
        // accepted submission, so resubmitting the same payload still
        // produces a distinct transaction.
        let state = self.state.lock().expect("ledger state poisoned");
        Ok(state.submitted.len() as u64)
    }

    async fn estimate_gas(&self, _tx: &TxRequest) -> LedgerResult<u64> {
        if self.fail_estimate {
            return Err(LedgerError::TransactionWouldFail("execution reverted".into()));
        }
        Ok(21_000 + 68 * 64)
    }

    async fn submit(&self, raw_tx: &[u8]) -> LedgerResult<TxRef> {
        if self.fail_submit {
            return Err(LedgerError::SubmissionFailed("nonce too low".into()));
        }
        let tx_ref = TxRef::from_hash(keccak256(raw_tx).0);
        let mut state = self.state.lock().expect("ledger state poisoned");
        state.submitted.push(raw_tx.to_vec());
        let block_number = Some(state.submitted.len() as u64);
        if !self.withhold_receipts {
            state.receipts.insert(
                tx_ref,
                TxReceipt {
                    tx_ref,
                    status: self.mined_status,
                    block_number,
                },
            );
        }
        Ok(tx_ref)
    }

    async fn try_receipt(&self, tx_ref: &TxRef) -> LedgerResult<Option<TxReceipt>> {
        self.receipt_lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_receipt_lookup {
            return Err(LedgerError::Transport("receipt endpoint unavailable".into()));
        }
        let state = self.state.lock().expect("ledger state poisoned");
        Ok(state.receipts.get(tx_ref).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn submit_then_receipt() {
        let ledger = InMemoryLedger::confirming();
        let tx_ref = ledger.submit(b"raw tx bytes").await.unwrap();
        let receipt = ledger
            .receipt(&tx_ref, Duration::from_secs(1))
            .await
            .unwrap();
        assert!(receipt.is_success());
        assert_eq!(ledger.submitted_count(), 1);
    }

    #[tokio::test]
    async fn failed_status_is_reported() {
        let ledger = InMemoryLedger::confirming().with_failed_status();
        let tx_ref = ledger.submit(b"raw").await.unwrap();
        let receipt = ledger.try_receipt(&tx_ref).await.unwrap().unwrap();
        assert!(!receipt.is_success());
    }

    #[tokio::test]
    async fn withheld_receipts_time_out() {
        let ledger = InMemoryLedger::confirming().with_withheld_receipts();
        let tx_ref = ledger.submit(b"raw").await.unwrap();
        let err = ledger.receipt(&tx_ref, Duration::ZERO).await.unwrap_err();
        assert!(matches!(err, LedgerError::ReceiptTimeout(_)));
    }

    #[tokio::test]
    async fn estimate_failure() {
        let ledger = InMemoryLedger::confirming().with_estimate_failure();
        let tx = TxRequest {
            from: Address::ZERO,
            to: Address::ZERO,
            value: alloy_primitives::U256::ZERO,
            gas_limit: 100_000,
            gas_price: 1,
            nonce: 0,
            data: vec![],
            chain_id: 1,
        };
        assert!(matches!(
            ledger.estimate_gas(&tx).await,
            Err(LedgerError::TransactionWouldFail(_))
        ));
    }

    #[tokio::test]
    async fn pending_nonce_advances_with_each_submission() {
        let ledger = InMemoryLedger::confirming();
        assert_eq!(ledger.nonce_for(Address::ZERO).await.unwrap(), 0);
        ledger.submit(b"first").await.unwrap();
        ledger.submit(b"second").await.unwrap();
        assert_eq!(ledger.nonce_for(Address::ZERO).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn lookup_counter_increments() {
        let ledger = InMemoryLedger::confirming();
        let _ = ledger.try_receipt(&TxRef::from_hash([0u8; 32])).await;
        let _ = ledger.try_receipt(&TxRef::from_hash([0u8; 32])).await;
        assert_eq!(ledger.receipt_lookups(), 2);
    }
}
