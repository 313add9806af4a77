use std::time::Duration;

use alloy_primitives::Address;
use async_trait::async_trait;

use vdl_types::TxRef;

use crate::error::{LedgerError, LedgerResult};
use crate::tx::{TxReceipt, TxRequest};

/// Interval between receipt lookups while polling.
pub const RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Narrow boundary to the blockchain.
///
/// Every operation is fallible and none retries: a failure is terminal for
/// the calling workflow. Connectivity is checked eagerly at startup via
/// [`LedgerClient::ensure_connected`], not deferred to first use.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Verify the ledger endpoint is reachable.
    async fn ensure_connected(&self) -> LedgerResult<()>;

    /// Current base gas price in wei.
    async fn gas_price(&self) -> LedgerResult<u128>;

    /// Pending-inclusive transaction count for an account.
    async fn nonce_for(&self, address: Address) -> LedgerResult<u64>;

    /// Estimate gas for a transaction; rejection means the transaction
    /// would fail on chain.
    async fn estimate_gas(&self, tx: &TxRequest) -> LedgerResult<u64>;

    /// Submit a signed raw transaction, returning its reference.
    async fn submit(&self, raw_tx: &[u8]) -> LedgerResult<TxRef>;

    /// Single receipt lookup. `Ok(None)` means not yet mined.
    async fn try_receipt(&self, tx_ref: &TxRef) -> LedgerResult<Option<TxReceipt>>;

    /// Poll for a receipt until found or the timeout elapses.
    async fn receipt(&self, tx_ref: &TxRef, timeout: Duration) -> LedgerResult<TxReceipt> {
        let start = tokio::time::Instant::now();
        loop {
            if let Some(receipt) = self.try_receipt(tx_ref).await? {
                return Ok(receipt);
            }
            if start.elapsed() >= timeout {
                return Err(LedgerError::ReceiptTimeout(timeout));
            }
            tokio::time::sleep(RECEIPT_POLL_INTERVAL.min(timeout.saturating_sub(start.elapsed())))
                .await;
        }
    }
}
