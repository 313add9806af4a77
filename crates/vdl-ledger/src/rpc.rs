use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use alloy_primitives::Address;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use vdl_types::TxRef;

use crate::error::{LedgerError, LedgerResult};
use crate::traits::LedgerClient;
use crate::tx::{TxReceipt, TxRequest};

/// Default per-call HTTP deadline.
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(30);

/// Thin Ethereum JSON-RPC adapter over HTTP.
///
/// One method per [`LedgerClient`] operation, no retries, no batching.
/// Quantities follow the Ethereum JSON-RPC convention (`0x`-prefixed hex).
pub struct JsonRpcLedger {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl JsonRpcLedger {
    /// Build an adapter for the given RPC endpoint.
    pub fn new(url: impl Into<String>) -> LedgerResult<Self> {
        Self::with_timeout(url, DEFAULT_RPC_TIMEOUT)
    }

    /// Build an adapter with an explicit per-call deadline.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> LedgerResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LedgerError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    /// The RPC endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call(&self, method: &str, params: Value) -> LedgerResult<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        debug!(method, id, "rpc call");

        let response = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LedgerError::Transport(e.to_string()))?;
        let parsed: RpcResponse = response
            .json()
            .await
            .map_err(|e| LedgerError::Malformed(e.to_string()))?;

        if let Some(error) = parsed.error {
            return Err(LedgerError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        parsed
            .result
            .ok_or_else(|| LedgerError::Malformed("response has neither result nor error".into()))
    }
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[async_trait]
impl LedgerClient for JsonRpcLedger {
    async fn ensure_connected(&self) -> LedgerResult<()> {
        self.call("web3_clientVersion", json!([]))
            .await
            .map(|_| ())
            .map_err(|e| LedgerError::ConnectionFailed(e.to_string()))
    }

    async fn gas_price(&self) -> LedgerResult<u128> {
        let result = self.call("eth_gasPrice", json!([])).await?;
        quantity_u128(&result)
    }

    async fn nonce_for(&self, address: Address) -> LedgerResult<u64> {
        let result = self
            .call("eth_getTransactionCount", json!([address, "pending"]))
            .await?;
        quantity_u64(&result)
    }

    async fn estimate_gas(&self, tx: &TxRequest) -> LedgerResult<u64> {
        let params = json!([{
            "from": tx.from,
            "to": tx.to,
            "value": format!("0x{:x}", tx.value),
            "gasPrice": format!("0x{:x}", tx.gas_price),
            "data": format!("0x{}", hex::encode(&tx.data)),
        }]);
        let result = self
            .call("eth_estimateGas", params)
            .await
            .map_err(|e| LedgerError::TransactionWouldFail(e.to_string()))?;
        quantity_u64(&result)
    }

    async fn submit(&self, raw_tx: &[u8]) -> LedgerResult<TxRef> {
        let raw = format!("0x{}", hex::encode(raw_tx));
        let result = self
            .call("eth_sendRawTransaction", json!([raw]))
            .await
            .map_err(|e| LedgerError::SubmissionFailed(e.to_string()))?;
        let hash = result
            .as_str()
            .ok_or_else(|| LedgerError::Malformed("transaction hash is not a string".into()))?;
        TxRef::from_hex(hash).map_err(|e| LedgerError::Malformed(e.to_string()))
    }

    async fn try_receipt(&self, tx_ref: &TxRef) -> LedgerResult<Option<TxReceipt>> {
        let result = self
            .call("eth_getTransactionReceipt", json!([tx_ref.to_hex()]))
            .await?;
        if result.is_null() {
            return Ok(None);
        }
        let status = quantity_u64(
            result
                .get("status")
                .ok_or_else(|| LedgerError::Malformed("receipt has no status".into()))?,
        )?;
        let block_number = match result.get("blockNumber") {
            Some(v) if !v.is_null() => Some(quantity_u64(v)?),
            _ => None,
        };
        Ok(Some(TxReceipt {
            tx_ref: *tx_ref,
            status,
            block_number,
        }))
    }
}

/// Parse an Ethereum JSON-RPC quantity (`0x`-prefixed hex string).
fn quantity_u128(value: &Value) -> LedgerResult<u128> {
    let s = value
        .as_str()
        .ok_or_else(|| LedgerError::Malformed(format!("expected quantity string, got {value}")))?;
    let digits = s.strip_prefix("0x").unwrap_or(s);
    u128::from_str_radix(digits, 16)
        .map_err(|e| LedgerError::Malformed(format!("bad quantity {s:?}: {e}")))
}

fn quantity_u64(value: &Value) -> LedgerResult<u64> {
    let wide = quantity_u128(value)?;
    u64::try_from(wide).map_err(|_| LedgerError::Malformed(format!("quantity {wide} overflows u64")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quantities() {
        assert_eq!(quantity_u64(&json!("0x1")).unwrap(), 1);
        assert_eq!(quantity_u64(&json!("0x5208")).unwrap(), 21000);
        assert_eq!(quantity_u128(&json!("0x3b9aca00")).unwrap(), 1_000_000_000);
    }

    #[test]
    fn rejects_malformed_quantities() {
        assert!(quantity_u64(&json!("not hex")).is_err());
        assert!(quantity_u64(&json!(42)).is_err());
        assert!(quantity_u64(&json!(null)).is_err());
    }

    #[test]
    fn rpc_error_body_deserializes() {
        let raw = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"execution reverted"}}"#;
        let parsed: RpcResponse = serde_json::from_str(raw).unwrap();
        let error = parsed.error.unwrap();
        assert_eq!(error.code, -32000);
        assert_eq!(error.message, "execution reverted");
    }

    #[test]
    fn result_body_deserializes() {
        let raw = r#"{"jsonrpc":"2.0","id":1,"result":"0x10"}"#;
        let parsed: RpcResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.result.unwrap(), json!("0x10"));
    }
}
