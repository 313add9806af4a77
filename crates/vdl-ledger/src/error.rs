use std::time::Duration;

use thiserror::Error;

/// Errors produced by ledger operations.
#[derive(Debug, Error, Clone)]
pub enum LedgerError {
    #[error("ledger connection failed: {0}")]
    ConnectionFailed(String),

    #[error("transaction would fail: {0}")]
    TransactionWouldFail(String),

    #[error("transaction submission failed: {0}")]
    SubmissionFailed(String),

    #[error("no receipt within {0:?}")]
    ReceiptTimeout(Duration),

    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed rpc response: {0}")]
    Malformed(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("missing secret: {0}")]
    MissingSecret(String),

    #[error("invalid key material: {0}")]
    InvalidKey(String),
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
