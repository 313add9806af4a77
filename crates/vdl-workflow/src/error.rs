use std::time::Duration;

use thiserror::Error;

use vdl_extract::ExtractError;
use vdl_hash::HashError;
use vdl_ledger::LedgerError;
use vdl_store::StoreError;
use vdl_types::{TxRef, TypeError};

/// Terminal failures of the notarization and verification workflows.
///
/// Each variant is the most specific kind available for its failure point;
/// none are retried automatically.
#[derive(Debug, Error)]
pub enum NotarizeError {
    #[error("unsupported document format: {0}; upload a pdf, jpg, jpeg, or png")]
    UnsupportedFormat(String),

    #[error("document exceeds the {limit} byte upload limit")]
    TooLarge { limit: u64 },

    #[error("name extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("validation failed: {0}")]
    Validation(TypeError),

    #[error("ledger connection failed: {0}")]
    Connection(String),

    #[error("transaction would fail: {0}")]
    TransactionWouldFail(String),

    #[error("transaction submission failed: {0}")]
    Submission(String),

    #[error("no transaction receipt within {0:?}")]
    ReceiptTimeout(Duration),

    #[error("transaction {tx_ref} failed on chain (status {status})")]
    OnChainFailure { tx_ref: TxRef, status: u64 },

    #[error("record store error: {0}")]
    Store(#[from] StoreError),

    #[error("ledger error: {0}")]
    Ledger(String),
}

impl From<TypeError> for NotarizeError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::UnsupportedFormat(ext) => Self::UnsupportedFormat(ext),
            other => Self::Validation(other),
        }
    }
}

impl From<HashError> for NotarizeError {
    fn from(err: HashError) -> Self {
        match err {
            HashError::TooLarge { limit } => Self::TooLarge { limit },
        }
    }
}

impl From<LedgerError> for NotarizeError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::ConnectionFailed(msg) => Self::Connection(msg),
            LedgerError::TransactionWouldFail(msg) => Self::TransactionWouldFail(msg),
            LedgerError::SubmissionFailed(msg) => Self::Submission(msg),
            LedgerError::ReceiptTimeout(t) => Self::ReceiptTimeout(t),
            other => Self::Ledger(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_format_maps_through() {
        let err: NotarizeError = TypeError::UnsupportedFormat(".docx".into()).into();
        assert!(matches!(err, NotarizeError::UnsupportedFormat(_)));
    }

    #[test]
    fn other_type_errors_become_validation() {
        let err: NotarizeError = TypeError::InvalidName("bad".into()).into();
        assert!(matches!(err, NotarizeError::Validation(_)));
    }

    #[test]
    fn ledger_kinds_keep_specificity() {
        let err: NotarizeError = LedgerError::TransactionWouldFail("revert".into()).into();
        assert!(matches!(err, NotarizeError::TransactionWouldFail(_)));
        let err: NotarizeError = LedgerError::ConnectionFailed("refused".into()).into();
        assert!(matches!(err, NotarizeError::Connection(_)));
    }
}
