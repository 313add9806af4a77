use thiserror::Error;

/// Startup configuration failures. Always fatal, never per-request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),

    #[error("config file {0}: {1}")]
    File(String, String),
}

/// Server-level failures (startup and infrastructure).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("record store error: {0}")]
    Store(#[from] vdl_store::StoreError),

    #[error("ledger error: {0}")]
    Ledger(#[from] vdl_ledger::LedgerError),

    #[error("extractor error: {0}")]
    Extract(#[from] vdl_extract::ExtractError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Result alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
