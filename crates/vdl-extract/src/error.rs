use vdl_types::TypeError;

/// Errors from name extraction.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The model could not find a name in the document.
    #[error("no participant name found in document")]
    NoName,

    /// The model returned something that fails name validation.
    #[error("extracted name is invalid: {0}")]
    InvalidName(#[from] TypeError),

    /// The extraction call did not complete within its deadline.
    #[error("extraction timed out after {secs}s")]
    Timeout { secs: u64 },

    /// The remote API rejected the request.
    #[error("vision API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure reaching the API.
    #[error("extraction request failed: {0}")]
    Request(String),

    /// The API response body could not be interpreted.
    #[error("malformed vision API response: {0}")]
    Decode(String),
}
