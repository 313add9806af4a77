use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use vdl_types::{DocumentKind, ParticipantName};

use crate::error::ExtractError;
use crate::NameExtractor;

/// Extractor that always returns the same answer.
///
/// Intended for tests and embedding — notarization flows can be exercised
/// without a vision API. Counts calls so tests can assert when extraction
/// was (or was not) reached.
pub struct StaticExtractor {
    outcome: Result<ParticipantName, ExtractError>,
    calls: AtomicU64,
}

impl StaticExtractor {
    /// Always succeed with the given name.
    pub fn returning(name: ParticipantName) -> Self {
        Self {
            outcome: Ok(name),
            calls: AtomicU64::new(0),
        }
    }

    /// Always fail with the given error.
    pub fn failing(error: ExtractError) -> Self {
        Self {
            outcome: Err(error),
            calls: AtomicU64::new(0),
        }
    }

    /// Number of times `extract` has been called.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NameExtractor for StaticExtractor {
    async fn extract(
        &self,
        _document: &[u8],
        _kind: DocumentKind,
    ) -> Result<ParticipantName, ExtractError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_configured_name() {
        let name = ParticipantName::parse("Jane Doe").unwrap();
        let extractor = StaticExtractor::returning(name.clone());
        let out = extractor.extract(b"pdf bytes", DocumentKind::Pdf).await.unwrap();
        assert_eq!(out, name);
        assert_eq!(extractor.calls(), 1);
    }

    #[tokio::test]
    async fn returns_configured_error() {
        let extractor = StaticExtractor::failing(ExtractError::NoName);
        let err = extractor.extract(b"x", DocumentKind::Png).await.unwrap_err();
        assert_eq!(err, ExtractError::NoName);
    }
}
