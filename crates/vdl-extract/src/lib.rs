//! Participant name extraction for the VeriDoc Ledger.
//!
//! The extractor is an untrusted, latency-bearing remote collaborator: it is
//! always called with a timeout, and anything other than a clean, valid name
//! is a hard failure — never a silent default. The [`NameExtractor`] trait
//! is the boundary; [`VisionExtractor`] is the production adapter against a
//! Gemini-style `generateContent` endpoint, and [`StaticExtractor`] is a
//! canned implementation for tests and embedding.

pub mod error;
pub mod fixed;
pub mod vision;

pub use error::ExtractError;
pub use fixed::StaticExtractor;
pub use vision::VisionExtractor;

use async_trait::async_trait;
use vdl_types::{DocumentKind, ParticipantName};

/// Boundary for document-to-name extraction.
#[async_trait]
pub trait NameExtractor: Send + Sync {
    /// Extract the participant's name from document bytes.
    ///
    /// Implementations must bound their own latency (request timeout) and
    /// return a validated [`ParticipantName`] or a specific failure.
    async fn extract(
        &self,
        document: &[u8],
        kind: DocumentKind,
    ) -> Result<ParticipantName, ExtractError>;
}
