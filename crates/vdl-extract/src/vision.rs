use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::debug;

use vdl_types::{DocumentKind, ParticipantName};

use crate::error::ExtractError;
use crate::NameExtractor;

/// Default endpoint for the Gemini generateContent API family.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Default vision model.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default per-request deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Sentinel the model is instructed to emit when no name is present.
const NO_NAME_SENTINEL: &str = "NO_NAME_FOUND";

const PROMPT: &str = "Extract the full name of the participant from this document. \
Return ONLY the full name, nothing else. If multiple names are found, return the \
most prominent one. If no valid name is found, respond with 'NO_NAME_FOUND'.";

/// Vision-model name extractor over a Gemini-style HTTP API.
///
/// Sends the base64-encoded document and its media type together with a
/// fixed prompt, then validates the model's answer into a
/// [`ParticipantName`]. Every request carries the configured timeout.
pub struct VisionExtractor {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

impl VisionExtractor {
    /// Build an extractor with the default endpoint, model, and timeout.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ExtractError> {
        Self::builder(api_key).build()
    }

    /// Start configuring an extractor.
    pub fn builder(api_key: impl Into<String>) -> VisionExtractorBuilder {
        VisionExtractorBuilder {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    fn request_url(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        )
    }
}

/// Builder for [`VisionExtractor`].
pub struct VisionExtractorBuilder {
    endpoint: String,
    model: String,
    api_key: String,
    timeout: Duration,
}

impl VisionExtractorBuilder {
    /// Override the API endpoint (useful for pointing tests at a local stub).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the model name.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the per-request deadline.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<VisionExtractor, ExtractError> {
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| ExtractError::Request(e.to_string()))?;
        Ok(VisionExtractor {
            http,
            endpoint: self.endpoint,
            model: self.model,
            api_key: self.api_key,
            timeout: self.timeout,
        })
    }
}

#[async_trait]
impl NameExtractor for VisionExtractor {
    async fn extract(
        &self,
        document: &[u8],
        kind: DocumentKind,
    ) -> Result<ParticipantName, ExtractError> {
        let body = GenerateRequest::for_document(document, kind);
        debug!(model = %self.model, media_type = kind.media_type(), bytes = document.len(), "vision extraction request");

        let response = self
            .http
            .post(self.request_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ExtractError::Timeout {
                        secs: self.timeout.as_secs(),
                    }
                } else {
                    ExtractError::Request(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ExtractError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ExtractError::Decode(e.to_string()))?;
        validate_answer(&parsed.first_text().ok_or_else(|| {
            ExtractError::Decode("response contains no text candidate".into())
        })?)
    }
}

/// Turn the raw model answer into a validated name.
fn validate_answer(answer: &str) -> Result<ParticipantName, ExtractError> {
    let trimmed = answer.trim();
    if trimmed.is_empty() || trimmed == NO_NAME_SENTINEL {
        return Err(ExtractError::NoName);
    }
    Ok(ParticipantName::parse(trimmed)?)
}

// --- wire types ------------------------------------------------------------

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
enum Part {
    #[serde(rename = "text")]
    Text(String),
    #[serde(rename = "inlineData", rename_all = "camelCase")]
    InlineData { mime_type: String, data: String },
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

impl GenerateRequest {
    fn for_document(document: &[u8], kind: DocumentKind) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![
                    Part::Text(PROMPT.to_string()),
                    Part::InlineData {
                        mime_type: kind.media_type().to_string(),
                        data: general_purpose::STANDARD.encode(document),
                    },
                ],
            }],
        }
    }
}

impl GenerateResponse {
    fn first_text(&self) -> Option<String> {
        self.candidates.first().and_then(|c| {
            c.content.parts.iter().find_map(|p| match p {
                Part::Text(text) => Some(text.clone()),
                Part::InlineData { .. } => None,
            })
        })
    }
}
