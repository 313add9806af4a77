use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use vdl_store::RecordStore;
use vdl_types::ParticipantName;
use vdl_workflow::{ChainStatus, NotarizeError, NotaryService, VerifyOutcome};

/// Shared state behind every handler.
pub struct AppState {
    pub service: NotaryService,
    pub store: Arc<dyn RecordStore>,
    pub max_upload_bytes: u64,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "ok" }
    }
}

#[derive(Serialize)]
struct NotarizeResponse {
    status: &'static str,
    transaction_hash: String,
    participant_name: String,
    message: &'static str,
}

#[derive(Serialize)]
struct VerifyResponse {
    status: &'static str,
    message: &'static str,
    extracted_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stored_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transaction_hash: Option<String>,
}

#[derive(Serialize)]
struct ErrorResponse {
    status: &'static str,
    error: &'static str,
    message: String,
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Info handler.
pub async fn info_handler() -> Json<serde_json::Value> {
    Json(json!({
        "name": "vdl-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Notarize an uploaded document.
pub async fn notarize_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Response {
    let (filename, bytes) = match read_upload(multipart, state.max_upload_bytes).await {
        Ok(upload) => upload,
        Err(response) => return response,
    };

    match state.service.notarize(&filename, &bytes).await {
        Ok(record) => Json(NotarizeResponse {
            status: "success",
            transaction_hash: record.tx_ref.to_hex(),
            participant_name: record.participant_name.to_string(),
            message: "Document notarized successfully",
        })
        .into_response(),
        Err(err) => workflow_error(err),
    }
}

/// Verify an uploaded document against the stored record and the chain.
pub async fn verify_handler(State(state): State<Arc<AppState>>, multipart: Multipart) -> Response {
    let (filename, bytes) = match read_upload(multipart, state.max_upload_bytes).await {
        Ok(upload) => upload,
        Err(response) => return response,
    };

    let outcome = match state.service.verify(&filename, &bytes).await {
        Ok(outcome) => outcome,
        Err(err) => return workflow_error(err),
    };

    match outcome {
        VerifyOutcome::Verified { record, chain } => {
            let (status, message) = match chain {
                ChainStatus::Confirmed => (
                    "success",
                    "Document verification successful. The document is authentic and confirmed on chain.",
                ),
                ChainStatus::Stale => (
                    "warning",
                    "Document matches the stored record but the notarizing transaction failed on chain.",
                ),
                ChainStatus::Unknown => (
                    "warning",
                    "Document matches the stored record but on-chain confirmation is unavailable.",
                ),
            };
            Json(VerifyResponse {
                status,
                message,
                extracted_name: record.participant_name.to_string(),
                stored_hash: Some(record.document_hash.to_hex()),
                transaction_hash: Some(record.tx_ref.to_hex()),
            })
            .into_response()
        }
        VerifyOutcome::NoRecord { name } => (
            StatusCode::NOT_FOUND,
            Json(VerifyResponse {
                status: "not_found",
                message: "No document found for this participant.",
                extracted_name: name.to_string(),
                stored_hash: None,
                transaction_hash: None,
            }),
        )
            .into_response(),
        VerifyOutcome::HashMismatch { record, .. } => (
            StatusCode::BAD_REQUEST,
            Json(VerifyResponse {
                status: "mismatch",
                message: "Document verification failed. The document has been modified or is not authentic.",
                extracted_name: record.participant_name.to_string(),
                stored_hash: Some(record.document_hash.to_hex()),
                transaction_hash: Some(record.tx_ref.to_hex()),
            }),
        )
            .into_response(),
    }
}

/// List a participant's records, most recent first.
pub async fn history_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Response {
    let name = match ParticipantName::parse(&name) {
        Ok(name) => name,
        Err(e) => {
            return api_error(StatusCode::BAD_REQUEST, "validation_failed", e.to_string())
        }
    };
    match state.store.history_for(&name) {
        Ok(records) => Json(records).into_response(),
        Err(e) => {
            error!(error = %e, "history lookup failed");
            internal_error()
        }
    }
}

/// Pull the first file field out of a multipart upload, enforcing the
/// size ceiling while reading.
async fn read_upload(
    mut multipart: Multipart,
    max_bytes: u64,
) -> Result<(String, Vec<u8>), Response> {
    loop {
        let mut field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err(api_error(
                    StatusCode::BAD_REQUEST,
                    "bad_request",
                    format!("malformed multipart body: {e}"),
                ))
            }
        };
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        let mut bytes = Vec::new();
        loop {
            match field.chunk().await {
                Ok(Some(chunk)) => {
                    if (bytes.len() + chunk.len()) as u64 > max_bytes {
                        return Err(api_error(
                            StatusCode::BAD_REQUEST,
                            "too_large",
                            format!("document exceeds the {max_bytes} byte upload limit"),
                        ));
                    }
                    bytes.extend_from_slice(&chunk);
                }
                Ok(None) => break,
                Err(e) => {
                    return Err(api_error(
                        StatusCode::BAD_REQUEST,
                        "bad_request",
                        format!("upload read failed: {e}"),
                    ))
                }
            }
        }
        return Ok((filename, bytes));
    }
    Err(api_error(
        StatusCode::BAD_REQUEST,
        "no_file",
        "no file provided".to_string(),
    ))
}

/// Map a workflow failure to an HTTP response.
///
/// Validation and format problems are the caller's fault (400); an
/// unreachable ledger is service-unavailable (503); everything else is
/// logged in full and surfaced without internals.
fn workflow_error(err: NotarizeError) -> Response {
    use NotarizeError::*;
    match &err {
        UnsupportedFormat(_) => {
            api_error(StatusCode::BAD_REQUEST, "unsupported_format", err.to_string())
        }
        TooLarge { .. } => api_error(StatusCode::BAD_REQUEST, "too_large", err.to_string()),
        Extraction(_) => api_error(StatusCode::BAD_REQUEST, "extraction_failed", err.to_string()),
        Validation(_) => api_error(StatusCode::BAD_REQUEST, "validation_failed", err.to_string()),
        TransactionWouldFail(_) => api_error(
            StatusCode::BAD_REQUEST,
            "transaction_would_fail",
            err.to_string(),
        ),
        Connection(_) => api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "connection_failed",
            "Blockchain connection failed".to_string(),
        ),
        OnChainFailure { .. } => {
            api_error(StatusCode::BAD_GATEWAY, "on_chain_failure", err.to_string())
        }
        ReceiptTimeout(_) => api_error(StatusCode::GATEWAY_TIMEOUT, "timeout", err.to_string()),
        Submission(_) | Store(_) | Ledger(_) => {
            error!(error = %err, "notarization workflow failed");
            internal_error()
        }
    }
}

fn api_error(status: StatusCode, kind: &'static str, message: String) -> Response {
    (
        status,
        Json(ErrorResponse {
            status: "error",
            error: kind,
            message,
        }),
    )
        .into_response()
}

fn internal_error() -> Response {
    api_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal",
        "An unexpected error occurred".to_string(),
    )
}
