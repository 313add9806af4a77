//! HTTP server for the VeriDoc Ledger.
//!
//! Exposes document notarization and verification as multipart upload
//! endpoints, plus record history and health probes.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ConfigError, ServerError, ServerResult};
pub use handler::AppState;
pub use router::build_router;
pub use server::NotaryServer;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use alloy_primitives::Address;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use k256::ecdsa::SigningKey;
    use tower::util::ServiceExt;

    use vdl_extract::StaticExtractor;
    use vdl_ledger::{InMemoryLedger, NotarySigner};
    use vdl_store::{InMemoryRecordStore, RecordStore};
    use vdl_types::ParticipantName;
    use vdl_workflow::{NotaryService, WorkflowConfig};

    const BOUNDARY: &str = "vdl-test-boundary";

    fn test_state(ledger: InMemoryLedger) -> Arc<AppState> {
        let extractor = Arc::new(StaticExtractor::returning(
            ParticipantName::parse("Alice Example").unwrap(),
        ));
        let store: Arc<dyn RecordStore> = Arc::new(InMemoryRecordStore::new());
        let signer = NotarySigner::new(SigningKey::random(&mut rand::thread_rng()));
        let mut config = WorkflowConfig::new(Address::ZERO, 1337);
        config.receipt_timeout = Duration::ZERO;
        let max_upload_bytes = config.max_upload_bytes;
        let service = NotaryService::new(extractor, Arc::new(ledger), store.clone(), signer, config);
        Arc::new(AppState {
            service,
            store,
            max_upload_bytes,
        })
    }

    fn upload_request(uri: &str, filename: &str, content: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let app = build_router(test_state(InMemoryLedger::confirming()));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn info_endpoint() {
        let app = build_router(test_state(InMemoryLedger::confirming()));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/info")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn notarize_then_verify_round_trip() {
        let state = test_state(InMemoryLedger::confirming());

        let response = build_router(state.clone())
            .oneshot(upload_request("/v1/documents", "deed.pdf", b"signed deed"))
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body = body_json(response).await;
        assert_eq!(body["status"], "success");
        assert_eq!(body["participant_name"], "Alice Example");
        assert!(body["transaction_hash"]
            .as_str()
            .unwrap()
            .starts_with("0x"));

        let response = build_router(state)
            .oneshot(upload_request(
                "/v1/documents/verify",
                "deed.pdf",
                b"signed deed",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body = body_json(response).await;
        assert_eq!(body["status"], "success");
    }

    #[tokio::test]
    async fn unknown_extension_is_rejected() {
        let app = build_router(test_state(InMemoryLedger::confirming()));
        let response = app
            .oneshot(upload_request("/v1/documents", "deed.docx", b"doc"))
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
        let body = body_json(response).await;
        assert_eq!(body["error"], "unsupported_format");
    }

    #[tokio::test]
    async fn missing_file_field_is_rejected() {
        let body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--{BOUNDARY}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/v1/documents")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        let app = build_router(test_state(InMemoryLedger::confirming()));
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), 400);
        let body = body_json(response).await;
        assert_eq!(body["error"], "no_file");
    }

    #[tokio::test]
    async fn verify_without_record_is_not_found() {
        let app = build_router(test_state(InMemoryLedger::confirming()));
        let response = app
            .oneshot(upload_request(
                "/v1/documents/verify",
                "deed.pdf",
                b"never notarized",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), 404);
        let body = body_json(response).await;
        assert_eq!(body["status"], "not_found");
        assert_eq!(body["extracted_name"], "Alice Example");
    }

    #[tokio::test]
    async fn modified_document_is_a_mismatch() {
        let state = test_state(InMemoryLedger::confirming());

        let response = build_router(state.clone())
            .oneshot(upload_request("/v1/documents", "deed.pdf", b"original"))
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let response = build_router(state)
            .oneshot(upload_request(
                "/v1/documents/verify",
                "deed.pdf",
                b"tampered",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
        let body = body_json(response).await;
        assert_eq!(body["status"], "mismatch");
        assert!(body["stored_hash"].as_str().is_some());
    }

    #[tokio::test]
    async fn rejected_estimate_maps_to_bad_request() {
        let app = build_router(test_state(
            InMemoryLedger::confirming().with_estimate_failure(),
        ));
        let response = app
            .oneshot(upload_request("/v1/documents", "deed.pdf", b"doc"))
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
        let body = body_json(response).await;
        assert_eq!(body["error"], "transaction_would_fail");
    }

    #[tokio::test]
    async fn history_lists_records_most_recent_first() {
        let state = test_state(InMemoryLedger::confirming());

        for content in [b"first".as_slice(), b"second".as_slice()] {
            let response = build_router(state.clone())
                .oneshot(upload_request("/v1/documents", "deed.pdf", content))
                .await
                .unwrap();
            assert_eq!(response.status(), 200);
        }

        let response = build_router(state)
            .oneshot(
                Request::builder()
                    .uri("/v1/participants/Alice%20Example/records")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        let body = body_json(response).await;
        let records = body.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["participant_name"], "Alice Example");
    }

    #[tokio::test]
    async fn history_with_invalid_name_is_rejected() {
        let app = build_router(test_state(InMemoryLedger::confirming()));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/participants/bad%21name/records")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
    }
}
