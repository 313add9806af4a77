use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler::{
    health_handler, history_handler, info_handler, notarize_handler, verify_handler, AppState,
};

/// Slack on top of the document limit for multipart framing overhead.
const MULTIPART_OVERHEAD: u64 = 64 * 1024;

/// Build the full API router over the shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = (state.max_upload_bytes + MULTIPART_OVERHEAD) as usize;
    Router::new()
        .route("/v1/health", get(health_handler))
        .route("/v1/info", get(info_handler))
        .route("/v1/documents", post(notarize_handler))
        .route("/v1/documents/verify", post(verify_handler))
        .route("/v1/participants/:name/records", get(history_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
