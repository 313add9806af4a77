use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use vdl_extract::VisionExtractor;
use vdl_ledger::{
    EnvSecretProvider, GasPolicy, JsonRpcLedger, LedgerClient, NotarySigner, SecretProvider,
};
use vdl_store::{FileRecordStore, RecordStore};
use vdl_workflow::{NotaryService, WorkflowConfig};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::AppState;
use crate::router::build_router;

/// Document notarization server.
pub struct NotaryServer {
    config: ServerConfig,
}

impl NotaryServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Wire the production collaborators and start serving requests.
    ///
    /// The ledger connection is checked eagerly so a misconfigured node URL
    /// fails at startup rather than on the first upload.
    pub async fn serve(self) -> ServerResult<()> {
        let config = self.config;

        let extractor = VisionExtractor::builder(&config.vision_api_key)
            .timeout(config.extract_timeout)
            .build()?;

        let ledger = Arc::new(JsonRpcLedger::new(&config.rpc_url)?);
        ledger.ensure_connected().await?;
        info!(url = %config.rpc_url, "ledger node reachable");

        let store = Arc::new(FileRecordStore::open(&config.record_log)?);
        info!(path = %config.record_log.display(), records = store.len()?, "record log opened");

        let key = EnvSecretProvider::new(&config.signing_key_var).signing_key()?;
        let signer = NotarySigner::new(key);
        info!(notary = %signer.address(), "signer loaded");

        let mut workflow = WorkflowConfig::new(config.recipient, config.chain_id);
        workflow.receipt_timeout = config.receipt_timeout;
        workflow.max_upload_bytes = config.max_upload_bytes;
        workflow.gas_policy = GasPolicy::with_premium(config.gas_premium_percent);

        let service = NotaryService::new(
            Arc::new(extractor),
            ledger,
            store.clone(),
            signer,
            workflow,
        );

        let state = Arc::new(AppState {
            service,
            store,
            max_upload_bytes: config.max_upload_bytes,
        });
        let app = build_router(state);

        let listener = TcpListener::bind(&config.bind_addr).await?;
        info!("notary server listening on {}", config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
