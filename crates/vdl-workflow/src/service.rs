use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, U256};
use tracing::{info, warn};

use vdl_extract::NameExtractor;
use vdl_hash::{DocumentHasher, DEFAULT_MAX_INPUT_BYTES};
use vdl_ledger::{GasPolicy, LedgerClient, NonceAllocator, NotarySigner, TxRequest};
use vdl_store::RecordStore;
use vdl_types::{DocumentDigest, DocumentKind, DocumentRecord, ParticipantName};

use crate::error::NotarizeError;
use crate::outcome::{ChainStatus, VerifyOutcome};

/// Receipt polling bound, matching the source system's 120 time units.
pub const DEFAULT_RECEIPT_TIMEOUT: Duration = Duration::from_secs(120);

/// Gas limit placed on the transaction before estimation replaces it.
const FALLBACK_GAS_LIMIT: u64 = 100_000;

/// Tunables for the workflow pair.
#[derive(Clone, Debug)]
pub struct WorkflowConfig {
    /// Recipient of the notarizing transaction.
    pub recipient: Address,
    /// EIP-155 chain identifier.
    pub chain_id: u64,
    /// Upper bound on receipt polling.
    pub receipt_timeout: Duration,
    /// Upper bound on document size.
    pub max_upload_bytes: u64,
    /// Gas-price premium policy.
    pub gas_policy: GasPolicy,
}

impl WorkflowConfig {
    /// Config with defaults for everything but the required fields.
    pub fn new(recipient: Address, chain_id: u64) -> Self {
        Self {
            recipient,
            chain_id,
            receipt_timeout: DEFAULT_RECEIPT_TIMEOUT,
            max_upload_bytes: DEFAULT_MAX_INPUT_BYTES,
            gas_policy: GasPolicy::default(),
        }
    }
}

/// Orchestrates hashing, extraction, the ledger, and the record store.
pub struct NotaryService {
    extractor: Arc<dyn NameExtractor>,
    ledger: Arc<dyn LedgerClient>,
    store: Arc<dyn RecordStore>,
    signer: NotarySigner,
    hasher: DocumentHasher,
    nonces: NonceAllocator,
    config: WorkflowConfig,
}

impl NotaryService {
    pub fn new(
        extractor: Arc<dyn NameExtractor>,
        ledger: Arc<dyn LedgerClient>,
        store: Arc<dyn RecordStore>,
        signer: NotarySigner,
        config: WorkflowConfig,
    ) -> Self {
        let hasher = DocumentHasher::new(config.max_upload_bytes);
        Self {
            extractor,
            ledger,
            store,
            signer,
            hasher,
            nonces: NonceAllocator::new(),
            config,
        }
    }

    /// The configured workflow tunables.
    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// The hasher used for both workflows.
    pub fn hasher(&self) -> &DocumentHasher {
        &self.hasher
    }

    /// Notarize a document: hash it, extract the participant's name, anchor
    /// the digest on chain, and persist one record.
    ///
    /// The record write happens only after the receipt confirms success;
    /// every failure before that point leaves the store untouched.
    pub async fn notarize(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> Result<DocumentRecord, NotarizeError> {
        let (digest, name) = self.ingest(filename, bytes).await?;
        info!(participant = %name, digest = %digest.short_hex(), "document ingested for notarization");

        // Nonce acquisition through submission is serialized per account.
        let nonce_guard = self.nonces.lock(self.signer.address()).await;

        let base_price = self.ledger.gas_price().await?;
        let nonce = self.ledger.nonce_for(self.signer.address()).await?;
        let mut tx = TxRequest {
            from: self.signer.address(),
            to: self.config.recipient,
            value: U256::ZERO,
            gas_limit: FALLBACK_GAS_LIMIT,
            gas_price: self.config.gas_policy.apply(base_price),
            nonce,
            data: digest.to_hex().into_bytes(),
            chain_id: self.config.chain_id,
        };

        tx.gas_limit = self
            .ledger
            .estimate_gas(&tx)
            .await
            .map_err(|e| NotarizeError::TransactionWouldFail(e.to_string()))?;

        let signed = self.signer.sign(&tx)?;
        let tx_ref = self
            .ledger
            .submit(&signed.raw)
            .await
            .map_err(|e| NotarizeError::Submission(e.to_string()))?;
        drop(nonce_guard);
        info!(tx = %tx_ref, nonce, gas = tx.gas_limit, "transaction submitted");

        let receipt = self
            .ledger
            .receipt(&tx_ref, self.config.receipt_timeout)
            .await?;
        if !receipt.is_success() {
            warn!(tx = %tx_ref, status = receipt.status, "notarizing transaction failed on chain");
            return Err(NotarizeError::OnChainFailure {
                tx_ref,
                status: receipt.status,
            });
        }

        // The one and only persisting side effect, reachable only here.
        let record = DocumentRecord::new(name, digest, tx_ref);
        self.store.append(&record)?;
        info!(participant = %record.participant_name, tx = %tx_ref, "document notarized");
        Ok(record)
    }

    /// Verify an uploaded copy against the stored record and the chain.
    pub async fn verify(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> Result<VerifyOutcome, NotarizeError> {
        let (digest, name) = self.ingest(filename, bytes).await?;

        let Some(record) = self.store.latest_for(&name)? else {
            info!(participant = %name, "no record for participant");
            return Ok(VerifyOutcome::NoRecord { name });
        };

        if record.document_hash != digest {
            info!(participant = %name, "digest mismatch");
            return Ok(VerifyOutcome::HashMismatch {
                record,
                computed: digest,
            });
        }

        // The digest match is the primary trust signal; chain corroboration
        // only upgrades or annotates it, never fails the request.
        let chain = match self.ledger.try_receipt(&record.tx_ref).await {
            Ok(Some(receipt)) if receipt.is_success() => ChainStatus::Confirmed,
            Ok(Some(receipt)) => {
                warn!(tx = %record.tx_ref, status = receipt.status, "stored transaction failed on chain");
                ChainStatus::Stale
            }
            Ok(None) => {
                warn!(tx = %record.tx_ref, "stored transaction has no receipt");
                ChainStatus::Unknown
            }
            Err(e) => {
                warn!(tx = %record.tx_ref, error = %e, "receipt lookup failed during verification");
                ChainStatus::Unknown
            }
        };

        info!(participant = %record.participant_name, ?chain, "document verified against stored digest");
        Ok(VerifyOutcome::Verified { record, chain })
    }

    /// Shared front of both workflows: gate the format, hash the bytes,
    /// extract and validate the name.
    async fn ingest(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> Result<(DocumentDigest, ParticipantName), NotarizeError> {
        let kind = DocumentKind::from_filename(filename)?;
        let digest = self.hasher.digest(bytes)?;
        let name = self.extractor.extract(bytes, kind).await?;
        Ok((digest, name))
    }
}
