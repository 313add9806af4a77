use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use alloy_primitives::Address;
use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable names for the required settings.
pub const ENV_VISION_API_KEY: &str = "VISION_API_KEY";
pub const ENV_RPC_URL: &str = "LEDGER_RPC_URL";
pub const ENV_RECIPIENT: &str = "NOTARY_RECIPIENT";
pub const ENV_CHAIN_ID: &str = "LEDGER_CHAIN_ID";
/// Variable holding the signing key itself; read through the secret
/// provider at startup, never stored in the config.
pub const ENV_SIGNING_KEY: &str = "NOTARY_SIGNING_KEY";

/// Server configuration.
///
/// The five collaborator settings (vision key, RPC URL, recipient, chain
/// id, signing key) are required: a missing one fails startup, never a
/// request. Everything else has defaults, overridable from a TOML file
/// and then from the environment.
#[derive(Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub vision_api_key: String,
    pub rpc_url: String,
    pub recipient: Address,
    pub chain_id: u64,
    /// Environment variable the signing key is read from.
    pub signing_key_var: String,
    pub record_log: PathBuf,
    pub max_upload_bytes: u64,
    pub extract_timeout: Duration,
    pub receipt_timeout: Duration,
    pub gas_premium_percent: u64,
}

/// Optional file-level settings (TOML).
#[derive(Default, Deserialize)]
struct FileConfig {
    bind_addr: Option<SocketAddr>,
    record_log: Option<PathBuf>,
    max_upload_bytes: Option<u64>,
    extract_timeout_secs: Option<u64>,
    receipt_timeout_secs: Option<u64>,
    gas_premium_percent: Option<u64>,
}

impl ServerConfig {
    /// Load configuration: defaults, then the optional TOML file, then the
    /// environment for the required settings.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let overrides = match file {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .map_err(|e| ConfigError::File(path.display().to_string(), e.to_string()))?;
                toml::from_str::<FileConfig>(&raw)
                    .map_err(|e| ConfigError::File(path.display().to_string(), e.to_string()))?
            }
            None => FileConfig::default(),
        };

        let recipient_raw = required_env(ENV_RECIPIENT)?;
        let recipient: Address = recipient_raw
            .parse()
            .map_err(|_| ConfigError::Invalid(ENV_RECIPIENT, recipient_raw.clone()))?;
        let chain_raw = required_env(ENV_CHAIN_ID)?;
        let chain_id: u64 = chain_raw
            .parse()
            .map_err(|_| ConfigError::Invalid(ENV_CHAIN_ID, chain_raw.clone()))?;

        // The key itself stays in the environment; startup only checks
        // that it is present.
        if std::env::var(ENV_SIGNING_KEY).is_err() {
            return Err(ConfigError::MissingVar(ENV_SIGNING_KEY));
        }

        Ok(Self {
            bind_addr: overrides
                .bind_addr
                .unwrap_or_else(|| "127.0.0.1:8731".parse().expect("valid literal addr")),
            vision_api_key: required_env(ENV_VISION_API_KEY)?,
            rpc_url: required_env(ENV_RPC_URL)?,
            recipient,
            chain_id,
            signing_key_var: ENV_SIGNING_KEY.to_string(),
            record_log: overrides
                .record_log
                .unwrap_or_else(|| PathBuf::from("vdl-records.log")),
            max_upload_bytes: overrides
                .max_upload_bytes
                .unwrap_or(vdl_hash::DEFAULT_MAX_INPUT_BYTES),
            extract_timeout: Duration::from_secs(overrides.extract_timeout_secs.unwrap_or(30)),
            receipt_timeout: Duration::from_secs(overrides.receipt_timeout_secs.unwrap_or(120)),
            gas_premium_percent: overrides
                .gas_premium_percent
                .unwrap_or(vdl_ledger::GasPolicy::DEFAULT_PREMIUM_PERCENT),
        })
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("vision_api_key", &"<redacted>")
            .field("rpc_url", &self.rpc_url)
            .field("recipient", &self.recipient)
            .field("chain_id", &self.chain_id)
            .field("record_log", &self.record_log)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish_non_exhaustive()
    }
}

fn required_env(var: &'static str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(var)),
    }
}
