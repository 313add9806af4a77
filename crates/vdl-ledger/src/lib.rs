//! Ledger client boundary for the VeriDoc Ledger.
//!
//! The blockchain is an external collaborator with a narrow interface:
//! connect, query gas/nonce, estimate, sign, submit, poll receipt. This
//! crate provides:
//! - The [`LedgerClient`] trait boundary
//! - [`JsonRpcLedger`], a thin Ethereum JSON-RPC adapter over HTTP
//! - [`NotarySigner`], legacy-transaction signing with the notary's key
//! - [`GasPolicy`], the fixed gas-price premium
//! - [`NonceAllocator`], per-account serialization of nonce use
//! - [`SecretProvider`], injected signing-key material (never hardcoded)
//! - [`InMemoryLedger`] for tests and embedding

pub mod error;
pub mod gas;
pub mod memory;
pub mod nonce;
pub mod rpc;
pub mod secret;
pub mod signer;
pub mod traits;
pub mod tx;

pub use error::{LedgerError, LedgerResult};
pub use gas::GasPolicy;
pub use memory::InMemoryLedger;
pub use nonce::NonceAllocator;
pub use rpc::JsonRpcLedger;
pub use secret::{EnvSecretProvider, SecretProvider, StaticSecretProvider};
pub use signer::{NotarySigner, SignedTx};
pub use traits::LedgerClient;
pub use tx::{TxReceipt, TxRequest};
