//! Notarization and verification workflows for the VeriDoc Ledger.
//!
//! This crate is the heart of VDL. [`NotaryService`] orchestrates the
//! hasher, name extractor, ledger client, and record store through two
//! sequential workflows:
//!
//! - **Notarize**: gate format → hash → extract name → prepare transaction
//!   (nonce, gas premium, estimate) → sign → submit → await receipt →
//!   persist one record. Persistence strictly follows on-chain
//!   confirmation; no other path writes a record.
//! - **Verify**: hash → extract name → look up the most recent record →
//!   compare digests → corroborate on chain. Expected outcomes (no record,
//!   mismatch, stale chain state) are values, not errors, and a ledger
//!   failure after a digest match degrades to a warning instead of failing
//!   the request.
//!
//! Nothing retries: every failure is terminal for its request, and a
//! resubmitted request recomputes everything from scratch.

pub mod error;
pub mod outcome;
pub mod service;

pub use error::NotarizeError;
pub use outcome::{ChainStatus, VerifyOutcome};
pub use service::{NotaryService, WorkflowConfig};
