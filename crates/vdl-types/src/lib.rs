//! Foundation types for the VeriDoc Ledger (VDL).
//!
//! This crate provides the core value types used throughout the VDL system.
//! Every other VDL crate depends on `vdl-types`.
//!
//! # Key Types
//!
//! - [`ParticipantName`] — Validated human name extracted from a document
//! - [`DocumentDigest`] — 256-bit content fingerprint, rendered as 64 hex chars
//! - [`TxRef`] — Opaque reference to an on-chain transaction
//! - [`DocumentKind`] — Accepted upload formats and their media types
//! - [`DocumentRecord`] — The sole persisted entity: name → digest → tx

pub mod digest;
pub mod error;
pub mod kind;
pub mod name;
pub mod record;
pub mod txref;

pub use digest::DocumentDigest;
pub use error::TypeError;
pub use kind::DocumentKind;
pub use name::ParticipantName;
pub use record::DocumentRecord;
pub use txref::TxRef;
