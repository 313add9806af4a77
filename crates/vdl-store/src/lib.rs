//! Append-only document record store for the VeriDoc Ledger.
//!
//! This crate provides:
//! - The [`RecordStore`] trait boundary
//! - [`InMemoryRecordStore`] for tests and embedding
//! - [`FileRecordStore`], a durable single-file append log with CRC framing
//!
//! Records are immutable once written; there is no update or delete path.
//! Queries return the most recent record first.

pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::FileRecordStore;
pub use memory::InMemoryRecordStore;
pub use traits::RecordStore;
