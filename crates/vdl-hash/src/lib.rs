//! Document hashing for the VeriDoc Ledger.
//!
//! One primitive: bounded SHA-256 over document bytes, producing a
//! [`DocumentDigest`]. The bound matters — uploads are attacker-controlled,
//! so the hasher refuses input past a configured ceiling instead of
//! buffering arbitrarily large documents.

pub mod hasher;

pub use hasher::{DocumentHasher, HashError, StreamingHasher, DEFAULT_MAX_INPUT_BYTES};
