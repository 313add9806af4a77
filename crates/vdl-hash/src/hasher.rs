use sha2::{Digest, Sha256};

use vdl_types::DocumentDigest;

/// Default ceiling on hashed input: 20 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 20 * 1024 * 1024;

/// Errors from hashing operations.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum HashError {
    #[error("input exceeds the {limit} byte limit")]
    TooLarge { limit: u64 },
}

/// Bounded SHA-256 document hasher.
///
/// Deterministic and side-effect free. The only failure mode is input past
/// the configured size ceiling, which is rejected before any hashing work.
#[derive(Clone, Copy, Debug)]
pub struct DocumentHasher {
    max_input_bytes: u64,
}

impl DocumentHasher {
    /// Create a hasher with an explicit input ceiling.
    pub const fn new(max_input_bytes: u64) -> Self {
        Self { max_input_bytes }
    }

    /// The configured input ceiling in bytes.
    pub fn max_input_bytes(&self) -> u64 {
        self.max_input_bytes
    }

    /// Hash a full in-memory document.
    pub fn digest(&self, data: &[u8]) -> Result<DocumentDigest, HashError> {
        if data.len() as u64 > self.max_input_bytes {
            return Err(HashError::TooLarge {
                limit: self.max_input_bytes,
            });
        }
        let mut hasher = Sha256::new();
        hasher.update(data);
        Ok(DocumentDigest::from_hash(hasher.finalize().into()))
    }

    /// Begin a streaming hash, enforcing the ceiling across chunks.
    ///
    /// Lets callers that receive a document incrementally (multipart upload
    /// fields) abort as soon as the running total crosses the limit.
    pub fn begin(&self) -> StreamingHasher {
        StreamingHasher {
            inner: Sha256::new(),
            seen: 0,
            limit: self.max_input_bytes,
        }
    }
}

impl Default for DocumentHasher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_INPUT_BYTES)
    }
}

/// In-progress streaming hash with a running size check.
pub struct StreamingHasher {
    inner: Sha256,
    seen: u64,
    limit: u64,
}

impl StreamingHasher {
    /// Feed a chunk. Fails once the running total exceeds the ceiling.
    pub fn update(&mut self, chunk: &[u8]) -> Result<(), HashError> {
        self.seen += chunk.len() as u64;
        if self.seen > self.limit {
            return Err(HashError::TooLarge { limit: self.limit });
        }
        self.inner.update(chunk);
        Ok(())
    }

    /// Bytes consumed so far.
    pub fn bytes_seen(&self) -> u64 {
        self.seen
    }

    /// Finish and produce the digest.
    pub fn finalize(self) -> DocumentDigest {
        DocumentDigest::from_hash(self.inner.finalize().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn digest_is_deterministic() {
        let hasher = DocumentHasher::default();
        let a = hasher.digest(b"hello world").unwrap();
        let b = hasher.digest(b"hello world").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn known_vectors() {
        let hasher = DocumentHasher::default();
        assert_eq!(
            hasher.digest(b"").unwrap().to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            hasher.digest(b"abc").unwrap().to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn output_is_64_lowercase_hex() {
        let hex = DocumentHasher::default().digest(b"doc").unwrap().to_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn rejects_oversize_input() {
        let hasher = DocumentHasher::new(8);
        assert_eq!(
            hasher.digest(&[0u8; 9]),
            Err(HashError::TooLarge { limit: 8 })
        );
        assert!(hasher.digest(&[0u8; 8]).is_ok());
    }

    #[test]
    fn streaming_matches_one_shot() {
        let hasher = DocumentHasher::default();
        let data = b"the quick brown fox jumps over the lazy dog";
        let mut streaming = hasher.begin();
        for chunk in data.chunks(7) {
            streaming.update(chunk).unwrap();
        }
        assert_eq!(streaming.finalize(), hasher.digest(data).unwrap());
    }

    #[test]
    fn streaming_enforces_ceiling_across_chunks() {
        let hasher = DocumentHasher::new(10);
        let mut streaming = hasher.begin();
        streaming.update(&[0u8; 6]).unwrap();
        assert_eq!(
            streaming.update(&[0u8; 6]),
            Err(HashError::TooLarge { limit: 10 })
        );
    }

    proptest! {
        #[test]
        fn digest_reproducible_for_arbitrary_bytes(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
            let hasher = DocumentHasher::default();
            let first = hasher.digest(&data).unwrap();
            let second = hasher.digest(&data).unwrap();
            prop_assert_eq!(first.to_hex(), second.to_hex());
            prop_assert_eq!(first.to_hex().len(), 64);
        }
    }
}
