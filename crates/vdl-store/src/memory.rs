use std::sync::RwLock;

use vdl_types::{DocumentRecord, ParticipantName};

use crate::error::StoreResult;
use crate::traits::RecordStore;

/// In-memory, Vec-backed record store.
///
/// Intended for tests and embedding. Records are held behind a `RwLock`:
/// many concurrent readers, one writer at a time.
pub struct InMemoryRecordStore {
    records: RwLock<Vec<DocumentRecord>>,
}

impl InMemoryRecordStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Snapshot of every record in append order.
    pub fn all(&self) -> Vec<DocumentRecord> {
        self.records.read().expect("lock poisoned").clone()
    }

    /// Remove all records. Test helper; production stores never delete.
    pub fn clear(&self) {
        self.records.write().expect("lock poisoned").clear();
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn append(&self, record: &DocumentRecord) -> StoreResult<()> {
        self.records
            .write()
            .expect("lock poisoned")
            .push(record.clone());
        Ok(())
    }

    fn latest_for(&self, name: &ParticipantName) -> StoreResult<Option<DocumentRecord>> {
        let records = self.records.read().expect("lock poisoned");
        Ok(records
            .iter()
            .rev()
            .find(|r| &r.participant_name == name)
            .cloned())
    }

    fn history_for(&self, name: &ParticipantName) -> StoreResult<Vec<DocumentRecord>> {
        let records = self.records.read().expect("lock poisoned");
        Ok(records
            .iter()
            .rev()
            .filter(|r| &r.participant_name == name)
            .cloned()
            .collect())
    }

    fn len(&self) -> StoreResult<u64> {
        Ok(self.records.read().expect("lock poisoned").len() as u64)
    }
}

impl std::fmt::Debug for InMemoryRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRecordStore")
            .field("record_count", &self.records.read().expect("lock poisoned").len())
            .finish()
    }
}
