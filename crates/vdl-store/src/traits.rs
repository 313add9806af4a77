use vdl_types::{DocumentRecord, ParticipantName};

use crate::error::StoreResult;

/// Append-only store of notarization records.
///
/// All implementations must satisfy these invariants:
/// - Records are immutable once appended; there is no update or delete.
/// - Appends preserve insertion order; within one participant that order is
///   the notarization order.
/// - Concurrent reads are always safe; writes are serialized.
/// - All I/O errors are propagated, never silently ignored.
pub trait RecordStore: Send + Sync {
    /// Append a record to the log.
    fn append(&self, record: &DocumentRecord) -> StoreResult<()>;

    /// The most recent record for a participant, if any.
    fn latest_for(&self, name: &ParticipantName) -> StoreResult<Option<DocumentRecord>>;

    /// All records for a participant, most recent first.
    fn history_for(&self, name: &ParticipantName) -> StoreResult<Vec<DocumentRecord>>;

    /// Total number of records in the store.
    fn len(&self) -> StoreResult<u64>;

    /// Returns `true` if the store holds no records.
    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}
