//! Local store trait.

use crate::error::StoreResult;
use craftsync_model::{Record, RecordId};

/// Durable, synchronous, always-available persistence of records, keyed
/// by collection name.
///
/// Implementations are single-process and must make every mutation a
/// single critical section per store: two rapid `append` calls from
/// different logical flows must not interleave and drop one another.
///
/// # Failure semantics
///
/// - `load_all` never fails on malformed stored data; a corrupted
///   collection reads as empty
/// - mutations surface errors (quota exhaustion, I/O) to the caller,
///   because the local store is the durability backstop
pub trait LocalStore: Send + Sync {
    /// Returns every record currently stored for the collection, in
    /// local-storage order (newest first). Empty if none.
    fn load_all(&self, collection: &str) -> StoreResult<Vec<Record>>;

    /// Adds one record at the front of the collection.
    fn append(&self, collection: &str, record: Record) -> StoreResult<()>;

    /// Replaces the record with matching id in place; no-op if absent.
    fn replace_by_id(&self, collection: &str, id: &RecordId, record: Record) -> StoreResult<()>;

    /// Removes a record if present; no-op otherwise.
    fn remove_by_id(&self, collection: &str, id: &RecordId) -> StoreResult<()>;

    /// Rewrites a record's identifier from a local-generated value to a
    /// remote-assigned one, in place, preserving all other bookkeeping.
    ///
    /// Returns whether a record with `old_id` existed and was migrated.
    fn migrate_identity(
        &self,
        collection: &str,
        old_id: &RecordId,
        new_id: RecordId,
    ) -> StoreResult<bool>;

    /// Fetches a single record by id, if present.
    ///
    /// Default implementation scans `load_all`; stores may override.
    fn find_by_id(&self, collection: &str, id: &RecordId) -> StoreResult<Option<Record>> {
        Ok(self
            .load_all(collection)?
            .into_iter()
            .find(|record| &record.id == id))
    }
}
