//! In-memory local store for testing and ephemeral use.

use crate::error::{StoreError, StoreResult};
use crate::store::LocalStore;
use craftsync_model::{Record, RecordId};
use parking_lot::Mutex;
use std::collections::HashMap;

/// An in-memory local store.
///
/// Suitable for unit tests, integration tests, and ephemeral catalogs
/// that do not need persistence. Thread-safe; every mutation runs under
/// a single store-wide lock, so read-modify-write never interleaves.
///
/// An optional record quota makes capacity exhaustion testable: once a
/// collection holds `quota` records, further appends fail with
/// [`StoreError::QuotaExceeded`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Record>>>,
    quota: Mutex<Option<usize>>,
}

impl MemoryStore {
    /// Creates a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a per-collection record quota, or removes it with `None`.
    pub fn set_quota(&self, quota: Option<usize>) {
        *self.quota.lock() = quota;
    }

    /// Returns the number of records in a collection.
    #[must_use]
    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .get(collection)
            .map_or(0, Vec::len)
    }

    /// Returns true if the collection holds no records.
    #[must_use]
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    /// Removes every record from every collection.
    pub fn clear(&self) {
        self.collections.lock().clear();
    }
}

impl LocalStore for MemoryStore {
    fn load_all(&self, collection: &str) -> StoreResult<Vec<Record>> {
        Ok(self
            .collections
            .lock()
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    fn append(&self, collection: &str, record: Record) -> StoreResult<()> {
        let quota = *self.quota.lock();
        let mut collections = self.collections.lock();
        let records = collections.entry(collection.to_owned()).or_default();

        if let Some(limit) = quota {
            if records.len() >= limit {
                return Err(StoreError::quota_exceeded(format!(
                    "collection '{collection}' holds {limit} records"
                )));
            }
        }

        records.insert(0, record);
        Ok(())
    }

    fn replace_by_id(&self, collection: &str, id: &RecordId, record: Record) -> StoreResult<()> {
        let mut collections = self.collections.lock();
        if let Some(records) = collections.get_mut(collection) {
            if let Some(slot) = records.iter_mut().find(|r| &r.id == id) {
                *slot = record;
            }
        }
        Ok(())
    }

    fn remove_by_id(&self, collection: &str, id: &RecordId) -> StoreResult<()> {
        let mut collections = self.collections.lock();
        if let Some(records) = collections.get_mut(collection) {
            records.retain(|r| &r.id != id);
        }
        Ok(())
    }

    fn migrate_identity(
        &self,
        collection: &str,
        old_id: &RecordId,
        new_id: RecordId,
    ) -> StoreResult<bool> {
        let mut collections = self.collections.lock();
        let Some(records) = collections.get_mut(collection) else {
            return Ok(false);
        };
        match records.iter_mut().find(|r| &r.id == old_id) {
            Some(record) => {
                record.id = new_id;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
