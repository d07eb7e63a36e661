//! File-based local store for persistent storage.

use crate::error::StoreResult;
use crate::store::LocalStore;
use craftsync_model::{Record, RecordId};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

type Collections = HashMap<String, Vec<Record>>;

/// A file-based local store.
///
/// The entire store is one JSON document mapping collection names to
/// record lists, the persistent analogue of a browser's local storage.
/// Data survives process restarts.
///
/// # Durability
///
/// Every mutation serializes the full document to a sibling temp file and
/// atomically renames it over the store path, so a crash mid-write leaves
/// the previous document intact.
///
/// # Recovery
///
/// A missing file reads as an empty store. A malformed document is
/// logged and treated as empty rather than raising; the read path never
/// fails on corruption.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    state: Mutex<Collections>,
}

impl FileStore {
    /// Opens or creates a file store at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read. A file
    /// that reads but does not parse recovers as an empty store.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let state = if path.exists() {
            let raw = fs::read_to_string(path)?;
            match serde_json::from_str::<Collections>(&raw) {
                Ok(collections) => collections,
                Err(error) => {
                    warn!(path = %path.display(), %error, "store document malformed, starting empty");
                    Collections::new()
                }
            }
        } else {
            Collections::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            state: Mutex::new(state),
        })
    }

    /// Opens or creates a file store, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created or the file
    /// cannot be read.
    pub fn open_with_create_dirs(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Self::open(path)
    }

    /// Returns the path to the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes the document and atomically replaces the store file.
    ///
    /// Called with the state lock held, so persisted documents never
    /// interleave between two mutations.
    fn persist(&self, state: &Collections) -> StoreResult<()> {
        let encoded = serde_json::to_vec_pretty(state)?;
        let tmp = self.path.with_extension("tmp");

        let mut file = fs::File::create(&tmp)?;
        file.write_all(&encoded)?;
        file.sync_all()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl LocalStore for FileStore {
    fn load_all(&self, collection: &str) -> StoreResult<Vec<Record>> {
        Ok(self
            .state
            .lock()
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    // Mutations build the next document on a copy, persist it, and only
    // then swap it in, so a failed persist leaves the in-memory state
    // matching the file on disk.

    fn append(&self, collection: &str, record: Record) -> StoreResult<()> {
        let mut state = self.state.lock();
        let mut next = state.clone();
        next.entry(collection.to_owned())
            .or_default()
            .insert(0, record);
        self.persist(&next)?;
        *state = next;
        Ok(())
    }

    fn replace_by_id(&self, collection: &str, id: &RecordId, record: Record) -> StoreResult<()> {
        let mut state = self.state.lock();
        let mut next = state.clone();
        let mut changed = false;
        if let Some(records) = next.get_mut(collection) {
            if let Some(slot) = records.iter_mut().find(|r| &r.id == id) {
                *slot = record;
                changed = true;
            }
        }
        if changed {
            self.persist(&next)?;
            *state = next;
        }
        Ok(())
    }

    fn remove_by_id(&self, collection: &str, id: &RecordId) -> StoreResult<()> {
        let mut state = self.state.lock();
        let mut next = state.clone();
        let mut changed = false;
        if let Some(records) = next.get_mut(collection) {
            let before = records.len();
            records.retain(|r| &r.id != id);
            changed = records.len() != before;
        }
        if changed {
            self.persist(&next)?;
            *state = next;
        }
        Ok(())
    }

    fn migrate_identity(
        &self,
        collection: &str,
        old_id: &RecordId,
        new_id: RecordId,
    ) -> StoreResult<bool> {
        let mut state = self.state.lock();
        let mut next = state.clone();
        let Some(record) = next
            .get_mut(collection)
            .and_then(|records| records.iter_mut().find(|r| &r.id == old_id))
        else {
            return Ok(false);
        };
        record.id = new_id;
        self.persist(&next)?;
        *state = next;
        Ok(true)
    }
}
