//! The local-first catalog facade.

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::merge::{apply_view, merge_records};
use crate::seed::seed_records;
use craftsync_model::{Fields, FilterSpec, Record, RecordId, Stamp};
use craftsync_remote::{RemoteClient, RemoteOutcome, RemoteQuery};
use craftsync_store::LocalStore;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::{debug, error, warn};

/// Where the records of a [`ListOutcome`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListSource {
    /// The merged local/remote view holds records.
    Populated,
    /// Both sources answered and the collection is genuinely empty.
    Empty,
    /// The local store was empty and the remote fetch degraded; the
    /// collection may hold records that could not be reached.
    Unavailable,
    /// The seed dataset was substituted per the configured policy.
    Seeded,
}

/// The never-failing result of a list operation.
#[derive(Debug, Clone)]
pub struct ListOutcome {
    /// The merged, filtered, ordered records.
    pub records: Vec<Record>,
    /// How the view was produced, so callers can distinguish a genuinely
    /// empty collection from a total outage.
    pub source: ListSource,
}

/// Counts an in-flight background sync task; dropping the guard marks
/// completion and wakes quiescence waiters.
struct SyncGuard {
    pending: Arc<AtomicUsize>,
    quiescent: Arc<Notify>,
}

impl SyncGuard {
    fn new(pending: Arc<AtomicUsize>, quiescent: Arc<Notify>) -> Self {
        pending.fetch_add(1, Ordering::SeqCst);
        Self { pending, quiescent }
    }
}

impl Drop for SyncGuard {
    fn drop(&mut self) {
        if self.pending.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.quiescent.notify_waiters();
        }
    }
}

/// Local-first catalog over a durable local store and a bounded remote
/// client.
///
/// Reads merge both sources and never fail; writes land locally first
/// and sync to the remote store in detached background tasks. The store
/// and remote client are injected, so tests run against in-memory fakes
/// with controllable latency and failure.
pub struct Catalog {
    store: Arc<dyn LocalStore>,
    remote: RemoteClient,
    config: CatalogConfig,
    pending: Arc<AtomicUsize>,
    quiescent: Arc<Notify>,
}

impl Catalog {
    /// Creates a catalog over the given store and remote client.
    pub fn new(store: Arc<dyn LocalStore>, remote: RemoteClient, config: CatalogConfig) -> Self {
        Self {
            store,
            remote,
            config,
            pending: Arc::new(AtomicUsize::new(0)),
            quiescent: Arc::new(Notify::new()),
        }
    }

    /// Lists records for a collection: local and remote sets merged,
    /// deduplicated, filtered and ordered. Never fails; remote
    /// unavailability degrades to a local-only view.
    pub async fn list_records(&self, collection: &str, filter: &FilterSpec) -> ListOutcome {
        let local = self.local_records(collection);
        let remote = self
            .remote
            .fetch_collection(collection, &RemoteQuery::new())
            .await;
        let remote_degraded = remote.is_degraded();

        let merged = merge_records(local, remote.unwrap_or(Vec::new()));
        if !merged.is_empty() {
            return ListOutcome {
                records: apply_view(merged, filter),
                source: ListSource::Populated,
            };
        }

        if self.config.seed_policy.applies(remote_degraded) {
            debug!(collection, "substituting seed dataset for empty merge");
            return ListOutcome {
                records: apply_view(seed_records(collection), filter),
                source: ListSource::Seeded,
            };
        }

        ListOutcome {
            records: Vec::new(),
            source: if remote_degraded {
                ListSource::Unavailable
            } else {
                ListSource::Empty
            },
        }
    }

    /// Lists the first `count` records of the default view.
    pub async fn get_featured(&self, collection: &str, count: usize) -> ListOutcome {
        let mut outcome = self.list_records(collection, &FilterSpec::new()).await;
        outcome.records.truncate(count);
        outcome
    }

    /// Fetches one record: local store first, then the bounded remote
    /// store, then the seed dataset when the policy allows it. Never
    /// fails; an unreachable remote degrades to absent.
    pub async fn get_record(&self, collection: &str, id: &RecordId) -> Option<Record> {
        match self.store.find_by_id(collection, id) {
            Ok(Some(record)) => return Some(record),
            Ok(None) => {}
            Err(e) => warn!(collection, %id, error = %e, "local read failed, treating as absent"),
        }

        let outcome = self.remote.fetch_by_id(collection, id).await;
        let remote_degraded = outcome.is_degraded();
        if let RemoteOutcome::Available(Some(record)) = outcome {
            return Some(record);
        }

        if self.config.seed_policy.applies(remote_degraded) {
            return seed_records(collection)
                .into_iter()
                .find(|record| &record.id == id);
        }
        None
    }

    /// Creates a record: stamped with local timestamps and a local id,
    /// persisted locally (errors surface, since the local store is the
    /// durability backstop), returned immediately. Remote persistence
    /// runs in a detached task that migrates the record's identity to
    /// the server-assigned id on success; a failed or timed-out sync
    /// leaves the record local-only and is not retried.
    pub async fn create_record(
        &self,
        collection: &str,
        mut fields: Fields,
    ) -> CatalogResult<Record> {
        self.config.apply_defaults(collection, &mut fields);
        let record = Record::new_local(fields);
        self.store.append(collection, record.clone())?;

        self.spawn_remote_create(collection.to_owned(), record.clone());
        Ok(record)
    }

    /// Updates a record in place locally, bumping its update stamp, and
    /// pushes the change to the remote store in a detached best-effort
    /// task when the id is remote-origin. Returns `None` if the record
    /// is not present locally.
    pub async fn update_record(
        &self,
        collection: &str,
        id: &RecordId,
        fields: Fields,
    ) -> CatalogResult<Option<Record>> {
        let Some(mut record) = self.store.find_by_id(collection, id)? else {
            return Ok(None);
        };

        for (key, value) in fields.clone() {
            record.fields.insert(key, value);
        }
        record.updated_at = Stamp::now();
        self.store.replace_by_id(collection, id, record.clone())?;

        if !id.is_local() {
            self.spawn_remote_update(collection.to_owned(), id.clone(), fields);
        }
        Ok(Some(record))
    }

    /// Deletes a record. The local removal is authoritative and is never
    /// rolled back; a failed remote delete surfaces as
    /// [`CatalogError::RemoteDelete`] so the caller can warn the user
    /// that the record may reappear from the remote side.
    pub async fn delete_record(&self, collection: &str, id: &RecordId) -> CatalogResult<()> {
        self.store.remove_by_id(collection, id)?;

        if !id.is_local() {
            self.remote
                .delete_record(collection, id)
                .await
                .map_err(CatalogError::RemoteDelete)?;
        }
        Ok(())
    }

    /// Returns true when no background sync task is in flight.
    #[must_use]
    pub fn synced(&self) -> bool {
        self.pending.load(Ordering::SeqCst) == 0
    }

    /// Waits until every background sync task spawned so far has
    /// completed. Useful for tests and for callers that need to close
    /// the create-to-migration window deterministically.
    pub async fn wait_for_sync(&self) {
        loop {
            if self.synced() {
                return;
            }
            let notified = self.quiescent.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.synced() {
                return;
            }
            notified.await;
        }
    }

    fn local_records(&self, collection: &str) -> Vec<Record> {
        match self.store.load_all(collection) {
            Ok(records) => records,
            Err(e) => {
                // Read path never raises; degrade to empty.
                warn!(collection, error = %e, "local read failed, treating as empty");
                Vec::new()
            }
        }
    }

    fn spawn_remote_create(&self, collection: String, record: Record) {
        let store = Arc::clone(&self.store);
        let client = self.remote.with_timeout(self.config.sync_timeout);
        let guard = SyncGuard::new(Arc::clone(&self.pending), Arc::clone(&self.quiescent));

        tokio::spawn(async move {
            let _guard = guard;
            match client
                .create_record(&collection, record.fields.clone())
                .await
            {
                RemoteOutcome::Available(remote_id) => {
                    match store.migrate_identity(&collection, &record.id, remote_id.clone()) {
                        Ok(true) => {
                            debug!(%collection, local_id = %record.id, %remote_id, "record confirmed remotely");
                        }
                        Ok(false) => {
                            // The record was deleted locally while the
                            // create was in flight; undo the remote copy
                            // so the deletion holds on both sides.
                            match client.delete_record(&collection, &remote_id).await {
                                Ok(()) => {
                                    debug!(%collection, local_id = %record.id, %remote_id, "removed remote copy of record deleted during sync");
                                }
                                Err(e) => {
                                    warn!(%collection, local_id = %record.id, %remote_id, error = %e, "orphaned remote copy left behind");
                                }
                            }
                        }
                        Err(e) => {
                            error!(%collection, local_id = %record.id, error = %e, "identity migration failed");
                        }
                    }
                }
                RemoteOutcome::Degraded(reason) => {
                    warn!(%collection, local_id = %record.id, ?reason, "record left local-only");
                }
            }
        });
    }

    fn spawn_remote_update(&self, collection: String, id: RecordId, fields: Fields) {
        let client = self.remote.with_timeout(self.config.sync_timeout);
        let guard = SyncGuard::new(Arc::clone(&self.pending), Arc::clone(&self.quiescent));

        tokio::spawn(async move {
            let _guard = guard;
            match client.update_record(&collection, &id, fields).await {
                RemoteOutcome::Available(()) => {
                    debug!(%collection, %id, "update confirmed remotely");
                }
                RemoteOutcome::Degraded(reason) => {
                    warn!(%collection, %id, ?reason, "update left local-only");
                }
            }
        });
    }
}
