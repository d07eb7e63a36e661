//! In-memory remote backend with controllable behavior, for tests.

use crate::backend::{RemoteBackend, RemoteQuery};
use crate::error::{RemoteError, RemoteResult};
use async_trait::async_trait;
use craftsync_model::{Fields, Record, RecordId, Stamp};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

/// A mock remote document store.
///
/// Latency and availability are controllable per test: every call sleeps
/// the configured latency first (so a client timeout can win the race),
/// and an offline mock fails every call with a transport error. Created
/// records get server-assigned `srv-N` ids and server timestamps.
#[derive(Debug, Default)]
pub struct MockRemote {
    collections: Mutex<HashMap<String, Vec<Record>>>,
    latency: Mutex<Duration>,
    offline: AtomicBool,
    next_id: AtomicU64,
    calls: Mutex<Vec<String>>,
}

impl MockRemote {
    /// Creates a healthy mock with zero latency.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the artificial latency applied to every call.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock() = latency;
    }

    /// Sets whether every call fails with a transport error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Seeds a record directly, bypassing latency and logging.
    pub fn seed(&self, collection: &str, record: Record) {
        self.collections
            .lock()
            .entry(collection.to_owned())
            .or_default()
            .push(record);
    }

    /// Returns a snapshot of a collection's records.
    #[must_use]
    pub fn records(&self, collection: &str) -> Vec<Record> {
        self.collections
            .lock()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the log of calls made against this mock.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Applies latency, records the call, and checks availability.
    async fn admit(&self, call: impl Into<String>) -> RemoteResult<()> {
        let latency = *self.latency.lock();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        self.calls.lock().push(call.into());
        if self.offline.load(Ordering::SeqCst) {
            return Err(RemoteError::transport_retryable("remote unreachable"));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteBackend for MockRemote {
    async fn fetch_collection(
        &self,
        collection: &str,
        query: &RemoteQuery,
    ) -> RemoteResult<Vec<Record>> {
        self.admit(format!("fetch_collection:{collection}")).await?;

        let mut records = self.records(collection);
        records.retain(|record| {
            query
                .equals
                .iter()
                .all(|(field, value)| record.fields.get(field) == Some(value))
        });

        if let Some(field) = &query.order_by {
            match field.as_str() {
                "createdAt" => records.sort_by_key(|r| std::cmp::Reverse(r.created_at.as_millis())),
                "updatedAt" => records.sort_by_key(|r| std::cmp::Reverse(r.updated_at.as_millis())),
                other => {
                    let key = other.to_owned();
                    records.sort_by(|a, b| {
                        b.number(&key)
                            .partial_cmp(&a.number(&key))
                            .unwrap_or(std::cmp::Ordering::Equal)
                    });
                }
            }
        }

        if let Some(limit) = query.limit {
            records.truncate(limit);
        }

        Ok(records)
    }

    async fn fetch_by_id(
        &self,
        collection: &str,
        id: &RecordId,
    ) -> RemoteResult<Option<Record>> {
        self.admit(format!("fetch_by_id:{collection}:{id}")).await?;
        Ok(self
            .records(collection)
            .into_iter()
            .find(|record| &record.id == id))
    }

    async fn create_record(&self, collection: &str, fields: Fields) -> RemoteResult<RecordId> {
        self.admit(format!("create_record:{collection}")).await?;

        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let id = RecordId::remote(format!("srv-{n}"));
        let now = Stamp::server_now();
        let record = Record::with_id(id.clone(), fields, now, now);

        self.collections
            .lock()
            .entry(collection.to_owned())
            .or_default()
            .insert(0, record);
        Ok(id)
    }

    async fn update_record(
        &self,
        collection: &str,
        id: &RecordId,
        fields: Fields,
    ) -> RemoteResult<()> {
        self.admit(format!("update_record:{collection}:{id}")).await?;

        let mut collections = self.collections.lock();
        let record = collections
            .get_mut(collection)
            .and_then(|records| records.iter_mut().find(|r| &r.id == id))
            .ok_or_else(|| RemoteError::Backend(format!("no such record: {id}")))?;

        for (key, value) in fields {
            record.fields.insert(key, value);
        }
        record.updated_at = Stamp::server_now();
        Ok(())
    }

    async fn delete_record(&self, collection: &str, id: &RecordId) -> RemoteResult<()> {
        self.admit(format!("delete_record:{collection}:{id}")).await?;

        // Idempotent: deleting an absent record succeeds.
        if let Some(records) = self.collections.lock().get_mut(collection) {
            records.retain(|r| &r.id != id);
        }
        Ok(())
    }
}
