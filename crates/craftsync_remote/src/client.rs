//! The bounded remote client.

use crate::backend::{RemoteBackend, RemoteQuery};
use crate::error::{RemoteError, RemoteResult};
use craftsync_model::{Fields, Record, RecordId};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Default bound on every remote call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Configuration for the remote client.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Maximum time any single remote call may take before it is treated
    /// as failed for the caller's control flow.
    pub timeout: Duration,
}

impl RemoteConfig {
    /// Creates a configuration with the default timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the timeout bound.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Why a remote call degraded instead of returning data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradeReason {
    /// The bounded timeout elapsed first.
    Timeout,
    /// The transport failed before the timeout.
    Transport(String),
    /// The remote store rejected the request.
    Backend(String),
}

impl From<&RemoteError> for DegradeReason {
    fn from(error: &RemoteError) -> Self {
        match error {
            RemoteError::Timeout(_) => Self::Timeout,
            RemoteError::Transport { message, .. } => Self::Transport(message.clone()),
            RemoteError::Backend(message) => Self::Backend(message.clone()),
        }
    }
}

/// The explicit result of a degradable remote call.
///
/// Degradation is a first-class outcome rather than a swallowed
/// exception, so the merge engine's decision to proceed with an empty
/// remote set is a testable branch.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteOutcome<T> {
    /// The remote store answered within the bound.
    Available(T),
    /// The call was abandoned; the caller proceeds without remote data.
    Degraded(DegradeReason),
}

impl<T> RemoteOutcome<T> {
    /// Returns true if the call degraded.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded(_))
    }

    /// Converts into the available value, if any.
    #[must_use]
    pub fn available(self) -> Option<T> {
        match self {
            Self::Available(value) => Some(value),
            Self::Degraded(_) => None,
        }
    }

    /// Returns the available value or the given default.
    #[must_use]
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Available(value) => value,
            Self::Degraded(_) => default,
        }
    }
}

/// Time-bounded client over a [`RemoteBackend`].
///
/// Every call races the backend against a timer; the loser is discarded.
/// Reads, creates and updates degrade on failure; deletes propagate
/// errors, since a silently-failed delete leaves a ghost record that
/// reappears on the next merge.
#[derive(Clone)]
pub struct RemoteClient {
    backend: Arc<dyn RemoteBackend>,
    config: RemoteConfig,
}

impl RemoteClient {
    /// Creates a client over the given backend.
    pub fn new(backend: Arc<dyn RemoteBackend>, config: RemoteConfig) -> Self {
        Self { backend, config }
    }

    /// Returns a client sharing the same backend with a different bound.
    ///
    /// Detached background sync uses a more generous bound than the
    /// caller-facing one, so a create that resolves late still lands as
    /// an identity migration.
    #[must_use]
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            config: self.config.clone().with_timeout(timeout),
        }
    }

    /// Returns the configured timeout bound.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    /// Runs a backend future under the bound, mapping elapsed timers to
    /// [`RemoteError::Timeout`].
    async fn bounded<T>(
        &self,
        future: impl Future<Output = RemoteResult<T>>,
    ) -> RemoteResult<T> {
        match tokio::time::timeout(self.config.timeout, future).await {
            Ok(result) => result,
            Err(_) => Err(RemoteError::Timeout(self.config.timeout)),
        }
    }

    /// Runs a degradable call: failures become [`RemoteOutcome::Degraded`]
    /// and are logged, never raised.
    async fn degradable<T>(
        &self,
        operation: &str,
        collection: &str,
        future: impl Future<Output = RemoteResult<T>>,
    ) -> RemoteOutcome<T> {
        match self.bounded(future).await {
            Ok(value) => RemoteOutcome::Available(value),
            Err(error) => {
                warn!(operation, collection, %error, "remote call degraded");
                RemoteOutcome::Degraded(DegradeReason::from(&error))
            }
        }
    }

    /// Fetches a collection; degrades to empty on timeout or failure.
    pub async fn fetch_collection(
        &self,
        collection: &str,
        query: &RemoteQuery,
    ) -> RemoteOutcome<Vec<Record>> {
        self.degradable(
            "fetch_collection",
            collection,
            self.backend.fetch_collection(collection, query),
        )
        .await
    }

    /// Fetches a record by id; degrades to absent on timeout or failure.
    pub async fn fetch_by_id(
        &self,
        collection: &str,
        id: &RecordId,
    ) -> RemoteOutcome<Option<Record>> {
        self.degradable(
            "fetch_by_id",
            collection,
            self.backend.fetch_by_id(collection, id),
        )
        .await
    }

    /// Creates a record; degrades to "not yet synced" on timeout or
    /// failure. The caller leaves the record local-only.
    pub async fn create_record(
        &self,
        collection: &str,
        fields: Fields,
    ) -> RemoteOutcome<RecordId> {
        self.degradable(
            "create_record",
            collection,
            self.backend.create_record(collection, fields),
        )
        .await
    }

    /// Updates a record; degrades on timeout or failure.
    pub async fn update_record(
        &self,
        collection: &str,
        id: &RecordId,
        fields: Fields,
    ) -> RemoteOutcome<()> {
        self.degradable(
            "update_record",
            collection,
            self.backend.update_record(collection, id, fields),
        )
        .await
    }

    /// Deletes a record. Unlike the other operations this propagates
    /// timeout and transport errors: delete failures need deliberate
    /// handling by the caller.
    pub async fn delete_record(&self, collection: &str, id: &RecordId) -> RemoteResult<()> {
        self.bounded(self.backend.delete_record(collection, id))
            .await
    }
}
