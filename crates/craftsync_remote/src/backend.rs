//! Remote document store abstraction.

use crate::error::RemoteResult;
use async_trait::async_trait;
use craftsync_model::{Fields, Record, RecordId};
use serde_json::Value;

/// A query against a remote collection.
///
/// Covers the narrow contract the sync layer consumes from the remote
/// store: equality filters, an order-by field, and a limit.
#[derive(Debug, Clone, Default)]
pub struct RemoteQuery {
    /// Field/value equality constraints, all of which must hold.
    pub equals: Vec<(String, Value)>,
    /// Field to order results by, descending.
    pub order_by: Option<String>,
    /// Maximum number of records to return.
    pub limit: Option<usize>,
}

impl RemoteQuery {
    /// Creates a query with no constraints.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality constraint.
    #[must_use]
    pub fn with_equals(mut self, field: impl Into<String>, value: Value) -> Self {
        self.equals.push((field.into(), value));
        self
    }

    /// Sets the order-by field.
    #[must_use]
    pub fn with_order_by(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(field.into());
        self
    }

    /// Sets the result limit.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// The remote document store, treated as opaque.
///
/// This trait abstracts the managed database behind the sync layer,
/// allowing different implementations (an HTTP-backed store in the
/// application, [`MockRemote`](crate::MockRemote) in tests). All methods
/// may take arbitrarily long; bounding them is the
/// [`RemoteClient`](crate::RemoteClient)'s job.
///
/// Update and delete are idempotent from the caller's perspective:
/// calling twice has the same end state.
#[async_trait]
pub trait RemoteBackend: Send + Sync {
    /// Fetches records from a collection matching the query.
    async fn fetch_collection(
        &self,
        collection: &str,
        query: &RemoteQuery,
    ) -> RemoteResult<Vec<Record>>;

    /// Fetches a single record by id, or `None` if absent.
    async fn fetch_by_id(&self, collection: &str, id: &RecordId)
        -> RemoteResult<Option<Record>>;

    /// Creates a record, returning the server-assigned id. The server
    /// stamps creation and update times itself.
    async fn create_record(&self, collection: &str, fields: Fields) -> RemoteResult<RecordId>;

    /// Merges fields into an existing record and bumps its update stamp.
    async fn update_record(
        &self,
        collection: &str,
        id: &RecordId,
        fields: Fields,
    ) -> RemoteResult<()>;

    /// Deletes a record. Deleting an absent record succeeds.
    async fn delete_record(&self, collection: &str, id: &RecordId) -> RemoteResult<()>;
}
