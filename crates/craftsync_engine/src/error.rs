//! Error types for the catalog facade.

use craftsync_remote::RemoteError;
use craftsync_store::StoreError;
use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that cross the catalog boundary.
///
/// Transient remote unavailability never appears here: reads degrade and
/// background writes are logged. Only the two failure classes that need
/// deliberate handling surface: the local durability backstop failing,
/// and a remote delete that could not be confirmed.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The local store, the durability backstop, failed a write.
    #[error("local store error: {0}")]
    Store(#[from] StoreError),

    /// The record was removed locally but the remote delete failed; it
    /// will reappear from the remote side on a future merge unless the
    /// delete is repeated.
    #[error("remote delete failed: {0}")]
    RemoteDelete(#[source] RemoteError),
}
