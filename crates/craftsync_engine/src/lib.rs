//! # CraftSync Engine
//!
//! Merge engine and local-first catalog facade for CraftSync.
//!
//! The [`Catalog`] combines a durable [`LocalStore`](craftsync_store::LocalStore)
//! with a timeout-bounded [`RemoteClient`](craftsync_remote::RemoteClient):
//!
//! - reads merge both sources into a single, duplicate-free, deterministically
//!   ordered view, and never fail on remote unavailability
//! - writes land locally first and return immediately; remote persistence
//!   happens in a detached background task that rewrites the record's
//!   identity once the server assigns an id
//! - deletes are local-authoritative, but a remote delete failure surfaces
//!   to the caller
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use craftsync_engine::{Catalog, CatalogConfig};
//! use craftsync_model::{Fields, FilterSpec};
//! use craftsync_remote::{MockRemote, RemoteClient, RemoteConfig};
//! use craftsync_store::MemoryStore;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = Arc::new(MemoryStore::new());
//! let remote = RemoteClient::new(Arc::new(MockRemote::new()), RemoteConfig::new());
//! let catalog = Catalog::new(store, remote, CatalogConfig::new());
//!
//! let mut fields = Fields::new();
//! fields.insert("title".into(), "Terracotta Vase".into());
//! let record = catalog.create_record("products", fields).await.unwrap();
//! assert!(record.id.is_local());
//!
//! catalog.wait_for_sync().await;
//! let view = catalog.list_records("products", &FilterSpec::new()).await;
//! assert_eq!(view.records.len(), 1);
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod config;
mod error;
mod merge;
mod seed;

pub use catalog::{Catalog, ListOutcome, ListSource};
pub use config::{CatalogConfig, SeedPolicy, DEFAULT_SYNC_TIMEOUT};
pub use error::{CatalogError, CatalogResult};
pub use merge::{apply_view, merge_records};
pub use seed::seed_records;
