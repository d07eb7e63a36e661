//! # CraftSync Store
//!
//! Local record store for CraftSync.
//!
//! The local store is the durability backstop of the sync layer: records
//! created while the remote store is unreachable live here until the next
//! successful sync, and read operations never lose them.
//!
//! ## Design Principles
//!
//! - Synchronous and always available: operations do not suspend
//! - Read-path corruption recovers to empty, never raises
//! - Write-path failures surface loudly, since silently dropping the
//!   durability backstop defeats its purpose
//! - Identity migration is a single transactional entry rewrite
//!
//! ## Available Stores
//!
//! - [`MemoryStore`] - For testing and ephemeral use
//! - [`FileStore`] - Persistent JSON-document store
//!
//! ## Example
//!
//! ```rust
//! use craftsync_model::{Fields, Record};
//! use craftsync_store::{LocalStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let record = Record::new_local(Fields::new());
//! store.append("products", record.clone()).unwrap();
//! assert_eq!(store.load_all("products").unwrap(), vec![record]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod file;
mod memory;
mod store;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::LocalStore;
