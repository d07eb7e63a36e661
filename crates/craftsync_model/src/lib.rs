//! # CraftSync Model
//!
//! Shared record model for CraftSync.
//!
//! This crate provides:
//! - [`RecordId`] with local/remote provenance
//! - [`Stamp`] for the two timestamp representations records carry
//! - [`Record`] with an open field map
//! - [`FilterSpec`] and [`SortOrder`] for post-merge views
//!
//! This is a pure types crate with no I/O operations.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod filter;
mod id;
mod record;
mod stamp;

pub use filter::{FilterSpec, SortOrder};
pub use id::{RecordId, LOCAL_ID_PREFIX};
pub use record::{Fields, Record};
pub use stamp::Stamp;
