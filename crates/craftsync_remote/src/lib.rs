//! # CraftSync Remote
//!
//! Timeout-bounded remote synchronization client for CraftSync.
//!
//! Every call against the remote document store races a fixed timeout, so
//! remote unavailability never blocks the caller indefinitely. The loser of
//! the race is discarded. Reads, creates and updates *degrade* on timeout
//! or transport failure instead of raising; deletes propagate errors, since
//! a silently-failed delete leaves a ghost record visible forever.
//!
//! ## Layers
//!
//! - [`RemoteBackend`] - the managed document store, abstracted for
//!   different implementations (HTTP backends, mocks for testing)
//! - [`RemoteClient`] - the bounded, degrade-on-failure wrapper callers use
//! - [`MockRemote`] - an in-memory backend with controllable latency and
//!   failure for tests

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod client;
mod error;
mod mock;

pub use backend::{RemoteBackend, RemoteQuery};
pub use client::{DegradeReason, RemoteClient, RemoteConfig, RemoteOutcome, DEFAULT_TIMEOUT};
pub use error::{RemoteError, RemoteResult};
pub use mock::MockRemote;
