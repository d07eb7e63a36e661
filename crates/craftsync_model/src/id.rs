//! Record identifiers with provenance.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Prefix marking identifiers generated locally, before the remote store
/// has assigned one.
pub const LOCAL_ID_PREFIX: &str = "local-";

/// Unique identifier for a record.
///
/// Two identifier spaces exist: *local* ids are generated at write time and
/// carry the [`LOCAL_ID_PREFIX`]; *remote* ids are assigned by the remote
/// document store on a successful create. A record's id transitions from
/// local to remote exactly once, via the local store's identity migration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Generates a fresh local identifier.
    #[must_use]
    pub fn local() -> Self {
        Self(format!("{LOCAL_ID_PREFIX}{}", Uuid::new_v4()))
    }

    /// Wraps a remote-assigned identifier.
    pub fn remote(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns true if this id was generated locally and has not yet been
    /// confirmed by the remote store.
    #[must_use]
    pub fn is_local(&self) -> bool {
        self.0.starts_with(LOCAL_ID_PREFIX)
    }

    /// Returns the raw identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
