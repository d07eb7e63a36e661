//! The versioned record entity.

use crate::id::RecordId;
use crate::stamp::Stamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Open map of domain attributes, opaque to the sync layer.
pub type Fields = serde_json::Map<String, Value>;

/// A versioned record as held in the local store and the remote store.
///
/// Domain attributes (title, price, region, ...) live in the open `fields`
/// map; the sync layer only interprets them through the coercing accessors
/// below, which default missing or mistyped values rather than dropping the
/// record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Canonical identifier; local-origin until remote confirmation.
    pub id: RecordId,
    /// Creation time, in either stamp representation.
    #[serde(rename = "createdAt", default)]
    pub created_at: Stamp,
    /// Last update time, in either stamp representation.
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Stamp,
    /// Open domain attributes.
    #[serde(flatten)]
    pub fields: Fields,
}

impl Record {
    /// Creates a record with a fresh local id and local timestamps.
    #[must_use]
    pub fn new_local(fields: Fields) -> Self {
        let now = Stamp::now();
        Self {
            id: RecordId::local(),
            created_at: now,
            updated_at: now,
            fields,
        }
    }

    /// Creates a record with the given id and stamps.
    #[must_use]
    pub fn with_id(id: RecordId, fields: Fields, created_at: Stamp, updated_at: Stamp) -> Self {
        Self {
            id,
            created_at,
            updated_at,
            fields,
        }
    }

    /// Returns a string field, coercing missing or mistyped values to `""`.
    #[must_use]
    pub fn text(&self, key: &str) -> &str {
        self.fields.get(key).and_then(Value::as_str).unwrap_or("")
    }

    /// Returns a numeric field, coercing missing or mistyped values to `0.0`.
    #[must_use]
    pub fn number(&self, key: &str) -> f64 {
        self.fields.get(key).and_then(Value::as_f64).unwrap_or(0.0)
    }

    /// Returns a list field, coercing missing or mistyped values to empty.
    #[must_use]
    pub fn list(&self, key: &str) -> &[Value] {
        self.fields
            .get(key)
            .and_then(Value::as_array)
            .map_or(&[], Vec::as_slice)
    }

    /// The millisecond ordering key: `updated_at`, falling back to
    /// `created_at` when the record was never updated.
    #[must_use]
    pub fn order_key(&self) -> i64 {
        let updated = self.updated_at.as_millis();
        if updated != 0 {
            updated
        } else {
            self.created_at.as_millis()
        }
    }
}
