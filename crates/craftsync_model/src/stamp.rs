//! Timestamp representations.
//!
//! Local writes stamp records with plain epoch milliseconds, because the
//! local store cannot serialize the remote store's opaque server-timestamp
//! sentinel. Remote writes carry a server-assigned `{seconds, nanos}` pair.
//! The merge comparator treats both as comparable by coercing to millis.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// A record timestamp in one of its two wire representations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Stamp {
    /// Plain epoch milliseconds, stamped by local writes.
    Millis(i64),
    /// Server-assigned timestamp, stamped by remote writes.
    Server {
        /// Whole seconds since the epoch.
        seconds: i64,
        /// Sub-second nanoseconds.
        nanos: u32,
    },
}

impl Stamp {
    /// Returns the current wall-clock time as a local stamp.
    #[must_use]
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64;
        Self::Millis(millis)
    }

    /// Returns the current wall-clock time as a server stamp.
    ///
    /// Used by fake remote backends; a real backend receives this from
    /// the remote store itself.
    #[must_use]
    pub fn server_now() -> Self {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self::Server {
            seconds: elapsed.as_secs() as i64,
            nanos: elapsed.subsec_nanos(),
        }
    }

    /// Coerces either representation to epoch milliseconds.
    #[must_use]
    pub fn as_millis(self) -> i64 {
        match self {
            Self::Millis(ms) => ms,
            Self::Server { seconds, nanos } => seconds * 1_000 + i64::from(nanos) / 1_000_000,
        }
    }
}

impl Default for Stamp {
    fn default() -> Self {
        Self::Millis(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_coercion_is_identity() {
        assert_eq!(Stamp::Millis(1_700_000_000_000).as_millis(), 1_700_000_000_000);
    }

    #[test]
    fn server_coercion_to_millis() {
        let stamp = Stamp::Server {
            seconds: 1_700_000_000,
            nanos: 500_000_000,
        };
        assert_eq!(stamp.as_millis(), 1_700_000_000_500);
    }

    #[test]
    fn mixed_representations_compare() {
        let local = Stamp::Millis(2_000);
        let remote = Stamp::Server {
            seconds: 1,
            nanos: 0,
        };
        assert!(local.as_millis() > remote.as_millis());
    }

    #[test]
    fn serde_untagged_roundtrip() {
        let local: Stamp = serde_json::from_str("1700000000000").unwrap();
        assert_eq!(local, Stamp::Millis(1_700_000_000_000));

        let remote: Stamp =
            serde_json::from_str(r#"{"seconds": 1700000000, "nanos": 0}"#).unwrap();
        assert_eq!(
            remote,
            Stamp::Server {
                seconds: 1_700_000_000,
                nanos: 0
            }
        );
    }
}
