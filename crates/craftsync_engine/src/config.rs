//! Configuration for the catalog facade.

use craftsync_model::Fields;
use serde_json::Value;
use std::time::Duration;

/// Default bound on detached background sync tasks.
///
/// More generous than the caller-facing remote timeout: nothing awaits
/// these tasks, so a create that resolves late still lands as an
/// identity migration instead of being abandoned.
pub const DEFAULT_SYNC_TIMEOUT: Duration = Duration::from_secs(30);

/// When the catalog substitutes the seed dataset for an empty merge.
///
/// A merged view can be empty because the collection is genuinely empty
/// or because the remote store was unreachable while the local store held
/// nothing. The policy keeps that distinction explicit; the default never
/// substitutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedPolicy {
    /// Never substitute; report `Empty` or `Unavailable`. The default.
    #[default]
    Never,
    /// Substitute only when the remote fetch degraded.
    OnUnavailable,
    /// Substitute whenever the merge is empty. Demo-resilience behavior:
    /// the view never shows a bare empty state.
    OnEmptyOrUnavailable,
}

impl SeedPolicy {
    /// Returns whether the policy substitutes seeds for an empty merge
    /// with the given remote degradation state.
    #[must_use]
    pub fn applies(self, remote_degraded: bool) -> bool {
        match self {
            Self::Never => false,
            Self::OnUnavailable => remote_degraded,
            Self::OnEmptyOrUnavailable => true,
        }
    }
}

/// A default field applied to new records in one collection.
#[derive(Debug, Clone)]
struct DefaultField {
    collection: String,
    key: String,
    value: Value,
}

/// Configuration for a [`Catalog`](crate::Catalog).
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Seed substitution policy for empty merged views.
    pub seed_policy: SeedPolicy,
    /// Bound on detached background sync tasks.
    pub sync_timeout: Duration,
    defaults: Vec<DefaultField>,
}

impl CatalogConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            seed_policy: SeedPolicy::default(),
            sync_timeout: DEFAULT_SYNC_TIMEOUT,
            defaults: Vec::new(),
        }
    }

    /// Sets the seed policy.
    #[must_use]
    pub fn with_seed_policy(mut self, policy: SeedPolicy) -> Self {
        self.seed_policy = policy;
        self
    }

    /// Sets the background sync bound.
    #[must_use]
    pub fn with_sync_timeout(mut self, timeout: Duration) -> Self {
        self.sync_timeout = timeout;
        self
    }

    /// Registers a default value for a field of new records in the given
    /// collection, applied when the field is missing or empty at create
    /// time (e.g. a placeholder image for products submitted without one).
    #[must_use]
    pub fn with_default_field(
        mut self,
        collection: impl Into<String>,
        key: impl Into<String>,
        value: Value,
    ) -> Self {
        self.defaults.push(DefaultField {
            collection: collection.into(),
            key: key.into(),
            value,
        });
        self
    }

    /// Fills missing or empty fields of a new record from the registered
    /// defaults.
    pub(crate) fn apply_defaults(&self, collection: &str, fields: &mut Fields) {
        for default in &self.defaults {
            if default.collection != collection {
                continue;
            }
            let empty = match fields.get(&default.key) {
                None => true,
                Some(Value::String(s)) => s.is_empty(),
                Some(Value::Array(a)) => a.is_empty(),
                Some(_) => false,
            };
            if empty {
                fields.insert(default.key.clone(), default.value.clone());
            }
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::new()
    }
}
