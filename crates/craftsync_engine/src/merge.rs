//! Merge and dedup of local and remote record sets.

use craftsync_model::{FilterSpec, Record, SortOrder};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Combines local and remote record sets into a single duplicate-free
/// list.
///
/// Local records seed the result in local-storage order; remote records
/// are added only when their id is unseen. A local record is never
/// overwritten by a remote record with the same id: if the ids match,
/// the local copy was already confirmed as synced and may carry a
/// fresher in-flight edit. The id-rename case is handled separately by
/// identity migration, so no duplicate window exists after a migration
/// completes.
#[must_use]
pub fn merge_records(local: Vec<Record>, remote: Vec<Record>) -> Vec<Record> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for record in local.into_iter().chain(remote) {
        if seen.insert(record.id.clone()) {
            merged.push(record);
        }
    }

    merged
}

/// Applies the caller's filter and sort as a final pass over a merged
/// set. Filtering happens after merge, never before, so local-only
/// records are always filter-eligible.
#[must_use]
pub fn apply_view(records: Vec<Record>, filter: &FilterSpec) -> Vec<Record> {
    let mut view: Vec<Record> = records
        .into_iter()
        .filter(|record| filter.matches(record))
        .collect();

    view.sort_by(|a, b| compare(a, b, filter.sort));
    view
}

fn compare(a: &Record, b: &Record, sort: SortOrder) -> Ordering {
    match sort {
        SortOrder::NewestFirst => b.order_key().cmp(&a.order_key()),
        SortOrder::OldestFirst => a.order_key().cmp(&b.order_key()),
        SortOrder::PriceLowHigh => a
            .number("price")
            .partial_cmp(&b.number("price"))
            .unwrap_or(Ordering::Equal),
        SortOrder::PriceHighLow => b
            .number("price")
            .partial_cmp(&a.number("price"))
            .unwrap_or(Ordering::Equal),
    }
}
