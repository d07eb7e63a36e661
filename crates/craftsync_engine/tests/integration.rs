//! Integration tests for the catalog over fake local and remote stores.

use craftsync_engine::{Catalog, CatalogConfig, CatalogError, ListSource, SeedPolicy};
use craftsync_model::{Fields, FilterSpec, Record, RecordId};
use craftsync_remote::{MockRemote, RemoteBackend, RemoteClient, RemoteConfig};
use craftsync_store::{LocalStore, MemoryStore};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

fn init_logs() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_test_writer()
        .try_init();
}

fn fields(pairs: &[(&str, Value)]) -> Fields {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), v.clone()))
        .collect()
}

struct Harness {
    store: Arc<MemoryStore>,
    remote: Arc<MockRemote>,
    catalog: Catalog,
}

fn harness(config: CatalogConfig) -> Harness {
    init_logs();
    let store = Arc::new(MemoryStore::new());
    let remote = Arc::new(MockRemote::new());
    let client = RemoteClient::new(
        Arc::clone(&remote) as Arc<dyn RemoteBackend>,
        RemoteConfig::new(),
    );
    let catalog = Catalog::new(Arc::clone(&store) as Arc<dyn LocalStore>, client, config);
    Harness {
        store,
        remote,
        catalog,
    }
}

/// With an empty local store, records the remote answers within the
/// bound make up the whole view.
#[tokio::test(start_paused = true)]
async fn remote_only_collection_lists_fetched_records() {
    let h = harness(CatalogConfig::new());
    h.remote.set_latency(Duration::from_millis(10));
    h.remote
        .create_record("products", fields(&[("title", json!("First"))]))
        .await
        .unwrap();
    h.remote
        .create_record("products", fields(&[("title", json!("Second"))]))
        .await
        .unwrap();

    let view = h.catalog.list_records("products", &FilterSpec::new()).await;
    assert_eq!(view.source, ListSource::Populated);

    let mut ids: Vec<_> = view.records.iter().map(|r| r.id.as_str().to_owned()).collect();
    ids.sort();
    assert_eq!(ids, vec!["srv-1", "srv-2"]);
}

/// A remote store that times out on every call degrades reads to the
/// local view instead of failing them.
#[tokio::test(start_paused = true)]
async fn offline_remote_degrades_to_local_view() {
    let h = harness(CatalogConfig::new());
    h.remote.set_latency(Duration::from_secs(60));

    let mut vase = Record::new_local(fields(&[("title", json!("Vase"))]));
    vase.id = RecordId::remote("local-42");
    h.store.append("products", vase).unwrap();

    let view = h.catalog.list_records("products", &FilterSpec::new()).await;
    assert_eq!(view.source, ListSource::Populated);
    assert_eq!(view.records.len(), 1);
    assert_eq!(view.records[0].id.as_str(), "local-42");
    assert_eq!(view.records[0].text("title"), "Vase");
}

/// A create returns a local-id record immediately; after the background
/// sync the record answers to its server id and the old local id is no
/// longer a lookup key.
#[tokio::test(start_paused = true)]
async fn create_migrates_identity_after_background_sync() {
    let h = harness(CatalogConfig::new());
    h.remote.set_latency(Duration::from_millis(10));

    let created = h
        .catalog
        .create_record("products", fields(&[("title", json!("Bowl"))]))
        .await
        .unwrap();
    assert!(created.id.is_local());

    // Immediately visible under its local id.
    let found = h.catalog.get_record("products", &created.id).await.unwrap();
    assert_eq!(found.text("title"), "Bowl");

    h.catalog.wait_for_sync().await;
    assert!(h.catalog.synced());

    let remote_id = RecordId::remote("srv-1");
    let migrated = h.catalog.get_record("products", &remote_id).await.unwrap();
    assert_eq!(migrated.text("title"), "Bowl");
    assert!(h
        .store
        .find_by_id("products", &created.id)
        .unwrap()
        .is_none());
}

/// Deleting a record while its create is still syncing also removes
/// the copy the remote just accepted, so no ghost record survives the
/// deletion.
#[tokio::test(start_paused = true)]
async fn delete_during_inflight_create_removes_remote_copy() {
    let h = harness(CatalogConfig::new());
    h.remote.set_latency(Duration::from_secs(1));

    let created = h
        .catalog
        .create_record("products", fields(&[("title", json!("Bowl"))]))
        .await
        .unwrap();

    // Delete before the background create lands. The id is still
    // local-origin, so no remote delete happens here.
    h.catalog
        .delete_record("products", &created.id)
        .await
        .unwrap();
    assert!(h.store.is_empty("products"));

    h.catalog.wait_for_sync().await;
    assert!(h.remote.records("products").is_empty());
    assert!(h.store.is_empty("products"));
}

/// Exactly one entry for a migrated record, never two, even though
/// the remote store now also returns it.
#[tokio::test(start_paused = true)]
async fn no_duplicate_after_migration() {
    let h = harness(CatalogConfig::new());

    h.catalog
        .create_record("products", fields(&[("title", json!("Bowl"))]))
        .await
        .unwrap();
    h.catalog.wait_for_sync().await;

    let view = h.catalog.list_records("products", &FilterSpec::new()).await;
    assert_eq!(view.records.len(), 1);
    assert_eq!(view.records[0].id.as_str(), "srv-1");
}

/// With the remote forced to time out, every created record appears
/// in every subsequent list.
#[tokio::test(start_paused = true)]
async fn no_loss_during_total_outage() {
    let h = harness(CatalogConfig::new());
    h.remote.set_latency(Duration::from_secs(3600));

    let mut created = Vec::new();
    for title in ["Vase", "Bowl", "Scarf"] {
        let record = h
            .catalog
            .create_record("products", fields(&[("title", json!(title))]))
            .await
            .unwrap();
        created.push(record.id);

        let view = h.catalog.list_records("products", &FilterSpec::new()).await;
        for id in &created {
            assert!(
                view.records.iter().any(|r| &r.id == id),
                "record {id} missing from list during outage"
            );
        }
    }
}

/// An offline create stays local-only and is not retried by the engine.
#[tokio::test(start_paused = true)]
async fn failed_sync_leaves_record_local_only() {
    let h = harness(CatalogConfig::new());
    h.remote.set_offline(true);

    let created = h
        .catalog
        .create_record("products", fields(&[("title", json!("Vase"))]))
        .await
        .unwrap();
    h.catalog.wait_for_sync().await;

    assert!(h.remote.records("products").is_empty());
    let still_local = h.store.find_by_id("products", &created.id).unwrap().unwrap();
    assert!(still_local.id.is_local());

    // No retry happens behind further reads.
    h.catalog.list_records("products", &FilterSpec::new()).await;
    h.catalog.wait_for_sync().await;
    assert!(h.remote.records("products").is_empty());
}

/// A create slower than the caller-facing bound still migrates once it
/// resolves inside the background task's more generous bound.
#[tokio::test(start_paused = true)]
async fn late_remote_success_still_migrates() {
    let h = harness(CatalogConfig::new().with_sync_timeout(Duration::from_secs(20)));
    h.remote.set_latency(Duration::from_secs(10));

    let created = h
        .catalog
        .create_record("products", fields(&[("title", json!("Vase"))]))
        .await
        .unwrap();
    h.catalog.wait_for_sync().await;

    assert!(h.store.find_by_id("products", &created.id).unwrap().is_none());
    let migrated = h
        .store
        .find_by_id("products", &RecordId::remote("srv-1"))
        .unwrap()
        .unwrap();
    assert_eq!(migrated.text("title"), "Vase");
}

/// Filters run over the merged set, local-only records included.
#[tokio::test(start_paused = true)]
async fn filters_apply_to_merged_set() {
    let h = harness(CatalogConfig::new());

    // Local-only record, never synced.
    h.remote.set_offline(true);
    let cheap = h
        .catalog
        .create_record(
            "products",
            fields(&[("title", json!("Small Bowl")), ("price", json!(50))]),
        )
        .await
        .unwrap();
    h.catalog.wait_for_sync().await;

    // Remote-only record.
    h.remote.set_offline(false);
    h.remote
        .create_record(
            "products",
            fields(&[("title", json!("Grand Tapestry")), ("price", json!(200))]),
        )
        .await
        .unwrap();

    let view = h
        .catalog
        .list_records("products", &FilterSpec::new().with_max_price(100.0))
        .await;
    assert_eq!(view.records.len(), 1);
    assert_eq!(view.records[0].id, cheap.id);

    let search = h
        .catalog
        .list_records("products", &FilterSpec::new().with_search("tapestry"))
        .await;
    assert_eq!(search.records.len(), 1);
    assert_eq!(search.records[0].text("title"), "Grand Tapestry");
}

/// Listing twice with no intervening writes returns the same view.
#[tokio::test(start_paused = true)]
async fn repeated_lists_are_identical() {
    let h = harness(CatalogConfig::new());
    h.remote
        .create_record("products", fields(&[("title", json!("Vase"))]))
        .await
        .unwrap();
    h.catalog
        .create_record("products", fields(&[("title", json!("Bowl"))]))
        .await
        .unwrap();
    h.catalog.wait_for_sync().await;

    let first = h.catalog.list_records("products", &FilterSpec::new()).await;
    let second = h.catalog.list_records("products", &FilterSpec::new()).await;
    assert_eq!(first.records, second.records);
    assert_eq!(first.source, second.source);
}

/// A failed remote delete surfaces, and the local deletion is kept
/// (deletes are local-authoritative).
#[tokio::test(start_paused = true)]
async fn delete_failure_surfaces_and_local_removal_stands() {
    let h = harness(CatalogConfig::new());

    let id = h
        .remote
        .create_record("products", fields(&[("title", json!("Vase"))]))
        .await
        .unwrap();
    let record = h.remote.records("products").remove(0);
    h.store.append("products", record).unwrap();

    h.remote.set_offline(true);
    let err = h.catalog.delete_record("products", &id).await.unwrap_err();
    assert!(matches!(err, CatalogError::RemoteDelete(_)));

    // Local removal is not rolled back; the remote copy remains.
    assert!(h.store.find_by_id("products", &id).unwrap().is_none());
    assert_eq!(h.remote.records("products").len(), 1);
}

/// Deleting a local-origin record needs no remote round trip.
#[tokio::test(start_paused = true)]
async fn local_origin_delete_skips_remote() {
    let h = harness(CatalogConfig::new());
    h.remote.set_offline(true);

    let created = h
        .catalog
        .create_record("products", fields(&[("title", json!("Vase"))]))
        .await
        .unwrap();
    h.catalog.wait_for_sync().await;

    h.catalog.delete_record("products", &created.id).await.unwrap();
    assert!(h.store.is_empty("products"));
}

/// A successful delete removes the record from both stores.
#[tokio::test(start_paused = true)]
async fn delete_removes_from_both_stores() {
    let h = harness(CatalogConfig::new());

    h.catalog
        .create_record("products", fields(&[("title", json!("Vase"))]))
        .await
        .unwrap();
    h.catalog.wait_for_sync().await;

    let id = RecordId::remote("srv-1");
    h.catalog.delete_record("products", &id).await.unwrap();
    assert!(h.store.is_empty("products"));
    assert!(h.remote.records("products").is_empty());
}

/// Updates land locally at once and reach the remote store in the
/// background for remote-origin records.
#[tokio::test(start_paused = true)]
async fn update_propagates_to_remote_in_background() {
    let h = harness(CatalogConfig::new());

    h.catalog
        .create_record(
            "products",
            fields(&[("title", json!("Vase")), ("price", json!(50))]),
        )
        .await
        .unwrap();
    h.catalog.wait_for_sync().await;

    let id = RecordId::remote("srv-1");
    let updated = h
        .catalog
        .update_record("products", &id, fields(&[("price", json!(75))]))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.number("price"), 75.0);
    assert_eq!(updated.text("title"), "Vase");

    h.catalog.wait_for_sync().await;
    let remote = h.remote.records("products").remove(0);
    assert_eq!(remote.number("price"), 75.0);
}

#[tokio::test(start_paused = true)]
async fn update_of_absent_record_is_none() {
    let h = harness(CatalogConfig::new());
    let result = h
        .catalog
        .update_record("products", &RecordId::remote("missing"), Fields::new())
        .await
        .unwrap();
    assert!(result.is_none());
}

/// The tri-state outcome distinguishes a genuinely empty collection from
/// a total outage.
#[tokio::test(start_paused = true)]
async fn empty_and_unavailable_are_distinguished() {
    let h = harness(CatalogConfig::new());

    let view = h.catalog.list_records("products", &FilterSpec::new()).await;
    assert_eq!(view.source, ListSource::Empty);

    h.remote.set_offline(true);
    let view = h.catalog.list_records("products", &FilterSpec::new()).await;
    assert_eq!(view.source, ListSource::Unavailable);
    assert!(view.records.is_empty());
}

#[tokio::test(start_paused = true)]
async fn seed_policy_substitutes_on_outage_only() {
    let h = harness(CatalogConfig::new().with_seed_policy(SeedPolicy::OnUnavailable));

    // Remote reachable and empty: no seeds.
    let view = h.catalog.list_records("products", &FilterSpec::new()).await;
    assert_eq!(view.source, ListSource::Empty);

    h.remote.set_offline(true);
    let view = h.catalog.list_records("products", &FilterSpec::new()).await;
    assert_eq!(view.source, ListSource::Seeded);
    assert!(!view.records.is_empty());
}

#[tokio::test(start_paused = true)]
async fn demo_policy_never_shows_an_empty_view() {
    let h = harness(CatalogConfig::new().with_seed_policy(SeedPolicy::OnEmptyOrUnavailable));

    let view = h.catalog.list_records("products", &FilterSpec::new()).await;
    assert_eq!(view.source, ListSource::Seeded);

    // Seeds are filter-eligible like any other record.
    let filtered = h
        .catalog
        .list_records("products", &FilterSpec::new().with_category("Pottery"))
        .await;
    assert!(filtered
        .records
        .iter()
        .all(|r| r.text("category") == "Pottery"));
}

/// Local store exhaustion surfaces from the write path.
#[tokio::test(start_paused = true)]
async fn quota_exhaustion_surfaces_from_create() {
    let h = harness(CatalogConfig::new());
    h.store.set_quota(Some(0));

    let err = h
        .catalog
        .create_record("products", fields(&[("title", json!("Vase"))]))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Store(_)));
}

/// A cross-origin id collision must not crash or duplicate; the local
/// copy wins.
#[tokio::test(start_paused = true)]
async fn id_collision_keeps_local_copy() {
    let h = harness(CatalogConfig::new());

    let mut local = Record::new_local(fields(&[("title", json!("local copy"))]));
    local.id = RecordId::remote("srv-9");
    h.store.append("products", local).unwrap();

    let mut remote = Record::new_local(fields(&[("title", json!("remote copy"))]));
    remote.id = RecordId::remote("srv-9");
    h.remote.seed("products", remote);

    let view = h.catalog.list_records("products", &FilterSpec::new()).await;
    assert_eq!(view.records.len(), 1);
    assert_eq!(view.records[0].text("title"), "local copy");
}

/// `get_record` reaches through to the remote store for records missing
/// locally, and degrades to absent offline.
#[tokio::test(start_paused = true)]
async fn get_record_falls_through_to_remote() {
    let h = harness(CatalogConfig::new());
    let id = h
        .remote
        .create_record("products", fields(&[("title", json!("Vase"))]))
        .await
        .unwrap();

    let found = h.catalog.get_record("products", &id).await.unwrap();
    assert_eq!(found.text("title"), "Vase");

    h.remote.set_offline(true);
    assert!(h
        .catalog
        .get_record("products", &RecordId::remote("srv-99"))
        .await
        .is_none());
}

/// Default fields fill gaps at create time, like the placeholder image
/// for products submitted without one.
#[tokio::test(start_paused = true)]
async fn create_applies_default_fields() {
    let h = harness(CatalogConfig::new().with_default_field(
        "products",
        "images",
        json!(["https://example.com/placeholder.jpg"]),
    ));

    let record = h
        .catalog
        .create_record(
            "products",
            fields(&[("title", json!("Vase")), ("images", json!([]))]),
        )
        .await
        .unwrap();
    assert_eq!(record.list("images").len(), 1);
}

#[tokio::test(start_paused = true)]
async fn featured_truncates_the_default_view() {
    let h = harness(CatalogConfig::new());
    for n in 0..5 {
        h.remote
            .create_record("products", fields(&[("title", json!(format!("P{n}")))]))
            .await
            .unwrap();
    }

    let featured = h.catalog.get_featured("products", 3).await;
    assert_eq!(featured.records.len(), 3);
    assert_eq!(featured.source, ListSource::Populated);
}
