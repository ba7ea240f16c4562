//! Repeater registry behaviour over the embedded append-only store.

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};

use meshmon_core::clock::ManualClock;
use meshmon_core::error::CoreError;
use meshmon_core::models::repeater::{RepeaterRecord, RepeaterUpdate};
use meshmon_core::repeaters::RepeaterRegistry;
use meshmon_core::store::RecordLog;
use meshmon_core::types::Timestamp;
use meshmon_store::memory::MemoryStore;

fn t0() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap()
}

fn registry_fixture() -> (RepeaterRegistry, Arc<MemoryStore>, Arc<ManualClock>) {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(ManualClock::new(t0()));
    let registry = RepeaterRegistry::new(store.clone(), clock.clone());
    (registry, store, clock)
}

fn full_update() -> RepeaterUpdate {
    RepeaterUpdate {
        name: Some("Repeater-Alpha".to_string()),
        public_key: Some("aabbcc001122".to_string()),
        password: Some("node-secret".to_string()),
        enabled: Some(true),
    }
}

#[tokio::test]
async fn upsert_then_resolve_round_trips_exactly() {
    let (registry, _store, _clock) = registry_fixture();

    let written = registry.upsert("rpt-1", full_update()).await.unwrap();
    let resolved = registry.resolve("rpt-1").await.unwrap();

    assert_eq!(resolved, written);
    assert_eq!(resolved.name, "Repeater-Alpha");
    assert_eq!(resolved.public_key, "aabbcc001122");
    assert_eq!(resolved.password, "node-secret");
    assert!(resolved.enabled);
}

#[tokio::test]
async fn resolve_unknown_id_is_not_found() {
    let (registry, _store, _clock) = registry_fixture();

    assert_matches!(
        registry.resolve("rpt-missing").await,
        Err(CoreError::NotFound { .. })
    );
}

#[tokio::test]
async fn creation_requires_all_fields() {
    let (registry, store, _clock) = registry_fixture();

    let partial = RepeaterUpdate {
        name: Some("Repeater-Alpha".to_string()),
        ..Default::default()
    };
    assert_matches!(
        registry.upsert("rpt-1", partial).await,
        Err(CoreError::Validation(_))
    );
    assert_eq!(store.repeater_rows(), 0);
}

#[tokio::test]
async fn empty_name_is_rejected() {
    let (registry, _store, _clock) = registry_fixture();

    let mut update = full_update();
    update.name = Some("   ".to_string());
    assert_matches!(
        registry.upsert("rpt-1", update).await,
        Err(CoreError::Validation(_))
    );
}

#[tokio::test]
async fn enabled_defaults_to_true_on_creation() {
    let (registry, _store, _clock) = registry_fixture();

    let mut update = full_update();
    update.enabled = None;
    let record = registry.upsert("rpt-1", update).await.unwrap();
    assert!(record.enabled);
}

#[tokio::test]
async fn later_upsert_fully_supersedes_the_first() {
    let (registry, store, clock) = registry_fixture();

    registry.upsert("rpt-1", full_update()).await.unwrap();

    clock.advance(chrono::Duration::minutes(5));
    let mut replacement = full_update();
    replacement.name = Some("Repeater-Bravo".to_string());
    replacement.enabled = Some(false);
    registry.upsert("rpt-1", replacement).await.unwrap();

    // Both physical snapshots coexist until the store merges; resolution
    // must already see only the replacement.
    assert_eq!(store.repeater_rows(), 2);
    let resolved = registry.resolve("rpt-1").await.unwrap();
    assert_eq!(resolved.name, "Repeater-Bravo");
    assert!(!resolved.enabled);
}

#[tokio::test]
async fn partial_update_carries_unchanged_fields() {
    let (registry, _store, clock) = registry_fixture();

    registry.upsert("rpt-1", full_update()).await.unwrap();

    clock.advance(chrono::Duration::minutes(5));
    let toggle = RepeaterUpdate {
        enabled: Some(false),
        ..Default::default()
    };
    let record = registry.upsert("rpt-1", toggle).await.unwrap();

    // Only the flag changed; the snapshot still carries every field.
    assert_eq!(record.name, "Repeater-Alpha");
    assert_eq!(record.public_key, "aabbcc001122");
    assert_eq!(record.password, "node-secret");
    assert!(!record.enabled);
}

#[tokio::test]
async fn same_millisecond_upsert_still_supersedes() {
    let (registry, _store, _clock) = registry_fixture();

    // Clock frozen: the second snapshot's version must still be strictly
    // greater than the first's.
    registry.upsert("rpt-1", full_update()).await.unwrap();
    let toggle = RepeaterUpdate {
        enabled: Some(false),
        ..Default::default()
    };
    registry.upsert("rpt-1", toggle).await.unwrap();

    let resolved = registry.resolve("rpt-1").await.unwrap();
    assert!(!resolved.enabled);
}

#[tokio::test]
async fn duplicate_snapshots_resolve_after_compaction_too() {
    let (registry, store, _clock) = registry_fixture();

    let record = registry.upsert("rpt-1", full_update()).await.unwrap();
    // A retried append leaves an identical duplicate row.
    RecordLog::<RepeaterRecord>::append(&*store, record.clone())
        .await
        .unwrap();
    assert_eq!(store.repeater_rows(), 2);

    assert_eq!(registry.resolve("rpt-1").await.unwrap(), record);

    store.compact();
    assert_eq!(store.repeater_rows(), 1);
    assert_eq!(registry.resolve("rpt-1").await.unwrap(), record);
}
