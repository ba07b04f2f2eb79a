#![allow(unused)]
//! Reconciler integration harness.
//!
//! # What this covers
//!
//! - **Arrival order**: outcomes are applied in the order their requests
//!   settle, not the order they were issued. Simulated per-operation latency
//!   on paused time makes the interleavings deterministic.
//! - **No premature change**: while a request is in flight the collection
//!   shows only what earlier outcomes produced.
//! - **Rejections**: a failed source call leaves the collection intact and
//!   surfaces the error.
//! - **Concurrent commands**: many creates issued together each land exactly
//!   once.
//! - **Seeding**: a seed file feeds the source the console starts from.
//!
//! # What this does NOT cover
//!
//! - A networked source
//!
//! # Running
//!
//! ```sh
//! cargo test --test reconcile_harness
//! ```

mod common;
use common::*;
use folio_core::{Action, Excerpt, ExcerptDraft, ExcerptId, ExcerptStore, RemoteError, RequestStatus, Snapshot};
use folio_source::memory::Request;
use folio_source::{load_seed, InMemorySource, Operation, Reconciler, ReconcilerHandle};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn start(source: &InMemorySource) -> (Reconciler, ReconcilerHandle) {
    let reconciler = Reconciler::spawn(ExcerptStore::default(), Arc::new(source.clone()));
    let handle = reconciler.handle();
    (reconciler, handle)
}

fn snapshot_ids(snapshot: &Snapshot) -> Vec<i64> {
    snapshot.ids().iter().map(|id| id.get()).collect()
}

fn draft(body: &str) -> ExcerptDraft {
    ExcerptDraft::new("Virginia Woolf", "The Waves", body)
}

// ---------------------------------------------------------------------------
// Arrival order
// ---------------------------------------------------------------------------

/// A delete issued after an update but answered first is applied first: the
/// store shows the deletion while the update is still in flight, and the
/// late update then overwrites id 4 in place without bringing id 2 back.
#[tokio::test(start_paused = true)]
async fn outcomes_apply_in_settlement_order() {
    let source = InMemorySource::with_records(corpus());
    let (_reconciler, handle) = start(&source);
    handle.fetch_all().await.unwrap();

    source.set_latency(Operation::Update, Duration::from_millis(300)).await;
    source.set_latency(Operation::Delete, Duration::from_millis(100)).await;

    let edited = ExcerptBuilder::new(4).author("Italo Calvino").work("Invisible Cities").body("edited").build();
    let update = handle.update(edited);
    let delete = handle.delete(id(2));

    delete.await.unwrap();
    let snap = handle.flush().await.unwrap();
    assert_eq!(snapshot_ids(&snap), vec![1, 3, 4, 5]);
    assert_eq!(snap.message.as_deref(), Some("Excerpt successfully deleted"));

    update.await.unwrap();
    let snap = handle.flush().await.unwrap();
    assert_eq!(snapshot_ids(&snap), vec![1, 3, 4, 5]);
    assert_eq!(snap.get(id(4)).unwrap().body, "edited");
    assert_eq!(snap.message.as_deref(), Some("Excerpt successfully updated"));
}

/// Nothing about a create is visible until its outcome is applied.
#[tokio::test(start_paused = true)]
async fn in_flight_create_changes_only_status() {
    let source = InMemorySource::with_records(corpus());
    let (_reconciler, handle) = start(&source);
    handle.fetch_all().await.unwrap();

    source.set_latency(Operation::Create, Duration::from_secs(1)).await;
    let create = handle.publish(draft("Clothes are but a symbol"));

    tokio::time::sleep(Duration::from_millis(500)).await;
    let snap = handle.flush().await.unwrap();
    assert_eq!(snap.status, RequestStatus::Loading);
    assert_eq!(snapshot_ids(&snap), vec![1, 2, 3, 4, 5]);

    create.await.unwrap();
    let snap = handle.flush().await.unwrap();
    assert_eq!(snapshot_ids(&snap), vec![6, 1, 2, 3, 4, 5]);
}

/// A list answered before a slower create does not contain it; the create
/// outcome then lands at the front.
#[tokio::test(start_paused = true)]
async fn fast_list_then_slow_create() {
    let source = InMemorySource::with_records(excerpts(&[1, 2]));
    source.set_latency(Operation::Create, Duration::from_millis(400)).await;
    let (_reconciler, handle) = start(&source);

    let create = handle.publish(draft("late"));
    let list = handle.fetch_all();
    list.await.unwrap();
    assert_eq!(snapshot_ids(&handle.flush().await.unwrap()), vec![1, 2]);

    create.await.unwrap();
    assert_eq!(snapshot_ids(&handle.flush().await.unwrap()), vec![3, 1, 2]);
}

/// A list answered after a delete was applied restores nothing: the source
/// already dropped the record before it answered.
#[tokio::test(start_paused = true)]
async fn slow_list_after_delete() {
    let source = InMemorySource::with_records(excerpts(&[1, 2, 3]));
    let (_reconciler, handle) = start(&source);
    handle.fetch_all().await.unwrap();

    source.set_latency(Operation::List, Duration::from_millis(300)).await;
    let list = handle.fetch_all();
    tokio::task::yield_now().await;
    handle.delete(id(2)).await.unwrap();
    assert_eq!(snapshot_ids(&handle.flush().await.unwrap()), vec![1, 3]);

    list.await.unwrap();
    let snap = handle.flush().await.unwrap();
    assert_eq!(snapshot_ids(&snap), vec![1, 3]);
    assert_eq!(snap.status, RequestStatus::Succeeded);
}

// ---------------------------------------------------------------------------
// Rejections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_refresh_keeps_last_collection() {
    let source = InMemorySource::with_records(excerpts(&[1, 2]));
    let (_reconciler, handle) = start(&source);
    handle.fetch_all().await.unwrap();

    source.fail_next(Operation::List, rejection("gateway down")).await;
    handle.fetch_all().await.unwrap();

    let snap = handle.flush().await.unwrap();
    assert_eq!(snapshot_ids(&snap), vec![1, 2]);
    assert_eq!(snap.status, RequestStatus::Failed);
    assert_eq!(snap.error, Some(rejection("gateway down")));
}

/// Deleting an id the source does not hold fails with not-found and keeps
/// the local entry.
#[tokio::test]
async fn delete_of_missing_remote_record() {
    let source = InMemorySource::with_records(excerpts(&[1]));
    let (_reconciler, handle) = start(&source);
    handle.dispatch(Action::ListFulfilled(excerpts(&[1, 7])));

    handle.delete(id(7)).await.unwrap();
    let snap = handle.flush().await.unwrap();
    assert_eq!(snapshot_ids(&snap), vec![1, 7]);
    assert_eq!(snap.error, Some(RemoteError::NotFound(id(7))));
}

#[tokio::test]
async fn invalid_update_is_rejected() {
    let source = InMemorySource::with_records(corpus());
    let (_reconciler, handle) = start(&source);
    handle.fetch_all().await.unwrap();

    let blank = ExcerptBuilder::new(3).author("  ").build();
    handle.update(blank).await.unwrap();

    let snap = handle.flush().await.unwrap();
    assert_eq!(snap.error, Some(RemoteError::invalid("author", "must be provided")));
    assert_eq!(snap.get(id(3)).unwrap().author, "Virginia Woolf");
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

/// Ten creates issued together each appear exactly once, and the source saw
/// ten create requests.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_publishes_each_land_once() {
    let source = InMemorySource::new();
    let (reconciler, handle) = start(&source);

    let tasks: Vec<_> = (0..10).map(|i| handle.publish(draft(&format!("body {i}")))).collect();
    for result in futures::future::join_all(tasks).await {
        result.unwrap();
    }

    let snap = handle.flush().await.unwrap();
    let mut ids = snapshot_ids(&snap);
    ids.sort_unstable();
    assert_eq!(ids, (1..=10).collect::<Vec<_>>());

    let creates = source
        .requests()
        .await
        .into_iter()
        .filter(|r| matches!(r, Request::Create(_)))
        .count();
    assert_eq!(creates, 10);

    let store = reconciler.shutdown().await.unwrap();
    assert_consistent!(store);
}

/// Actions dispatched after shutdown are dropped without panicking.
#[tokio::test]
async fn handle_outlives_reconciler() {
    let source = InMemorySource::new();
    let (reconciler, handle) = start(&source);
    reconciler.shutdown().await.unwrap();

    handle.dispatch(Action::ResetStatus);
    handle.fetch_all().await.unwrap();
    assert!(handle.flush().await.is_err());
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

#[tokio::test]
async fn seeded_source_lists_seed_records() {
    let dir = tempfile::tempdir().unwrap();
    let records = load_seed(&write_seed(dir.path())).unwrap();
    let source = InMemorySource::with_records(records);
    let (_reconciler, handle) = start(&source);

    handle.fetch_all().await.unwrap();
    let snap = handle.flush().await.unwrap();
    assert_eq!(snapshot_ids(&snap), vec![1, 2, 3, 4, 5]);
    assert_eq!(snap.authors().len(), 3);

    let created = handle.publish(draft("new"));
    created.await.unwrap();
    assert_eq!(snapshot_ids(&handle.flush().await.unwrap())[0], 6);
}
