// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

use super::*;
use gastown_adapters::FakeSessionAdapter;
use gastown_core::test_support::{closed_task, convoy_with_members, ready_task};
use gastown_core::{DependencyKind, FakeClock};
use gastown_store::{StoreEvent, StoreEventKind};

fn harness() -> (MemoryStore, FakeSessionAdapter, FakeClock) {
    (MemoryStore::new("hq"), FakeSessionAdapter::new(), FakeClock::new())
}

#[tokio::test]
async fn event_driven_feed_warm_up_advances_watermark_without_dispatching() {
    let (store, sessions, clock) = harness();
    store.seed(convoy_with_members("cv-1", &["bead-1"]));
    store.seed(ready_task("bead-1"));
    store.record_event(StoreEvent::new(StoreEventKind::Close, IssueId::from_string("bead-0"), 10));

    let wm = event_driven_feed(&store, &sessions, &clock, Watermark::EPOCH, true).await.unwrap();
    assert_eq!(wm.epoch_ms(), 10);
    assert!(sessions.calls().is_empty());
}

#[tokio::test]
async fn event_driven_feed_dispatches_next_ready_member_on_close_event() {
    let (store, sessions, clock) = harness();
    store.seed(convoy_with_members("cv-1", &["bead-1", "bead-2"]));
    store.seed(closed_task("bead-1"));
    store.seed(ready_task("bead-2"));
    store.record_event(StoreEvent::new(StoreEventKind::Close, IssueId::from_string("bead-1"), 10));

    let wm = event_driven_feed(&store, &sessions, &clock, Watermark::EPOCH, false).await.unwrap();
    assert_eq!(wm.epoch_ms(), 10);

    let member = store.get(&IssueId::from_string("bead-2")).await.unwrap();
    assert!(member.is_bound());
}

#[tokio::test]
async fn event_driven_feed_ignores_close_events_for_untracked_issues() {
    let (store, sessions, clock) = harness();
    store.seed(convoy_with_members("cv-1", &["bead-1"]));
    store.seed(ready_task("bead-1"));
    store.record_event(StoreEvent::new(StoreEventKind::Close, IssueId::from_string("bead-unrelated"), 10));

    event_driven_feed(&store, &sessions, &clock, Watermark::EPOCH, false).await.unwrap();
    assert!(sessions.calls().is_empty());
}

#[tokio::test]
async fn feed_auto_closes_convoy_once_every_member_is_closed() {
    let (store, sessions, clock) = harness();
    store.seed(convoy_with_members("cv-1", &["bead-1"]));
    store.seed(closed_task("bead-1"));
    store.record_event(StoreEvent::new(StoreEventKind::Close, IssueId::from_string("bead-1"), 10));

    event_driven_feed(&store, &sessions, &clock, Watermark::EPOCH, false).await.unwrap();

    let convoy = store.get(&IssueId::from_string("cv-1")).await.unwrap();
    assert_eq!(convoy.status, IssueStatus::Closed);
}

#[tokio::test]
async fn stranded_sweep_feeds_a_convoy_with_a_ready_member_and_no_bound_member() {
    let (store, sessions, clock) = harness();
    store.seed(convoy_with_members("cv-1", &["bead-1"]));
    store.seed(ready_task("bead-1"));

    let fed = stranded_sweep(&store, &sessions, &clock).await.unwrap();
    assert_eq!(fed, 1);
    let member = store.get(&IssueId::from_string("bead-1")).await.unwrap();
    assert!(member.is_bound());
}

#[tokio::test]
async fn stranded_sweep_skips_convoys_that_already_have_a_bound_member() {
    let (store, sessions, clock) = harness();
    store.seed(convoy_with_members("cv-1", &["bead-1", "bead-2"]));
    store.seed(ready_task("bead-1").bound_to(gastown_core::SessionId::new()));
    store.seed(ready_task("bead-2"));

    let fed = stranded_sweep(&store, &sessions, &clock).await.unwrap();
    assert_eq!(fed, 0, "a convoy with a live binding is not stranded");
}

#[tokio::test]
async fn stranded_sweep_skips_members_on_a_parked_rig_unless_the_store_is_hq() {
    let store = MemoryStore::new("not-hq");
    let sessions = FakeSessionAdapter::new();
    let clock = FakeClock::new();
    store.seed(convoy_with_members("cv-1", &["web-1"]));
    store.seed(ready_task("web-1"));
    store.park_rig(RigName::new("web"));

    let fed = stranded_sweep(&store, &sessions, &clock).await.unwrap();
    assert_eq!(fed, 0);
}

#[tokio::test]
async fn stranded_sweep_never_dispatches_more_than_one_member_per_convoy() {
    let (store, sessions, clock) = harness();
    store.seed(convoy_with_members("cv-1", &["bead-1", "bead-2"]));
    store.seed(ready_task("bead-1"));
    store.seed(ready_task("bead-2"));

    stranded_sweep(&store, &sessions, &clock).await.unwrap();
    let calls = sessions.calls();
    let spawn_count = calls.iter().filter(|c| matches!(c, gastown_adapters::SessionCall::Spawn { .. })).count();
    assert_eq!(spawn_count, 1);
}

#[tokio::test]
async fn check_dispatches_the_first_ready_member_of_the_named_convoy() {
    let (store, sessions, clock) = harness();
    store.seed(convoy_with_members("cv-1", &["bead-1"]));
    store.seed(ready_task("bead-1"));

    let outcome = check(&store, &sessions, &clock, &IssueId::from_string("cv-1")).await.unwrap();
    assert_eq!(outcome, FeedOutcome::Dispatched);
}

#[tokio::test]
async fn list_stranded_finds_only_convoys_with_a_ready_unbound_member() {
    let (store, sessions, clock) = harness();
    store.seed(convoy_with_members("cv-1", &["bead-1"]));
    store.seed(ready_task("bead-1"));
    store.seed(convoy_with_members("cv-2", &["bead-2"]));
    store.seed(ready_task("bead-2").bound_to(gastown_core::SessionId::new()));

    let stranded = list_stranded(&store).await.unwrap();
    assert_eq!(stranded, vec![IssueId::from_string("cv-1")]);

    let _ = (sessions, clock);
}
