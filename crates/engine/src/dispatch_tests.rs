// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

use super::*;
use gastown_adapters::FakeSessionAdapter;
use gastown_core::test_support::{blocked_task, ready_task};
use gastown_core::{DependencyKind, FakeClock, IssueType};
use gastown_store::MemoryStore;

fn harness() -> (MemoryStore, FakeSessionAdapter, FakeClock) {
    (MemoryStore::new("hq"), FakeSessionAdapter::new(), FakeClock::new())
}

#[tokio::test]
async fn dispatch_happy_path_mints_an_auto_convoy_and_binds() {
    let (store, sessions, clock) = harness();
    store.seed(ready_task("bead-1"));

    let session = dispatch(&store, &sessions, &clock, &IssueId::from_string("bead-1"), &RigName::new("web"), SpawnOptions::new())
        .await
        .unwrap();

    let issue = store.get(&IssueId::from_string("bead-1")).await.unwrap();
    assert_eq!(issue.bound_session, Some(session.id.clone()));

    let convoys = store.list(ListFilter::new().with_type(IssueType::Convoy)).await.unwrap();
    assert_eq!(convoys.len(), 1);
    assert!(convoys[0].tracked_members().any(|m| m.as_str() == "bead-1"));
}

#[tokio::test]
async fn dispatch_persists_rig_convoy_and_args_as_labels() {
    let (store, sessions, clock) = harness();
    store.seed(ready_task("bead-1"));
    let mut opts = SpawnOptions::new();
    opts.args.insert("branch".to_string(), serde_json::json!("main"));

    dispatch(&store, &sessions, &clock, &IssueId::from_string("bead-1"), &RigName::new("web"), opts)
        .await
        .unwrap();

    let issue = store.get(&IssueId::from_string("bead-1")).await.unwrap();
    assert!(issue.labels.contains("dispatched:rig:web"));
    let convoy = store
        .list(ListFilter::new().with_type(IssueType::Convoy))
        .await
        .unwrap()
        .into_iter()
        .next()
        .unwrap();
    assert!(issue.labels.iter().any(|l| l == &format!("dispatched:convoy:{}", convoy.id)));
    assert!(issue.labels.iter().any(|l| l.starts_with("dispatched:args:")));
}

#[tokio::test]
async fn dispatch_reuses_existing_convoy_for_the_member() {
    let (store, sessions, clock) = harness();
    store.seed(ready_task("bead-1"));
    let mut convoy = gastown_core::Issue::new(IssueId::from_string("cv-existing"), "existing", IssueType::Convoy, 0);
    convoy.dependencies.push(gastown_core::Dependency::new(DependencyKind::ParentChild, IssueId::from_string("bead-1"), false));
    store.seed(convoy);

    dispatch(&store, &sessions, &clock, &IssueId::from_string("bead-1"), &RigName::new("web"), SpawnOptions::new())
        .await
        .unwrap();

    let convoys = store.list(ListFilter::new().with_type(IssueType::Convoy)).await.unwrap();
    assert_eq!(convoys.len(), 1, "must never create a second convoy for an already-tracked member");
}

#[tokio::test]
async fn dispatch_rejects_blocked_issue() {
    let (store, sessions, clock) = harness();
    store.seed(blocked_task("bead-1", "bead-blocker", DependencyKind::Blocks));

    let err = dispatch(&store, &sessions, &clock, &IssueId::from_string("bead-1"), &RigName::new("web"), SpawnOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::Blocked(_)));
    assert!(sessions.calls().is_empty(), "must not spawn a session for a blocked issue");
}

#[tokio::test]
async fn dispatch_rejects_non_dispatchable_type() {
    let (store, sessions, clock) = harness();
    store.seed(ready_task("bead-1").with_type(IssueType::Epic));

    let err = dispatch(&store, &sessions, &clock, &IssueId::from_string("bead-1"), &RigName::new("web"), SpawnOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::NotDispatchableType(_)));
}

#[tokio::test]
async fn dispatch_rejects_already_bound_unless_forced() {
    let (store, sessions, clock) = harness();
    store.seed(ready_task("bead-1").bound_to(gastown_core::SessionId::new()));

    let err = dispatch(&store, &sessions, &clock, &IssueId::from_string("bead-1"), &RigName::new("web"), SpawnOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::AlreadyBound { .. }));

    dispatch(&store, &sessions, &clock, &IssueId::from_string("bead-1"), &RigName::new("web"), SpawnOptions::forced())
        .await
        .unwrap();
}

#[tokio::test]
async fn dispatch_start_failure_does_not_roll_back_bind() {
    let (store, sessions, clock) = harness();
    store.seed(ready_task("bead-1"));
    sessions.fail_start();

    let session = dispatch(&store, &sessions, &clock, &IssueId::from_string("bead-1"), &RigName::new("web"), SpawnOptions::new())
        .await
        .unwrap();

    let issue = store.get(&IssueId::from_string("bead-1")).await.unwrap();
    assert_eq!(issue.bound_session, Some(session.id));
}

#[tokio::test]
async fn dispatch_rejects_missing_issue() {
    let (store, sessions, clock) = harness();
    let err = dispatch(&store, &sessions, &clock, &IssueId::from_string("bead-missing"), &RigName::new("web"), SpawnOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, DispatchError::Store(_)));
}
