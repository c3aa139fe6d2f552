// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

use super::*;

#[tokio::test]
async fn records_calls_in_order() {
    let adapter = FakeSessionAdapter::new();
    let rig = RigName::new("web");
    let session = adapter.spawn(&rig, &SpawnOptions::new()).await.unwrap();
    adapter.bind(&IssueId::from_string("bead-1"), &session).await.unwrap();
    adapter.start(&session).await.unwrap();

    let calls = adapter.calls();
    assert_eq!(calls.len(), 3);
    assert!(matches!(&calls[0], SessionCall::Spawn { .. }));
    assert!(matches!(&calls[1], SessionCall::Bind { .. }));
    assert!(matches!(&calls[2], SessionCall::Start { .. }));
}

#[tokio::test]
async fn fail_spawn_returns_error_but_still_records_the_attempt() {
    let adapter = FakeSessionAdapter::new();
    adapter.fail_spawn();
    let result = adapter.spawn(&RigName::new("web"), &SpawnOptions::new()).await;
    assert!(result.is_err());
    assert_eq!(adapter.calls().len(), 1);
}

#[tokio::test]
async fn fail_bind_does_not_block_spawn() {
    let adapter = FakeSessionAdapter::new();
    adapter.fail_bind();
    let session = adapter.spawn(&RigName::new("web"), &SpawnOptions::new()).await.unwrap();
    let result = adapter.bind(&IssueId::from_string("bead-1"), &session).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn fail_start_logs_but_session_already_exists() {
    let adapter = FakeSessionAdapter::new();
    adapter.fail_start();
    let session = adapter.spawn(&RigName::new("web"), &SpawnOptions::new()).await.unwrap();
    let result = adapter.start(&session).await;
    assert!(result.is_err());
    assert_eq!(adapter.calls().len(), 2);
}
