// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

use super::*;
use gastown_core::{FakeClock, RecordingMolecule};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn spawn_patrol_ticks_on_its_configured_interval() {
    let token = CancellationToken::new();
    let ticks = Arc::new(AtomicUsize::new(0));
    let counter = ticks.clone();

    let handle = spawn_patrol(
        PatrolSpec::new("test-patrol", Duration::from_secs(5)),
        token.clone(),
        MoleculeHandle::null,
        move |_molecule| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        },
    )
    .unwrap();

    tokio::time::advance(Duration::from_secs(11)).await;
    tokio::task::yield_now().await;
    token.cancel();
    handle.join().await;

    assert!(ticks.load(Ordering::SeqCst) >= 2);
}

#[tokio::test]
async fn spawn_patrol_returns_none_for_a_disabled_spec() {
    let token = CancellationToken::new();
    let handle = spawn_patrol(PatrolSpec::new("off", Duration::from_secs(5)).disabled(), token, MoleculeHandle::null, |_m| async {});
    assert!(handle.is_none());
}

#[tokio::test(start_paused = true)]
async fn spawn_patrol_stops_after_cancellation() {
    let token = CancellationToken::new();
    let ticks = Arc::new(AtomicUsize::new(0));
    let counter = ticks.clone();

    let handle = spawn_patrol(
        PatrolSpec::new("test-patrol", Duration::from_secs(1)),
        token.clone(),
        MoleculeHandle::null,
        move |_molecule| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        },
    )
    .unwrap();

    tokio::time::advance(Duration::from_secs(2)).await;
    tokio::task::yield_now().await;
    token.cancel();
    handle.join().await;

    let after_cancel = ticks.load(Ordering::SeqCst);
    tokio::time::advance(Duration::from_secs(10)).await;
    assert_eq!(ticks.load(Ordering::SeqCst), after_cancel, "no further ticks after cancellation");
}

#[tokio::test]
async fn run_named_steps_closes_on_success_and_records_failure_without_aborting() {
    let clock = FakeClock::new();
    let (recording, handle) = RecordingMolecule::open(clock);

    let steps: Vec<PatrolStep<std::io::Error>> = vec![
        ("poll", Box::pin(async { Ok(()) })),
        ("dispatch", Box::pin(async { Err(std::io::Error::new(std::io::ErrorKind::Other, "boom")) })),
        ("sweep", Box::pin(async { Ok(()) })),
    ];
    run_named_steps(&handle, steps).await;

    let recorded = recording.steps();
    assert_eq!(recorded.len(), 3);
    assert_eq!(recorded[0].name, "poll");
    assert_eq!(recorded[1].name, "dispatch");
    assert!(recording.is_closed());
}
