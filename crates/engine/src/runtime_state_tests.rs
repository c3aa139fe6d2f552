// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

use super::*;

#[test]
fn default_state_is_unpaused() {
    let state = QueueRuntimeState::default();
    assert!(!state.paused);
    assert!(state.paused_by.is_none());
}

#[test]
fn pause_records_actor() {
    let mut state = QueueRuntimeState::default();
    state.pause("operator:alice");
    assert!(state.paused);
    assert_eq!(state.paused_by.as_deref(), Some("operator:alice"));
}

#[test]
fn resume_clears_pause_and_actor() {
    let mut state = QueueRuntimeState::default();
    state.pause("operator:alice");
    state.resume();
    assert!(!state.paused);
    assert!(state.paused_by.is_none());
}

#[test]
fn record_dispatch_updates_timestamp_and_count() {
    let mut state = QueueRuntimeState::default();
    state.record_dispatch(1000, 3);
    assert_eq!(state.last_dispatch_at_ms, Some(1000));
    assert_eq!(state.last_dispatch_count, 3);
}
