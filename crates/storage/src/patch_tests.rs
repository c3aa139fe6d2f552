// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

use super::*;

#[test]
fn new_patch_is_empty() {
    assert!(IssuePatch::new().is_empty());
}

#[test]
fn close_sets_status_reason_and_timestamp() {
    let patch = IssuePatch::close("done", 100);
    assert_eq!(patch.status, Some(IssueStatus::Closed));
    assert_eq!(patch.close_reason.as_deref(), Some("done"));
    assert_eq!(patch.closed_at_ms, Some(100));
    assert!(!patch.is_empty());
}

#[test]
fn bind_session_wraps_in_some_some() {
    let session = SessionId::new();
    let patch = IssuePatch::bind_session(session.clone());
    assert_eq!(patch.bound_session, Some(Some(session)));
}

#[test]
fn label_builders_accumulate() {
    let patch = IssuePatch::new().add_label("queued").remove_label("queued:rig:web");
    assert!(patch.add_labels.contains("queued"));
    assert!(patch.remove_labels.contains("queued:rig:web"));
}
