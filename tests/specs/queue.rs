// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! `gt queue ...`: `list`/`clear`/`run` are store-direct, single-invocation
//! checks; `pause`/`resume`/`status` round-trip through a live `gastownd`
//! and so are the one place a multi-invocation scenario is actually
//! observable end-to-end.

use crate::support::{Daemon, Sandbox};

#[test]
fn queue_list_reports_empty_on_an_empty_store() {
    let sandbox = Sandbox::new();

    let out = sandbox.gt().args(["queue", "list"]).output().expect("run gt queue list");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("queue is empty"));
}

#[test]
fn queue_clear_reports_zero_cleared_on_an_empty_store() {
    let sandbox = Sandbox::new();

    let out = sandbox.gt().args(["queue", "clear"]).output().expect("run gt queue clear");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("cleared 0 issue(s)"));
}

#[test]
fn queue_clear_rejects_a_named_bead_that_is_not_queued() {
    let sandbox = Sandbox::new();

    let out = sandbox
        .gt()
        .args(["queue", "clear", "--bead", "nonexistent"])
        .output()
        .expect("run gt queue clear");
    assert!(!out.status.success());
}

#[test]
fn queue_run_reports_nothing_to_dispatch_on_an_empty_store() {
    let sandbox = Sandbox::new();

    let out = sandbox.gt().args(["queue", "run", "--dry-run"]).output().expect("run gt queue run");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("nothing to dispatch"));
}

#[test]
fn queue_pause_resume_round_trips_through_the_daemon() {
    let daemon = Daemon::start();

    let initial = daemon.gt().args(["queue", "status"]).output().expect("queue status");
    assert!(initial.status.success(), "stderr: {}", String::from_utf8_lossy(&initial.stderr));
    assert!(String::from_utf8_lossy(&initial.stdout).contains("paused: false"));

    let pause = daemon
        .gt()
        .args(["queue", "pause", "--by", "tester"])
        .output()
        .expect("queue pause");
    assert!(pause.status.success(), "stderr: {}", String::from_utf8_lossy(&pause.stderr));

    let paused = daemon.gt().args(["queue", "status"]).output().expect("queue status");
    let paused_stdout = String::from_utf8_lossy(&paused.stdout);
    assert!(paused_stdout.contains("paused: true"), "stdout: {paused_stdout}");
    assert!(paused_stdout.contains("tester"), "stdout: {paused_stdout}");

    let resume = daemon.gt().args(["queue", "resume"]).output().expect("queue resume");
    assert!(resume.status.success(), "stderr: {}", String::from_utf8_lossy(&resume.stderr));

    let resumed = daemon.gt().args(["queue", "status"]).output().expect("queue status");
    assert!(String::from_utf8_lossy(&resumed.stdout).contains("paused: false"));
}

#[test]
fn queue_status_emits_json_when_requested() {
    let daemon = Daemon::start();

    let out = daemon
        .gt()
        .args(["--format", "json", "queue", "status"])
        .output()
        .expect("queue status");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid json");
    similar_asserts::assert_eq!(
        value,
        serde_json::json!({
            "paused": false,
            "paused_by": null,
            "last_dispatch_at_ms": null,
            "last_dispatch_count": 0,
        })
    );
}

#[test]
fn queue_status_fails_fast_when_no_daemon_is_listening() {
    let sandbox = Sandbox::new();

    let out = sandbox.gt().args(["queue", "status"]).output().expect("run gt queue status");
    assert!(!out.status.success());
}
