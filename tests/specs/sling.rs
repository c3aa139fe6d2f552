// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! `gt sling`: argument validation and output formatting.
//!
//! `sling` talks to the store directly rather than through the daemon, and
//! each CLI invocation starts from its own empty in-memory store, so these
//! scenarios are scoped to what a single process can observe about itself.

use crate::support::Sandbox;

#[test]
fn sling_creates_a_convoy_tracking_every_issue() {
    let sandbox = Sandbox::new();
    sandbox.write_routing("web", "web-rig");

    let out = sandbox.gt().args(["sling", "web-1", "web-2"]).output().expect("run gt sling");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("tracking 2 issue(s)"), "stdout: {stdout}");
    assert!(stdout.contains("web-rig"), "stdout: {stdout}");
}

#[test]
fn sling_requires_at_least_one_issue() {
    let sandbox = Sandbox::new();

    let out = sandbox.gt().arg("sling").output().expect("run gt sling");
    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(2), "clap usage errors exit 2");
}

#[test]
fn sling_rejects_an_unroutable_prefix() {
    let sandbox = Sandbox::new();

    let out = sandbox.gt().args(["sling", "mystery-1"]).output().expect("run gt sling");
    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn sling_pins_an_explicit_rig_even_with_no_routing_file() {
    let sandbox = Sandbox::new();

    let out = sandbox
        .gt()
        .args(["sling", "mystery-1", "--rig", "quarantine"])
        .output()
        .expect("run gt sling");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("quarantine"), "stdout: {stdout}");
}
