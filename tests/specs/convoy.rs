// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! `gt convoy ...`: argument validation and text/JSON output formatting.

use crate::support::Sandbox;

#[test]
fn convoy_list_reports_no_convoys_on_an_empty_store() {
    let sandbox = Sandbox::new();

    let out = sandbox.gt().args(["convoy", "list"]).output().expect("run gt convoy list");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("no convoys"));
}

#[test]
fn convoy_list_emits_an_empty_json_array_on_an_empty_store() {
    let sandbox = Sandbox::new();

    let out = sandbox
        .gt()
        .args(["--format", "json", "convoy", "list"])
        .output()
        .expect("run gt convoy list");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let value: serde_json::Value = serde_json::from_slice(&out.stdout).expect("valid json");
    similar_asserts::assert_eq!(value, serde_json::json!([]));
}

#[test]
fn convoy_create_creates_a_convoy_with_the_given_title() {
    let sandbox = Sandbox::new();
    sandbox.write_routing("web", "web-rig");

    let out = sandbox
        .gt()
        .args(["convoy", "create", "roll out the new gate", "web-1"])
        .output()
        .expect("run gt convoy create");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("tracking 1 issue(s)"));
}

#[test]
fn convoy_create_requires_at_least_one_issue() {
    let sandbox = Sandbox::new();

    let out = sandbox
        .gt()
        .args(["convoy", "create", "empty convoy"])
        .output()
        .expect("run gt convoy create");
    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn convoy_status_on_an_unknown_id_fails() {
    let sandbox = Sandbox::new();

    let out = sandbox
        .gt()
        .args(["convoy", "status", "does-not-exist"])
        .output()
        .expect("run gt convoy status");
    assert!(!out.status.success());
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn convoy_land_rejects_an_unknown_id() {
    let sandbox = Sandbox::new();

    let out = sandbox
        .gt()
        .args(["convoy", "land", "does-not-exist"])
        .output()
        .expect("run gt convoy land");
    assert!(!out.status.success());
}
