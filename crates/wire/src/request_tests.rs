// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

use super::*;

#[test]
fn queue_pause_round_trips_through_json() {
    let request = Request::QueuePause { by: "operator".to_string() };
    let json = serde_json::to_string(&request).unwrap();
    let back: Request = serde_json::from_str(&json).unwrap();
    assert_eq!(back, request);
}

#[test]
fn unit_variants_are_tagged_by_type() {
    let json = serde_json::to_string(&Request::Ping).unwrap();
    assert_eq!(json, r#"{"type":"Ping"}"#);
}
