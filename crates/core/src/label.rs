// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! The label grammar used by the work queue:
//!
//! - `queued` marks a pending task.
//! - `queued:rig:<name>` names the target rig.
//! - `queued:args:<encoded-json>` optionally carries spawn arguments.
//!
//! A second, non-admission grammar records dispatch provenance once an
//! issue has actually been handed to a session:
//!
//! - `dispatched:rig:<name>` the rig that dispatched it.
//! - `dispatched:convoy:<id>` the convoy it was dispatched under.
//! - `dispatched:args:<encoded-json>` the spawn args it was started with.
//!
//! Labels are the authoritative queue; this module is
//! the single place that encodes and decodes that grammar so no other code
//! hand-rolls label prefixes.

use crate::id::IssueId;
use crate::rig::RigName;
use std::collections::BTreeMap;
use thiserror::Error;

pub const QUEUED: &str = "queued";
const RIG_PREFIX: &str = "queued:rig:";
const ARGS_PREFIX: &str = "queued:args:";
const DISPATCH_RIG_PREFIX: &str = "dispatched:rig:";
const DISPATCH_CONVOY_PREFIX: &str = "dispatched:convoy:";
const DISPATCH_ARGS_PREFIX: &str = "dispatched:args:";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LabelError {
    #[error("queued:args label is not valid base64/JSON: {0}")]
    InvalidArgsEncoding(String),
}

/// The decoded label set admitting one issue to the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueLabels {
    pub rig: RigName,
    pub args: Option<serde_json::Value>,
}

/// Build the label set to add to an issue to admit it to the queue.
///
/// Returns the `queued` label, the `queued:rig:<name>` label, and — if
/// `args` is non-null — the `queued:args:<encoded>` label.
pub fn queue_labels(rig: &RigName, args: Option<&serde_json::Value>) -> Vec<String> {
    let mut labels = vec![QUEUED.to_string(), format!("{RIG_PREFIX}{}", rig.as_str())];
    if let Some(args) = args {
        if !args.is_null() {
            labels.push(format!("{ARGS_PREFIX}{}", encode_args(args)));
        }
    }
    labels
}

/// Build the label set recording dispatch provenance: the rig and convoy an
/// issue was dispatched under, and its spawn args (if any). Applied to the
/// issue in the same store mutation that records the session binding, so a
/// store browse can recover who dispatched an issue and with what without a
/// separate event store.
pub fn dispatch_labels(rig: &RigName, convoy_id: &IssueId, args: &BTreeMap<String, serde_json::Value>) -> Vec<String> {
    let mut labels =
        vec![format!("{DISPATCH_RIG_PREFIX}{}", rig.as_str()), format!("{DISPATCH_CONVOY_PREFIX}{convoy_id}")];
    if !args.is_empty() {
        let value = serde_json::Value::Object(args.iter().map(|(k, v)| (k.clone(), v.clone())).collect());
        labels.push(format!("{DISPATCH_ARGS_PREFIX}{}", encode_args(&value)));
    }
    labels
}

fn encode_args(args: &serde_json::Value) -> String {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
    // Labels are plain strings in the store; base64 keeps arbitrary JSON
    // (including colons and whitespace) from colliding with label syntax.
    URL_SAFE_NO_PAD.encode(args.to_string().as_bytes())
}

fn decode_args(encoded: &str) -> Result<serde_json::Value, LabelError> {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|e| LabelError::InvalidArgsEncoding(format!("base64: {e}")))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| LabelError::InvalidArgsEncoding(format!("utf8: {e}")))?;
    serde_json::from_str(&text).map_err(|e| LabelError::InvalidArgsEncoding(format!("json: {e}")))
}

/// Whether `label` is the bare admission marker.
pub fn is_queued_label(label: &str) -> bool {
    label == QUEUED
}

/// Whether `label` belongs to the queue grammar at all (used when stripping
/// queue metadata on claim).
pub fn is_queue_label(label: &str) -> bool {
    label == QUEUED || label.starts_with(RIG_PREFIX) || label.starts_with(ARGS_PREFIX)
}

/// Parse the `queued:rig:<name>` label, if present.
pub fn parse_rig_label(label: &str) -> Option<RigName> {
    label.strip_prefix(RIG_PREFIX).map(RigName::new)
}

/// Parse the `queued:args:<encoded>` label, if present and well-formed.
pub fn parse_args_label(label: &str) -> Option<Result<serde_json::Value, LabelError>> {
    label.strip_prefix(ARGS_PREFIX).map(decode_args)
}

/// Recover the full [`QueueLabels`] from an issue's label set. Returns
/// `None` if no `queued:rig:*` label is present (the rig is mandatory; args
/// are optional).
pub fn parse_queue_args(labels: &std::collections::BTreeSet<String>) -> Option<QueueLabels> {
    let rig = labels.iter().find_map(|l| parse_rig_label(l))?;
    let args = labels.iter().find_map(|l| parse_args_label(l)).and_then(|r| r.ok());
    Some(QueueLabels { rig, args })
}

#[cfg(test)]
#[path = "label_tests.rs"]
mod tests;
