// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! CLI → daemon requests.

use serde::{Deserialize, Serialize};

/// The three queue-runtime operations that must reach the running daemon's
/// in-memory state, plus a bare liveness check. Every other CLI command
/// (`sling`, `convoy ...`, `queue run --dry-run`) talks to the store
/// directly and never goes over this wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Request {
    QueuePause { by: String },
    QueueResume,
    QueueStatus,
    Ping,
}

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;
