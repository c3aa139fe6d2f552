// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! Daemon → CLI responses.

use serde::{Deserialize, Serialize};

/// Wire copy of `gastown_engine::QueueRuntimeState`. Kept as its own type
/// here (rather than depending on the engine crate) so the wire format has
/// no compile-time coupling to the engine's internal representation; the
/// daemon converts between the two at the listener boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueueRuntimeStateDto {
    pub paused: bool,
    pub paused_by: Option<String>,
    pub last_dispatch_at_ms: Option<u64>,
    pub last_dispatch_count: u32,
}

/// Response from daemon to CLI
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum Response {
    /// Generic success
    Ok,

    /// Current queue runtime-state snapshot
    QueueRuntimeState(QueueRuntimeStateDto),

    /// Health check response
    Pong,

    /// Error response
    Error { message: String },
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
