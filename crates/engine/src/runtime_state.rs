// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! Queue runtime state: a single process-local record, persisted as an
//! opaque document alongside the store. Not authoritative — the `queued`
//! labels are the authoritative queue; this is only operator-facing status.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueRuntimeState {
    pub paused: bool,
    pub paused_by: Option<String>,
    pub last_dispatch_at_ms: Option<u64>,
    pub last_dispatch_count: u32,
}

impl Default for QueueRuntimeState {
    fn default() -> Self {
        Self {
            paused: false,
            paused_by: None,
            last_dispatch_at_ms: None,
            last_dispatch_count: 0,
        }
    }
}

impl QueueRuntimeState {
    pub fn pause(&mut self, by: impl Into<String>) {
        self.paused = true;
        self.paused_by = Some(by.into());
    }

    pub fn resume(&mut self) {
        self.paused = false;
        self.paused_by = None;
    }

    pub fn record_dispatch(&mut self, at_ms: u64, count: u32) {
        self.last_dispatch_at_ms = Some(at_ms);
        self.last_dispatch_count = count;
    }
}

#[cfg(test)]
#[path = "runtime_state_tests.rs"]
mod tests;
