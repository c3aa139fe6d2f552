// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! Tunable limits for the work queue dispatcher.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Town-wide dispatcher limits, loaded by the daemon from `town.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Ceiling on simultaneous workers, town-wide.
    pub max_concurrent: usize,
    /// Max dispatches per cycle.
    pub batch_size: usize,
    /// Pause between successive dispatches, in milliseconds.
    pub spawn_delay_ms: u64,
}

impl EngineConfig {
    pub fn spawn_delay(&self) -> Duration {
        Duration::from_millis(self.spawn_delay_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 4,
            batch_size: 4,
            spawn_delay_ms: 500,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
