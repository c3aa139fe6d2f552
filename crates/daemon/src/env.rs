// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! Centralized environment variable access for the daemon crate.

use crate::error::DaemonError;
use std::path::PathBuf;
use std::time::Duration;

/// Resolve the town's state directory: `GASTOWN_STATE_DIR` > `XDG_STATE_HOME/gastown` > `~/.local/state/gastown`.
pub fn state_dir() -> Result<PathBuf, DaemonError> {
    if let Ok(dir) = std::env::var("GASTOWN_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = dirs::state_dir() {
        return Ok(xdg.join("gastown"));
    }
    dirs::home_dir().map(|home| home.join(".local/state/gastown")).ok_or(DaemonError::NoStateDir)
}

/// Timeout for a single IPC request/response exchange.
pub fn ipc_timeout() -> Duration {
    std::env::var("GASTOWN_IPC_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(5))
}
