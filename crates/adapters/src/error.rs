// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

use thiserror::Error;

/// Errors from the session boundary.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("failed to spawn session for rig {rig}: {reason}")]
    SpawnFailed { rig: String, reason: String },

    #[error("failed to bind issue {issue} to session {session}: {reason}")]
    BindFailed {
        issue: String,
        session: String,
        reason: String,
    },

    #[error("failed to start session {session}: {reason}")]
    StartFailed { session: String, reason: String },
}
