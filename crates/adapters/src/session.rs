// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! The session boundary.
//!
//! A real subprocess/tmux-backed adapter is out of scope here; this
//! trait is where a production build would plug one in, behind the same
//! shared trait a tmux/docker/k8s backend would implement.

use crate::error::AdapterError;
use async_trait::async_trait;
use gastown_core::{IssueId, RigName, SessionId};
use std::collections::BTreeMap;

/// Arguments controlling how a worker session is spawned.
#[derive(Debug, Clone, Default)]
pub struct SpawnOptions {
    /// Free-form spawn arguments decoded from a `queued:args:*` label.
    pub args: BTreeMap<String, serde_json::Value>,
    /// Forces spawn even if the issue already carries a binding.
    pub force: bool,
}

impl SpawnOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forced() -> Self {
        Self { force: true, ..Self::default() }
    }
}

/// An opaque handle to a spawned session; the dispatch primitive never
/// inspects its contents beyond the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    pub id: SessionId,
}

impl SessionHandle {
    pub fn new(id: SessionId) -> Self {
        Self { id }
    }
}

/// Boundary between the dispatch primitive and the worker-session backend.
#[async_trait]
pub trait SessionAdapter: Send + Sync {
    async fn spawn(&self, rig: &RigName, opts: &SpawnOptions) -> Result<SessionHandle, AdapterError>;
    async fn bind(&self, issue: &IssueId, session: &SessionHandle) -> Result<(), AdapterError>;
    async fn start(&self, session: &SessionHandle) -> Result<(), AdapterError>;
}

/// Adapter that always succeeds without doing anything; used for dry-run
/// plumbing and documentation examples.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSessionAdapter;

impl NoopSessionAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SessionAdapter for NoopSessionAdapter {
    async fn spawn(&self, _rig: &RigName, _opts: &SpawnOptions) -> Result<SessionHandle, AdapterError> {
        Ok(SessionHandle::new(SessionId::from_string("noop")))
    }

    async fn bind(&self, _issue: &IssueId, _session: &SessionHandle) -> Result<(), AdapterError> {
        Ok(())
    }

    async fn start(&self, _session: &SessionHandle) -> Result<(), AdapterError> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
