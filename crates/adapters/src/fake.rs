// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! Fake session adapter for tests: records every call and can be configured
//! to fail at any of the three steps.

use crate::error::AdapterError;
use crate::session::{SessionAdapter, SessionHandle, SpawnOptions};
use async_trait::async_trait;
use gastown_core::{IssueId, RigName, SessionId};
use parking_lot::Mutex;
use std::sync::Arc;

/// One recorded call against a [`FakeSessionAdapter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCall {
    Spawn { rig: RigName },
    Bind { issue: IssueId, session: SessionId },
    Start { session: SessionId },
}

#[derive(Default)]
struct FakeState {
    calls: Vec<SessionCall>,
    fail_spawn: bool,
    fail_bind: bool,
    fail_start: bool,
}

/// Records every call it receives; steps can be toggled to fail so tests can
/// exercise the dispatch primitive's failure handling.
#[derive(Clone, Default)]
pub struct FakeSessionAdapter {
    inner: Arc<Mutex<FakeState>>,
}

impl FakeSessionAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_spawn(&self) {
        self.inner.lock().fail_spawn = true;
    }

    pub fn fail_bind(&self) {
        self.inner.lock().fail_bind = true;
    }

    pub fn fail_start(&self) {
        self.inner.lock().fail_start = true;
    }

    pub fn calls(&self) -> Vec<SessionCall> {
        self.inner.lock().calls.clone()
    }
}

#[async_trait]
impl SessionAdapter for FakeSessionAdapter {
    async fn spawn(&self, rig: &RigName, _opts: &SpawnOptions) -> Result<SessionHandle, AdapterError> {
        let mut state = self.inner.lock();
        state.calls.push(SessionCall::Spawn { rig: rig.clone() });
        if state.fail_spawn {
            return Err(AdapterError::SpawnFailed {
                rig: rig.as_str().to_string(),
                reason: "forced failure".to_string(),
            });
        }
        Ok(SessionHandle::new(SessionId::new()))
    }

    async fn bind(&self, issue: &IssueId, session: &SessionHandle) -> Result<(), AdapterError> {
        let mut state = self.inner.lock();
        state.calls.push(SessionCall::Bind { issue: issue.clone(), session: session.id.clone() });
        if state.fail_bind {
            return Err(AdapterError::BindFailed {
                issue: issue.as_str().to_string(),
                session: session.id.as_str().to_string(),
                reason: "forced failure".to_string(),
            });
        }
        Ok(())
    }

    async fn start(&self, session: &SessionHandle) -> Result<(), AdapterError> {
        let mut state = self.inner.lock();
        state.calls.push(SessionCall::Start { session: session.id.clone() });
        if state.fail_start {
            return Err(AdapterError::StartFailed {
                session: session.id.as_str().to_string(),
                reason: "forced failure".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
