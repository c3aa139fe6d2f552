// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! Partial mutation of an issue, applied atomically by [`crate::Store::update`].

use gastown_core::{CloseReason, Dependency, IssueStatus, SessionId};
use std::collections::BTreeSet;

/// A set of field changes to apply to one issue.
///
/// `None` fields are left untouched; label fields are applied as
/// add-then-remove so a single patch can both admit and claim in one call,
/// though the dispatcher itself always issues them as two separate patches.
#[derive(Debug, Clone, Default)]
pub struct IssuePatch {
    pub status: Option<IssueStatus>,
    pub close_reason: Option<CloseReason>,
    pub closed_at_ms: Option<u64>,
    pub bound_session: Option<Option<SessionId>>,
    pub add_labels: BTreeSet<String>,
    pub remove_labels: BTreeSet<String>,
    /// An extra dependency edge to append, e.g. a new `parent-child` member
    /// when `convoy add` grows an existing convoy.
    pub add_dependency: Option<Dependency>,
}

impl IssuePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close(reason: impl Into<String>, at_ms: u64) -> Self {
        Self {
            status: Some(IssueStatus::Closed),
            close_reason: Some(reason.into()),
            closed_at_ms: Some(at_ms),
            ..Self::default()
        }
    }

    pub fn bind_session(session: SessionId) -> Self {
        Self {
            bound_session: Some(Some(session)),
            ..Self::default()
        }
    }

    pub fn add_label(mut self, label: impl Into<String>) -> Self {
        self.add_labels.insert(label.into());
        self
    }

    pub fn remove_label(mut self, label: impl Into<String>) -> Self {
        self.remove_labels.insert(label.into());
        self
    }

    pub fn track_member(mut self, dependency: Dependency) -> Self {
        self.add_dependency = Some(dependency);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.close_reason.is_none()
            && self.closed_at_ms.is_none()
            && self.bound_session.is_none()
            && self.add_labels.is_empty()
            && self.remove_labels.is_empty()
            && self.add_dependency.is_none()
    }
}

#[cfg(test)]
#[path = "patch_tests.rs"]
mod tests;
