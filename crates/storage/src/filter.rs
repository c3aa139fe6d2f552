// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! Query filters accepted by [`crate::Store::query_ready`] and
//! [`crate::Store::list`].

use gastown_core::{IssueStatus, IssueType};

/// Restricts `query_ready` to issues carrying a specific label, e.g.
/// `queued:rig:web` for a single rig's queue.
#[derive(Debug, Clone, Default)]
pub struct LabelFilter {
    pub label: String,
}

impl LabelFilter {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }
}

/// General-purpose listing filter for `Store::list`.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub status: Option<IssueStatus>,
    pub issue_type: Option<IssueType>,
    pub label: Option<String>,
    pub limit: Option<usize>,
}

impl ListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: IssueStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_type(mut self, issue_type: IssueType) -> Self {
        self.issue_type = Some(issue_type);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub(crate) fn matches(&self, issue: &gastown_core::Issue) -> bool {
        if let Some(status) = self.status {
            if issue.status != status {
                return false;
            }
        }
        if let Some(ref want) = self.issue_type {
            if &issue.issue_type != want {
                return false;
            }
        }
        if let Some(ref label) = self.label {
            if !issue.has_label(label) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
