// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! Shared fixtures for the rest of the workspace's tests.
//!
//! `gastown-store`, `gastown-adapters`, and `gastown-engine` all pull in
//! `gastown-core` with `features = ["test-support"]` rather than
//! hand-rolling their own issue/convoy builders.

use crate::id::{ConvoyId, IssueId};
use crate::issue::{DependencyKind, Issue, IssueStatus, IssueType};

/// A dispatchable task with no dependencies, ready to be picked up.
pub fn ready_task(id: &str) -> Issue {
    Issue::fixture(id).with_type(IssueType::Task)
}

/// A task blocked on an open dependency of the given kind.
pub fn blocked_task(id: &str, on: &str, kind: DependencyKind) -> Issue {
    Issue::fixture(id).with_type(IssueType::Task).with_dependency(kind, on, false)
}

/// A convoy issue tracking the given member ids via `parent-child` deps.
pub fn convoy_with_members(id: impl Into<String>, members: &[&str]) -> Issue {
    let mut convoy = Issue::fixture(id).with_type(IssueType::Convoy);
    for member in members {
        convoy = convoy.with_dependency(DependencyKind::ParentChild, *member, false);
    }
    convoy
}

/// A closed task, as a dependency target fixture.
pub fn closed_task(id: &str) -> Issue {
    Issue::fixture(id).with_type(IssueType::Task).with_status(IssueStatus::Closed)
}

/// Parse a literal id string as an [`IssueId`] without going through the
/// store; convenience for assembling expected-value tuples in tests.
pub fn issue_id(s: &str) -> IssueId {
    IssueId::from_string(s)
}

pub fn convoy_id(s: &str) -> ConvoyId {
    ConvoyId::from_string(s)
}
