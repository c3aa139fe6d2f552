// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! The issue ("bead") entity and its dependency edges.

use crate::id::IssueId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Status of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    Open,
    InProgress,
    Closed,
}

impl IssueStatus {
    pub fn is_closed(&self) -> bool {
        matches!(self, IssueStatus::Closed)
    }
}

crate::simple_display! {
    IssueStatus {
        Open => "open",
        InProgress => "in_progress",
        Closed => "closed",
    }
}

/// Type of an issue.
///
/// The empty string is a distinct, legal variant: legacy issues default to
/// `task` but the store may hand back `""` rather than backfilling it. The
/// gate, not the store, is where that default is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueType {
    Task,
    Bug,
    Feature,
    Chore,
    Epic,
    SubEpic,
    Convoy,
    Decision,
    Wisp,
    /// Legacy/unset type; treated as `Task` by the type gate.
    #[serde(rename = "")]
    Empty,
}

impl IssueType {
    pub fn as_str(&self) -> &str {
        match self {
            IssueType::Task => "task",
            IssueType::Bug => "bug",
            IssueType::Feature => "feature",
            IssueType::Chore => "chore",
            IssueType::Epic => "epic",
            IssueType::SubEpic => "sub-epic",
            IssueType::Convoy => "convoy",
            IssueType::Decision => "decision",
            IssueType::Wisp => "wisp",
            IssueType::Empty => "",
        }
    }
}

crate::simple_display! {
    IssueType {
        Task => "task",
        Bug => "bug",
        Feature => "feature",
        Chore => "chore",
        Epic => "epic",
        SubEpic => "sub-epic",
        Convoy => "convoy",
        Decision => "decision",
        Wisp => "wisp",
        Empty => "",
    }
}

/// Kind of dependency edge between two issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyKind {
    /// Hard blocker: target must close before the source is unblocked.
    Blocks,
    /// Soft/conditional blocker: the store evaluates the condition; the core
    /// only ever sees the resulting open/closed bit on the target.
    ConditionalBlocks,
    /// The source waits on the target without a hard ordering guarantee from
    /// the source's own perspective; still blocking.
    WaitsFor,
    /// Enumerates convoy membership ("tracks"). Never blocking.
    ParentChild,
    /// Informational only; never blocking.
    Related,
}

impl DependencyKind {
    /// Whether an open dependency of this kind contributes to `is_blocked`.
    pub fn is_blocking_kind(&self) -> bool {
        matches!(
            self,
            DependencyKind::Blocks | DependencyKind::ConditionalBlocks | DependencyKind::WaitsFor
        )
    }
}

crate::simple_display! {
    DependencyKind {
        Blocks => "blocks",
        ConditionalBlocks => "conditional-blocks",
        WaitsFor => "waits-for",
        ParentChild => "parent-child",
        Related => "related",
    }
}

/// A single dependency edge from an issue to another issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub kind: DependencyKind,
    pub target_id: IssueId,
    /// Whether the target is currently closed, as last observed from the
    /// store. The block gate reads this field rather than re-querying, so
    /// that it operates purely on the `Issue` snapshot handed to it.
    pub target_closed: bool,
}

impl Dependency {
    pub fn new(kind: DependencyKind, target_id: IssueId, target_closed: bool) -> Self {
        Self {
            kind,
            target_id,
            target_closed,
        }
    }
}

/// Reason an issue was closed, if any.
pub type CloseReason = String;

/// A unit of work ("bead") as observed from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: IssueId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: IssueStatus,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub priority: i32,
    #[serde(default)]
    pub labels: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub close_reason: Option<CloseReason>,
    pub created_at_ms: u64,
    pub updated_at_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at_ms: Option<u64>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    /// Session this issue is currently bound to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound_session: Option<crate::id::SessionId>,
}

impl Issue {
    /// Construct a freshly created issue. Used by the engine when minting
    /// auto-convoys and by batch enrollment; every other field starts empty
    /// and is filled in by later store mutations.
    pub fn new(id: IssueId, title: impl Into<String>, issue_type: IssueType, at_ms: u64) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            status: IssueStatus::Open,
            issue_type,
            priority: 2,
            labels: BTreeSet::new(),
            close_reason: None,
            created_at_ms: at_ms,
            updated_at_ms: at_ms,
            closed_at_ms: None,
            dependencies: Vec::new(),
            bound_session: None,
        }
    }

    /// Whether this issue has a live session bound.
    pub fn is_bound(&self) -> bool {
        self.bound_session.is_some()
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    /// Dependencies of convoy-tracking kind ("tracks"), in stored order.
    pub fn tracked_members(&self) -> impl Iterator<Item = &IssueId> {
        self.dependencies
            .iter()
            .filter(|d| d.kind == DependencyKind::ParentChild)
            .map(|d| &d.target_id)
    }

    /// The rig prefix this issue's id routes through.
    pub fn rig_prefix(&self) -> &str {
        self.id.prefix()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Issue {
    /// Construct a minimal open task issue for tests.
    pub fn fixture(id: impl Into<String>) -> Self {
        Self {
            id: IssueId::from_string(id),
            title: "test issue".to_string(),
            description: String::new(),
            status: IssueStatus::Open,
            issue_type: IssueType::Task,
            priority: 2,
            labels: BTreeSet::new(),
            close_reason: None,
            created_at_ms: 0,
            updated_at_ms: 0,
            closed_at_ms: None,
            dependencies: Vec::new(),
            bound_session: None,
        }
    }

    pub fn with_type(mut self, t: IssueType) -> Self {
        self.issue_type = t;
        self
    }

    pub fn with_status(mut self, s: IssueStatus) -> Self {
        self.status = s;
        self
    }

    pub fn with_dependency(mut self, kind: DependencyKind, target: impl Into<String>, target_closed: bool) -> Self {
        self.dependencies.push(Dependency::new(kind, IssueId::from_string(target), target_closed));
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.insert(label.into());
        self
    }

    pub fn bound_to(mut self, session: crate::id::SessionId) -> Self {
        self.bound_session = Some(session);
        self
    }
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
