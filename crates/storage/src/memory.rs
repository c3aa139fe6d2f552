// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! In-memory `Store` fake.
//!
//! Backs every test in `gastown-engine`, `gastown-daemon`, and the CLI's
//! black-box integration tests. Shipped behind a `test-support` feature
//! rather than a `#[cfg(test)]`-only module, so downstream crates can use
//! it from their own `[dev-dependencies]`.

use crate::{IssuePatch, ListFilter, Store, StoreError, StoreEvent, Watermark};
use async_trait::async_trait;
use gastown_core::{Issue, IssueId, RigName};
use parking_lot::Mutex;
use std::collections::{BTreeSet, HashSet};

use crate::filter::LabelFilter;

struct MemoryState {
    issues: indexmap::IndexMap<IssueId, Issue>,
    events: Vec<StoreEvent>,
    parked_rigs: HashSet<RigName>,
}

/// A `parking_lot::Mutex`-guarded in-memory table of issues and an
/// append-only event log.
pub struct MemoryStore {
    name: String,
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Mutex::new(MemoryState {
                issues: indexmap::IndexMap::new(),
                events: Vec::new(),
                parked_rigs: HashSet::new(),
            }),
        }
    }

    /// Seed the store with an issue, overwriting any existing entry with the
    /// same id.
    pub fn seed(&self, issue: Issue) {
        self.state.lock().issues.insert(issue.id.clone(), issue);
    }

    pub fn record_event(&self, event: StoreEvent) {
        self.state.lock().events.push(event);
    }

    pub fn park_rig(&self, rig: RigName) {
        self.state.lock().parked_rigs.insert(rig);
    }

    pub fn unpark_rig(&self, rig: &RigName) {
        self.state.lock().parked_rigs.remove(rig);
    }

    /// Snapshot of every issue currently held, in insertion order.
    pub fn snapshot(&self) -> Vec<Issue> {
        self.state.lock().issues.values().cloned().collect()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create(&self, issue: Issue) -> Result<IssueId, StoreError> {
        let id = issue.id.clone();
        self.state.lock().issues.insert(id.clone(), issue);
        Ok(id)
    }

    async fn query_ready(&self, filter: Option<&LabelFilter>) -> Result<Vec<Issue>, StoreError> {
        let state = self.state.lock();
        let ready = state
            .issues
            .values()
            .filter(|issue| {
                issue.status == gastown_core::IssueStatus::Open
                    && !issue.is_bound()
                    && !gastown_core::is_blocked(issue)
                    && match filter {
                        Some(f) => issue.has_label(&f.label),
                        None => true,
                    }
            })
            .cloned()
            .collect();
        Ok(ready)
    }

    async fn list(&self, filter: ListFilter) -> Result<Vec<Issue>, StoreError> {
        let state = self.state.lock();
        let mut matched: Vec<Issue> =
            state.issues.values().filter(|issue| filter.matches(issue)).cloned().collect();
        if let Some(limit) = filter.limit {
            matched.truncate(limit);
        }
        Ok(matched)
    }

    async fn get(&self, id: &IssueId) -> Result<Issue, StoreError> {
        self.state
            .lock()
            .issues
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    async fn update(&self, id: &IssueId, patch: IssuePatch) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        let issue = state.issues.get_mut(id).ok_or_else(|| StoreError::NotFound(id.clone()))?;
        apply_patch(issue, patch);
        Ok(())
    }

    async fn events_since(&self, watermark: Watermark) -> Result<Vec<StoreEvent>, StoreError> {
        Ok(self
            .state
            .lock()
            .events
            .iter()
            .filter(|e| e.at_ms > watermark.epoch_ms())
            .cloned()
            .collect())
    }

    fn is_parked(&self, rig: &RigName) -> bool {
        self.state.lock().parked_rigs.contains(rig)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn apply_patch(issue: &mut Issue, patch: IssuePatch) {
    if let Some(status) = patch.status {
        issue.status = status;
    }
    if let Some(reason) = patch.close_reason {
        issue.close_reason = Some(reason);
    }
    if let Some(at) = patch.closed_at_ms {
        issue.closed_at_ms = Some(at);
    }
    if let Some(session) = patch.bound_session {
        issue.bound_session = session;
    }
    if let Some(dependency) = patch.add_dependency {
        issue.dependencies.push(dependency);
    }
    let labels: BTreeSet<String> = std::mem::take(&mut issue.labels);
    issue.labels = labels
        .into_iter()
        .chain(patch.add_labels.clone())
        .filter(|l| !patch.remove_labels.contains(l))
        .collect();
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
