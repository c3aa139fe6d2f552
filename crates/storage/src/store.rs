// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! The `Store` boundary trait.

use crate::{IssuePatch, ListFilter, StoreError, StoreEvent, Watermark};
use async_trait::async_trait;
use gastown_core::{Issue, IssueId, RigName};

use crate::filter::LabelFilter;

/// The issue-tracking backend every coordination component depends on.
///
/// Implementations own all persistence and query planning; callers above
/// this trait never see SQL, files, or wire formats, only [`Issue`] values
/// and [`StoreEvent`] items.
#[async_trait]
pub trait Store: Send + Sync {
    /// Create a new issue (or convoy, which is just an issue of
    /// `type=convoy`), returning its assigned id.
    async fn create(&self, issue: Issue) -> Result<IssueId, StoreError>;

    /// Issues ready for dispatch: unblocked, and matching `filter` if given
    /// (typically a `queued:rig:<name>` label filter).
    async fn query_ready(&self, filter: Option<&LabelFilter>) -> Result<Vec<Issue>, StoreError>;

    /// General-purpose listing, used by operator-facing commands.
    async fn list(&self, filter: ListFilter) -> Result<Vec<Issue>, StoreError>;

    async fn get(&self, id: &IssueId) -> Result<Issue, StoreError>;

    /// Apply `patch` to the issue identified by `id`.
    async fn update(&self, id: &IssueId, patch: IssuePatch) -> Result<(), StoreError>;

    /// Events strictly after `watermark`, oldest first.
    async fn events_since(&self, watermark: Watermark) -> Result<Vec<StoreEvent>, StoreError>;

    /// Whether `rig` is currently flagged parked (excluded from feeding and
    /// dispatch, except for the special `hq` store, see
    /// [`gastown_core::rig::HQ_STORE`]).
    fn is_parked(&self, rig: &RigName) -> bool;

    /// This store's own name, so `hq` can be special-cased by callers.
    fn name(&self) -> &str;
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
