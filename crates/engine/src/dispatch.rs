// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! The dispatch primitive.

use crate::error::DispatchError;
use gastown_adapters::{SessionAdapter, SessionHandle, SpawnOptions};
use gastown_core::{
    dispatch_labels, is_blocked, is_dispatchable_type, Clock, ConvoyId, Issue, IssueId, IssueStatus, IssueType,
    RigName,
};
use gastown_store::{IssuePatch, ListFilter, Store};
use std::sync::Arc;

/// Owns the store and session-adapter handles the dispatch primitive (and,
/// by composition, the convoy manager and queue dispatcher) needs.
///
/// Generic over `St: Store` and `Sess: SessionAdapter` so production code
/// wires in real backends while every test uses `MemoryStore` +
/// `FakeSessionAdapter`.
pub struct Dispatcher<St: Store, Sess: SessionAdapter, Clk: Clock> {
    pub store: Arc<St>,
    pub sessions: Arc<Sess>,
    pub clock: Clk,
}

impl<St: Store, Sess: SessionAdapter, Clk: Clock> Dispatcher<St, Sess, Clk> {
    pub fn new(store: Arc<St>, sessions: Arc<Sess>, clock: Clk) -> Self {
        Self { store, sessions, clock }
    }

    /// Run the dispatch primitive against `issue_id` for `rig`.
    ///
    /// Pre-conditions (checked here, in order): the issue exists, is open,
    /// passes the type gate, passes the block gate, and is not already
    /// bound (unless `opts.force`). Effects then run in order: spawn,
    /// locate/create convoy, bind + persist dispatch metadata in one store
    /// mutation, log a "sling" event, start.
    pub async fn dispatch(
        &self,
        issue_id: &IssueId,
        rig: &RigName,
        opts: SpawnOptions,
    ) -> Result<SessionHandle, DispatchError> {
        dispatch(&*self.store, &*self.sessions, &self.clock, issue_id, rig, opts).await
    }
}

/// Free function form of [`Dispatcher::dispatch`], usable without
/// constructing a [`Dispatcher`] (the convoy manager and queue dispatcher
/// call this directly since they already hold their own store/session
/// references).
pub async fn dispatch<St, Sess, Clk>(
    store: &St,
    sessions: &Sess,
    clock: &Clk,
    issue_id: &IssueId,
    rig: &RigName,
    opts: SpawnOptions,
) -> Result<SessionHandle, DispatchError>
where
    St: Store + ?Sized,
    Sess: SessionAdapter + ?Sized,
    Clk: Clock,
{
    let issue = store.get(issue_id).await?;

    if issue.status != IssueStatus::Open {
        return Err(DispatchError::NotOpen(issue_id.clone()));
    }
    if !is_dispatchable_type(&issue.issue_type) {
        return Err(DispatchError::NotDispatchableType(issue_id.clone()));
    }
    if is_blocked(&issue) {
        return Err(DispatchError::Blocked(issue_id.clone()));
    }
    if issue.is_bound() && !opts.force {
        return Err(DispatchError::AlreadyBound {
            issue: issue_id.clone(),
            session: issue.bound_session.map(|s| s.to_string()).unwrap_or_default(),
        });
    }

    // Step 2: spawn an isolated worker session.
    let session = sessions.spawn(rig, &opts).await?;

    // Step 3: locate or create the enclosing convoy.
    let convoy_id = find_or_create_convoy(store, issue_id, clock.epoch_ms()).await?;

    // Step 4 + 6: bind the issue to the session and persist ancillary
    // dispatch metadata (rig, convoy link, spawn args) in the same store
    // mutation. This is the idempotence boundary: a crash after this point
    // is observed by the next admission attempt as "already hooked"
    // (AlreadyBound above).
    let mut patch = IssuePatch { bound_session: Some(Some(session.id.clone())), ..IssuePatch::new() };
    for label in dispatch_labels(rig, &convoy_id, &opts.args) {
        patch = patch.add_label(label);
    }
    store.update(issue_id, patch).await?;
    sessions.bind(issue_id, &session).await?;

    tracing::info!(
        issue = %issue_id,
        rig = %rig,
        convoy_id = %convoy_id,
        session = %session.id,
        "sling"
    );

    // Step 8: start the session. A failure here is logged, not rolled back
    // — the worker and binding already exist, and restarting is the retry
    // knob, not an abort.
    if let Err(e) = sessions.start(&session).await {
        tracing::warn!(issue = %issue_id, error = %e, "session start failed after successful bind");
    }

    Ok(session)
}

/// Find the open convoy tracking `issue_id`, or mint a single-member
/// auto-convoy if none exists. Never creates two convoys for the same
/// member.
async fn find_or_create_convoy<St: Store + ?Sized>(
    store: &St,
    issue_id: &IssueId,
    now_ms: u64,
) -> Result<IssueId, DispatchError> {
    let open_convoys = store
        .list(ListFilter::new().with_type(IssueType::Convoy).with_status(IssueStatus::Open))
        .await?;

    if let Some(existing) = open_convoys.iter().find(|c| c.tracked_members().any(|m| m == issue_id)) {
        return Ok(existing.id.clone());
    }

    let convoy_id: IssueId = ConvoyId::new().into();
    let mut convoy = Issue::new(convoy_id.clone(), format!("auto-convoy for {issue_id}"), IssueType::Convoy, now_ms);
    convoy.dependencies.push(gastown_core::Dependency::new(
        gastown_core::DependencyKind::ParentChild,
        issue_id.clone(),
        false,
    ));
    store.create(convoy).await?;
    Ok(convoy_id)
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
