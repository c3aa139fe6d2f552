// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! The convoy manager: two independent feed paths over the same
//! gates, each dispatching at most one issue per (convoy, invocation).

use crate::dispatch;
use crate::error::DispatchError;
use gastown_adapters::{SessionAdapter, SpawnOptions};
use gastown_core::rig::HQ_STORE;
use gastown_core::{is_blocked, is_dispatchable_type, Clock, IssueStatus, IssueType, RigName};
use gastown_store::{IssuePatch, ListFilter, Store, StoreEventKind, Watermark};

/// Outcome of a single feed attempt against one convoy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedOutcome {
    /// A member was dispatched.
    Dispatched,
    /// No member was ready; the convoy is left as-is.
    NoReadyMember,
    /// Every member was closed; the convoy was auto-closed.
    AutoClosed,
}

/// Advance the convoy manager's event-driven feed (~5 s cadence): poll the
/// store's event stream since `watermark`, and for each `close` event whose
/// target is tracked by an open convoy, feed that convoy's next ready
/// member.
///
/// On the very first call after daemon startup, pass `warm_up = true`: the
/// watermark is advanced but nothing is dispatched.
pub async fn event_driven_feed<St, Sess, Clk>(
    store: &St,
    sessions: &Sess,
    clock: &Clk,
    watermark: Watermark,
    warm_up: bool,
) -> Result<Watermark, DispatchError>
where
    St: Store + ?Sized,
    Sess: SessionAdapter + ?Sized,
    Clk: Clock,
{
    let events = store.events_since(watermark).await?;
    let mut new_watermark = watermark;
    for event in &events {
        new_watermark.advance(event.at_ms);
    }

    if warm_up {
        return Ok(new_watermark);
    }

    let closed_ids: Vec<_> = events
        .iter()
        .filter(|e| e.kind == StoreEventKind::Close)
        .map(|e| e.issue_id.clone())
        .collect();
    if closed_ids.is_empty() {
        return Ok(new_watermark);
    }

    let open_convoys = store
        .list(ListFilter::new().with_type(IssueType::Convoy).with_status(IssueStatus::Open))
        .await?;

    for convoy in open_convoys {
        if !convoy.tracked_members().any(|m| closed_ids.contains(m)) {
            continue;
        }
        feed_next_ready_issue(store, sessions, clock, &convoy).await?;
    }

    Ok(new_watermark)
}

/// The stranded sweep (~30 s cadence): for every open convoy, check
/// whether it has a ready member and no member currently bound. If so, it is
/// "stranded" and gets fed.
pub async fn stranded_sweep<St, Sess, Clk>(store: &St, sessions: &Sess, clock: &Clk) -> Result<usize, DispatchError>
where
    St: Store + ?Sized,
    Sess: SessionAdapter + ?Sized,
    Clk: Clock,
{
    let open_convoys = store
        .list(ListFilter::new().with_type(IssueType::Convoy).with_status(IssueStatus::Open))
        .await?;

    let mut fed = 0;
    for convoy in open_convoys {
        if !is_stranded(store, &convoy).await? {
            continue;
        }
        if feed_first_ready(store, sessions, clock, &convoy).await? == FeedOutcome::Dispatched {
            fed += 1;
        }
    }
    Ok(fed)
}

/// Manually drive one convoy's feed (`convoy check <cv>`), outside of either
/// scheduled cadence. Uses the same ordering and failure-skip rules as the
/// two scheduled paths.
pub async fn check<St, Sess, Clk>(store: &St, sessions: &Sess, clock: &Clk, convoy_id: &gastown_core::IssueId) -> Result<FeedOutcome, DispatchError>
where
    St: Store + ?Sized,
    Sess: SessionAdapter + ?Sized,
    Clk: Clock,
{
    let convoy = store.get(convoy_id).await?;
    feed_first_ready(store, sessions, clock, &convoy).await
}

/// List the ids of every currently-stranded open convoy (`convoy stranded`).
pub async fn list_stranded<St: Store + ?Sized>(store: &St) -> Result<Vec<gastown_core::IssueId>, DispatchError> {
    let open_convoys = store
        .list(ListFilter::new().with_type(IssueType::Convoy).with_status(IssueStatus::Open))
        .await?;

    let mut stranded = Vec::new();
    for convoy in open_convoys {
        if is_stranded(store, &convoy).await? {
            stranded.push(convoy.id);
        }
    }
    Ok(stranded)
}

async fn is_stranded<St: Store + ?Sized>(store: &St, convoy: &gastown_core::Issue) -> Result<bool, DispatchError> {
    let mut has_ready = false;
    let mut has_bound = false;
    for member_id in convoy.tracked_members() {
        let member = match store.get(member_id).await {
            Ok(member) => member,
            Err(_) => continue,
        };
        if member.is_bound() {
            has_bound = true;
        }
        if member.status == IssueStatus::Open
            && !member.is_bound()
            && is_dispatchable_type(&member.issue_type)
            && !is_blocked(&member)
        {
            has_ready = true;
        }
    }
    Ok(has_ready && !has_bound)
}

/// Iterate members in stored order; dispatch the first ready, un-skipped
/// member. Continues past per-member dispatch failures. Auto-closes the
/// convoy if every member is closed.
async fn feed_next_ready_issue<St, Sess, Clk>(
    store: &St,
    sessions: &Sess,
    clock: &Clk,
    convoy: &gastown_core::Issue,
) -> Result<FeedOutcome, DispatchError>
where
    St: Store + ?Sized,
    Sess: SessionAdapter + ?Sized,
    Clk: Clock,
{
    feed_first_ready(store, sessions, clock, convoy).await
}

async fn feed_first_ready<St, Sess, Clk>(
    store: &St,
    sessions: &Sess,
    clock: &Clk,
    convoy: &gastown_core::Issue,
) -> Result<FeedOutcome, DispatchError>
where
    St: Store + ?Sized,
    Sess: SessionAdapter + ?Sized,
    Clk: Clock,
{
    let mut all_closed = true;
    for member_id in convoy.tracked_members() {
        let member = match store.get(member_id).await {
            Ok(member) => member,
            Err(_) => continue,
        };
        if member.status != IssueStatus::Closed {
            all_closed = false;
        } else {
            continue;
        }

        if member.is_bound() || !is_dispatchable_type(&member.issue_type) || is_blocked(&member) {
            continue;
        }

        let rig_prefix = member.rig_prefix().to_string();
        if store.name() != HQ_STORE && store.is_parked(&RigName::new(rig_prefix.clone())) {
            continue;
        }

        match dispatch::dispatch(store, sessions, clock, member_id, &RigName::new(rig_prefix), SpawnOptions::new()).await {
            Ok(_) => return Ok(FeedOutcome::Dispatched),
            Err(_) => continue,
        }
    }

    if all_closed {
        store
            .update(
                &convoy.id,
                IssuePatch::close("all members closed", clock.epoch_ms()),
            )
            .await?;
        return Ok(FeedOutcome::AutoClosed);
    }

    Ok(FeedOutcome::NoReadyMember)
}

#[cfg(test)]
#[path = "convoy_tests.rs"]
mod tests;
