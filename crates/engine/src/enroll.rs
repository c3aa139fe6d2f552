// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! Batch enrollment: turn a list of issue ids into a single tracking
//! convoy, resolving the target rig either explicitly or via the routing map.

use crate::error::EnrollError;
use gastown_adapters::RoutingMap;
use gastown_core::{ConvoyId, Dependency, DependencyKind, Issue, IssueId, IssueStatus, IssueType, RigName};
use gastown_store::{IssuePatch, ListFilter, Store};
use std::collections::BTreeMap;

/// Result of a successful enrollment: the convoy id and the rig every member
/// resolved (or was pinned) to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollOutcome {
    pub convoy_id: IssueId,
    pub rig: RigName,
}

/// Enroll `issue_ids` into a single new convoy.
///
/// If `explicit_rig` is `Some`, every issue's prefix must resolve (via
/// `routing`) to that same rig, else the batch is rejected listing each
/// issue's actual resolution. If `None`, every issue's prefix must resolve
/// to the *same* rig via `routing`; a split resolution is rejected the same
/// way.
pub async fn enroll<St: Store + ?Sized>(
    store: &St,
    routing: &RoutingMap,
    issue_ids: &[IssueId],
    explicit_rig: Option<RigName>,
    now_ms: u64,
) -> Result<EnrollOutcome, EnrollError> {
    enroll_named(store, routing, None, issue_ids, explicit_rig, now_ms).await
}

/// Like [`enroll`] but with an operator-supplied convoy title, for
/// `convoy create <title> <issue...>` — the same batch enrollment with an
/// explicit name instead of the auto-generated one `sling` uses.
pub async fn enroll_named<St: Store + ?Sized>(
    store: &St,
    routing: &RoutingMap,
    title: Option<String>,
    issue_ids: &[IssueId],
    explicit_rig: Option<RigName>,
    now_ms: u64,
) -> Result<EnrollOutcome, EnrollError> {
    if issue_ids.is_empty() {
        return Err(EnrollError::Empty);
    }

    let rig = resolve_rig(routing, issue_ids, explicit_rig)?;

    reject_if_already_tracked(store, issue_ids).await?;

    let convoy_id: IssueId = ConvoyId::new().into();
    let title = title.unwrap_or_else(|| format!("convoy for {} issue(s) on {rig}", issue_ids.len()));
    let mut convoy = Issue::new(convoy_id.clone(), title, IssueType::Convoy, now_ms);
    for issue_id in issue_ids {
        convoy.dependencies.push(Dependency::new(DependencyKind::ParentChild, issue_id.clone(), false));
    }
    store.create(convoy).await?;

    Ok(EnrollOutcome { convoy_id, rig })
}

/// Add one more member to an existing open convoy (`convoy add <cv> <issue>`).
///
/// Rejects if `issue_id` is already tracked by any open convoy (including
/// `convoy_id` itself), matching the at-most-one-tracker invariant.
pub async fn add_member<St: Store + ?Sized>(store: &St, convoy_id: &IssueId, issue_id: &IssueId) -> Result<(), EnrollError> {
    reject_if_already_tracked(store, std::slice::from_ref(issue_id)).await?;
    // get() only to confirm the convoy exists; the membership edge itself is
    // appended by the patch below.
    store.get(convoy_id).await?;

    let patch = IssuePatch::new().track_member(Dependency::new(DependencyKind::ParentChild, issue_id.clone(), false));
    store.update(convoy_id, patch).await?;
    Ok(())
}

fn resolve_rig(routing: &RoutingMap, issue_ids: &[IssueId], explicit_rig: Option<RigName>) -> Result<RigName, EnrollError> {
    if let Some(expected) = explicit_rig {
        tracing::warn!("sling with an explicit rig argument is deprecated; prefer routing-map resolution");
        let mismatches: Vec<_> = issue_ids
            .iter()
            .filter_map(|id| {
                let resolved = routing.resolve(id.prefix());
                match resolved {
                    Some(r) if *r == expected => None,
                    Some(r) => Some((id.clone(), r.to_string())),
                    None => Some((id.clone(), "<unrouted>".to_string())),
                }
            })
            .collect();
        if !mismatches.is_empty() {
            return Err(EnrollError::RigMismatch { expected: expected.to_string(), mismatches });
        }
        return Ok(expected);
    }

    let mut resolutions: BTreeMap<String, Vec<IssueId>> = BTreeMap::new();
    for id in issue_ids {
        match routing.resolve(id.prefix()) {
            Some(rig) => resolutions.entry(rig.to_string()).or_default().push(id.clone()),
            None => return Err(EnrollError::UnroutableIssue(id.clone())),
        }
    }

    if resolutions.len() > 1 {
        let mut detail = Vec::new();
        for (rig, ids) in &resolutions {
            for id in ids {
                detail.push((id.clone(), rig.clone()));
            }
        }
        return Err(EnrollError::InconsistentRigs(detail));
    }

    let (rig, _) = resolutions.into_iter().next().expect("non-empty issue_ids checked above");
    Ok(RigName::new(rig))
}

async fn reject_if_already_tracked<St: Store + ?Sized>(store: &St, issue_ids: &[IssueId]) -> Result<(), EnrollError> {
    let open_convoys = store.list(ListFilter::new().with_type(IssueType::Convoy).with_status(IssueStatus::Open)).await?;
    for convoy in &open_convoys {
        if let Some(hit) = issue_ids.iter().find(|id| convoy.tracked_members().any(|m| m == *id)) {
            return Err(EnrollError::AlreadyTracked { issue: hit.clone(), convoy: convoy.id.clone() });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "enroll_tests.rs"]
mod tests;
