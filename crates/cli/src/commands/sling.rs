// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! `sling <issue...> [rig]`: batch enrollment of one or more issues into a
//! freshly created convoy.

use crate::exit_error::CliError;
use clap::Args;
use gastown_core::{Clock, IssueId, RigName};
use gastown_engine::EnrollError;
use gastown_store::Store;

#[derive(Args)]
pub struct SlingArgs {
    /// Issue ids to enroll into one new convoy.
    #[arg(required = true)]
    pub issues: Vec<String>,
    /// Pin the convoy to a rig instead of resolving one from the routing map.
    #[arg(long)]
    pub rig: Option<String>,
}

pub async fn handle<St: Store + ?Sized, Clk: Clock>(
    store: &St,
    routing: &gastown_adapters::RoutingMap,
    clock: &Clk,
    issues: Vec<String>,
    rig: Option<String>,
) -> Result<(), CliError> {
    let issue_ids: Vec<IssueId> = issues.into_iter().map(IssueId::from_string).collect();
    let explicit_rig = rig.map(RigName::new);
    let now_ms = clock.epoch_ms();

    match gastown_engine::enroll(store, routing, &issue_ids, explicit_rig, now_ms).await {
        Ok(outcome) => {
            println!(
                "Created convoy {} tracking {} issue(s) on rig {}",
                outcome.convoy_id,
                issue_ids.len(),
                outcome.rig
            );
            Ok(())
        }
        Err(EnrollError::AlreadyTracked { issue, convoy }) => Err(report_conflict(store, &issue, &convoy).await),
        Err(e) => Err(e.into()),
    }
}

/// Report the convoy blocking enrollment with its full membership, not just
/// the submitted batch: the convoy may already track members outside this
/// batch, and those members' status belongs in the conflict report too.
async fn report_conflict<St: Store + ?Sized>(store: &St, conflicting: &IssueId, convoy_id: &IssueId) -> CliError {
    let mut lines = vec![format!("issue {conflicting} already tracked by open convoy {convoy_id}:")];

    let members: Vec<IssueId> = match store.get(convoy_id).await {
        Ok(convoy) => convoy.tracked_members().cloned().collect(),
        Err(_) => vec![conflicting.clone()],
    };

    for id in &members {
        let status = match store.get(id).await {
            Ok(issue) => issue.status.to_string(),
            Err(_) => "n/a".to_string(),
        };
        lines.push(format!("  {id}: {status}"));
    }

    CliError::validation(lines.join("\n"))
}

#[cfg(test)]
#[path = "sling_tests.rs"]
mod tests;
