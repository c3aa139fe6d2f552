// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! The work queue dispatcher: labels are the only admission signal,
//! the runtime state record is operator-facing status, not authority.

use crate::config::EngineConfig;
use crate::dispatch;
use crate::error::DispatchError;
use crate::runtime_state::QueueRuntimeState;
use gastown_adapters::SessionAdapter;
use gastown_core::{label, Clock, IssueId, RigName};
use gastown_store::{IssuePatch, LabelFilter, ListFilter, Store};
use serde_json::Value;

/// One issue dispatched (or planned for dispatch) during a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedDispatch {
    pub issue_id: IssueId,
    pub rig: RigName,
}

/// Summary of a completed (or dry-run) dispatch cycle.
#[derive(Debug, Clone, Default)]
pub struct DispatchCycleReport {
    pub dispatched: Vec<PlannedDispatch>,
    pub failed: Vec<(IssueId, String)>,
    pub paused: bool,
    pub capacity: usize,
}

/// Count issues the store currently shows bound to a live session.
///
/// This stands in for "observable session-name pattern": the core has
/// no process table of its own, so it infers activity from the store's own
/// bookkeeping.
async fn count_active<St: Store + ?Sized>(store: &St) -> Result<usize, DispatchError> {
    let all = store.list(ListFilter::new()).await?;
    Ok(all.iter().filter(|i| i.is_bound()).count())
}

/// Run one dispatch cycle.
///
/// If `dry_run` is true, performs steps 1-6 only and returns the plan
/// without claiming or dispatching anything.
pub async fn run_dispatch_cycle<St, Sess, Clk>(
    store: &St,
    sessions: &Sess,
    clock: &Clk,
    config: &EngineConfig,
    runtime: &mut QueueRuntimeState,
    dry_run: bool,
) -> Result<DispatchCycleReport, DispatchError>
where
    St: Store + ?Sized,
    Sess: SessionAdapter + ?Sized,
    Clk: Clock,
{
    if runtime.paused {
        tracing::info!("queue dispatch skipped: paused");
        return Ok(DispatchCycleReport { paused: true, ..Default::default() });
    }

    let active = count_active(store).await?;
    let capacity = config.max_concurrent.saturating_sub(active);
    if capacity == 0 {
        return Ok(DispatchCycleReport { capacity: 0, ..Default::default() });
    }

    let ready = store.query_ready(Some(&LabelFilter::new(label::QUEUED))).await?;
    let n = capacity.min(config.batch_size).min(ready.len());
    let candidates = &ready[..n];

    let mut report = DispatchCycleReport { capacity, ..Default::default() };

    if dry_run {
        for issue in candidates {
            if let Some(queued) = label::parse_queue_args(&issue.labels) {
                report.dispatched.push(PlannedDispatch { issue_id: issue.id.clone(), rig: queued.rig });
            }
        }
        return Ok(report);
    }

    let mut dispatched_count = 0u32;
    for issue in candidates {
        let Some(queued) = label::parse_queue_args(&issue.labels) else {
            continue;
        };

        claim(store, &issue.id, &issue.labels).await?;

        let opts = build_spawn_options(queued.args.as_ref());
        match dispatch::dispatch(store, sessions, clock, &issue.id, &queued.rig, opts).await {
            Ok(_) => {
                // The store's own write path is the event author: a
                // successful dispatch already touched `update`, which is
                // where a real store would append the `queue_dispatch`
                // event onto the stream this cycle's caller polls next time.
                report.dispatched.push(PlannedDispatch { issue_id: issue.id.clone(), rig: queued.rig.clone() });
                dispatched_count += 1;
                tokio::time::sleep(config.spawn_delay()).await;
            }
            Err(e) => {
                requeue(store, &issue.id, &queued.rig).await?;
                report.failed.push((issue.id.clone(), e.to_string()));
            }
        }
    }

    runtime.record_dispatch(clock.epoch_ms(), dispatched_count);
    Ok(report)
}

/// Strip `queued`/`queued:rig:*`/`queued:args:*` labels from the issue
/// before dispatch.
async fn claim<St: Store + ?Sized>(store: &St, issue_id: &IssueId, labels: &std::collections::BTreeSet<String>) -> Result<(), DispatchError> {
    let mut patch = IssuePatch::new();
    for l in labels.iter().filter(|l| label::is_queue_label(l)) {
        patch = patch.remove_label(l.clone());
    }
    store.update(issue_id, patch).await?;
    tracing::info!(issue = %issue_id, "claim");
    Ok(())
}

/// Re-admit an issue to the queue after a dispatch failure.
async fn requeue<St: Store + ?Sized>(store: &St, issue_id: &IssueId, rig: &RigName) -> Result<(), DispatchError> {
    let mut patch = IssuePatch::new();
    for l in label::queue_labels(rig, None) {
        patch = patch.add_label(l);
    }
    store.update(issue_id, patch).await?;
    tracing::info!(issue = %issue_id, rig = %rig, "requeue");
    Ok(())
}

fn build_spawn_options(args: Option<&Value>) -> gastown_adapters::SpawnOptions {
    let mut opts = gastown_adapters::SpawnOptions::new();
    if let Some(Value::Object(map)) = args {
        for (k, v) in map {
            opts.args.insert(k.clone(), v.clone());
        }
    }
    opts
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "queue_proptests.rs"]
mod proptests;
