// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! `queue status|list|pause|resume|clear|run`: the work queue dispatcher's
//! operator surface. `status`/`pause`/`resume` round-trip through the
//! running daemon over IPC; `list`/`clear`/`run` talk to the store directly.

use crate::client::DaemonClient;
use crate::exit_error::CliError;
use crate::output::{handle_list, OutputFormat};
use clap::{Args, Subcommand};
use gastown_adapters::SessionAdapter;
use gastown_core::{label, Clock};
use gastown_engine::{EngineConfig, QueueRuntimeState};
use gastown_store::{IssuePatch, ListFilter, Store};
use serde::Serialize;
use std::io::Write;

#[derive(Args)]
pub struct QueueArgs {
    #[command(subcommand)]
    pub command: QueueCommand,
}

#[derive(Subcommand)]
pub enum QueueCommand {
    /// Show the dispatcher's runtime-state record (via the daemon)
    Status,
    /// Pause the dispatcher (via the daemon)
    Pause {
        /// Operator name recorded in the runtime-state record
        #[arg(long, default_value = "operator")]
        by: String,
    },
    /// Resume the dispatcher (via the daemon)
    Resume,
    /// List currently queued issues
    List {
        #[arg(long)]
        bead: Option<String>,
    },
    /// Remove one or every issue from the queue without dispatching it
    Clear {
        #[arg(long)]
        bead: Option<String>,
    },
    /// Run one dispatch cycle in-process
    Run {
        #[arg(long)]
        batch: Option<usize>,
        #[arg(long)]
        max_polecats: Option<usize>,
        #[arg(long)]
        dry_run: bool,
    },
}

pub async fn status(client: &DaemonClient, format: OutputFormat) -> Result<(), CliError> {
    let dto = client.queue_status().await?;
    crate::output::format_or_json(format, &dto, || {
        println!("paused: {}", dto.paused);
        if let Some(by) = &dto.paused_by {
            println!("paused by: {by}");
        }
        println!("last dispatch: {:?} ({} issue(s))", dto.last_dispatch_at_ms, dto.last_dispatch_count);
    })?;
    Ok(())
}

pub async fn pause(client: &DaemonClient, by: String) -> Result<(), CliError> {
    client.queue_pause(by).await?;
    println!("queue paused");
    Ok(())
}

pub async fn resume(client: &DaemonClient) -> Result<(), CliError> {
    client.queue_resume().await?;
    println!("queue resumed");
    Ok(())
}

#[derive(Debug, Serialize)]
struct QueuedIssue {
    id: String,
    rig: String,
}

pub async fn list<St: Store + ?Sized>(store: &St, format: OutputFormat, bead: Option<String>) -> Result<(), CliError> {
    // `list`, not `query_ready`: a queued-but-blocked issue is still queued,
    // and removing its labels is still what cancels it — there is no
    // blocked-status exception to queue membership.
    let queued = store.list(ListFilter::new().with_label(label::QUEUED)).await?;
    let rows: Vec<QueuedIssue> = queued
        .iter()
        .filter(|issue| match bead.as_deref() {
            Some(id) => issue.id.as_str() == id,
            None => true,
        })
        .filter_map(|issue| {
            let queued = label::parse_queue_args(&issue.labels)?;
            Some(QueuedIssue { id: issue.id.as_str().to_string(), rig: queued.rig.to_string() })
        })
        .collect();

    handle_list(format, &rows, "queue is empty", |rows, out| {
        for row in rows {
            let _ = writeln!(out, "{}  {}", row.id, row.rig);
        }
    })?;
    Ok(())
}

pub async fn clear<St: Store + ?Sized>(store: &St, bead: Option<String>) -> Result<(), CliError> {
    let queued = store.list(ListFilter::new().with_label(label::QUEUED)).await?;
    let mut cleared = 0;
    for issue in queued {
        if let Some(ref id) = bead {
            if issue.id.as_str() != id {
                continue;
            }
        }
        let mut patch = IssuePatch::new();
        for l in issue.labels.iter().filter(|l| label::is_queue_label(l)) {
            patch = patch.remove_label(l.clone());
        }
        store.update(&issue.id, patch).await?;
        cleared += 1;
    }

    if let Some(id) = bead {
        if cleared == 0 {
            return Err(CliError::validation(format!("no queued issue {id}")));
        }
    }
    println!("cleared {cleared} issue(s) from the queue");
    Ok(())
}

pub async fn run<St, Sess, Clk>(
    store: &St,
    sessions: &Sess,
    clock: &Clk,
    mut config: EngineConfig,
    batch: Option<usize>,
    max_polecats: Option<usize>,
    dry_run: bool,
) -> Result<(), CliError>
where
    St: Store + ?Sized,
    Sess: SessionAdapter + ?Sized,
    Clk: Clock,
{
    if let Some(batch) = batch {
        config.batch_size = batch;
    }
    if let Some(max) = max_polecats {
        config.max_concurrent = max;
    }

    let mut runtime = QueueRuntimeState::default();
    let report = gastown_engine::run_dispatch_cycle(store, sessions, clock, &config, &mut runtime, dry_run).await?;

    if report.paused {
        println!("queue is paused; nothing dispatched");
        return Ok(());
    }

    for dispatch in &report.dispatched {
        let verb = if dry_run { "would dispatch" } else { "dispatched" };
        println!("{verb} {} on rig {}", dispatch.issue_id, dispatch.rig);
    }
    for (id, reason) in &report.failed {
        println!("failed to dispatch {id}: {reason}");
    }
    if report.dispatched.is_empty() && report.failed.is_empty() {
        println!("nothing to dispatch (capacity {})", report.capacity);
    }

    Ok(())
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
