// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! `convoy create|add|check|status|list|stranded|close|land`: the convoy
//! manager's operator surface.

use crate::exit_error::CliError;
use crate::output::{handle_list, OutputFormat};
use clap::{Args, Subcommand};
use gastown_adapters::{RoutingMap, SessionAdapter};
use gastown_core::{Clock, IssueId, RigName};
use gastown_store::{IssuePatch, ListFilter, Store};
use serde::Serialize;
use std::io::Write;

#[derive(Args)]
pub struct ConvoyArgs {
    #[command(subcommand)]
    pub command: ConvoyCommand,
}

#[derive(Subcommand)]
pub enum ConvoyCommand {
    /// Create a new convoy with an explicit title
    Create {
        title: String,
        #[arg(required = true)]
        issues: Vec<String>,
        #[arg(long)]
        rig: Option<String>,
    },
    /// Add one more member to an existing convoy
    Add { convoy: String, issue: String },
    /// Manually drive a convoy's feed (or every open convoy, if none named)
    Check { convoy: Option<String> },
    /// Show one convoy's members and their status
    Status { convoy: String },
    /// List convoys
    List {
        /// Include closed convoys
        #[arg(long)]
        all: bool,
    },
    /// List convoys with a ready member but no bound session
    Stranded,
    /// Close a convoy
    Close {
        convoy: String,
        #[arg(long)]
        reason: String,
    },
    /// Close a convoy once every member is closed, erroring otherwise
    Land { convoy: String },
}

pub async fn create<St: Store + ?Sized, Clk: Clock>(
    store: &St,
    routing: &RoutingMap,
    clock: &Clk,
    title: String,
    issues: Vec<String>,
    rig: Option<String>,
) -> Result<(), CliError> {
    let issue_ids: Vec<IssueId> = issues.into_iter().map(IssueId::from_string).collect();
    let explicit_rig = rig.map(RigName::new);
    let now_ms = clock.epoch_ms();

    let outcome = gastown_engine::enroll_named(store, routing, Some(title), &issue_ids, explicit_rig, now_ms).await?;
    println!("Created convoy {} tracking {} issue(s) on rig {}", outcome.convoy_id, issue_ids.len(), outcome.rig);
    Ok(())
}

pub async fn add<St: Store + ?Sized>(store: &St, convoy: String, issue: String) -> Result<(), CliError> {
    let convoy_id = IssueId::from_string(convoy);
    let issue_id = IssueId::from_string(issue);
    gastown_engine::add_member(store, &convoy_id, &issue_id).await?;
    println!("Added {issue_id} to convoy {convoy_id}");
    Ok(())
}

pub async fn check<St, Sess, Clk>(store: &St, sessions: &Sess, clock: &Clk, convoy: Option<String>) -> Result<(), CliError>
where
    St: Store + ?Sized,
    Sess: SessionAdapter + ?Sized,
    Clk: Clock,
{
    if let Some(convoy) = convoy {
        let convoy_id = IssueId::from_string(convoy);
        let outcome = gastown_engine::check(store, sessions, clock, &convoy_id).await?;
        println!("{convoy_id}: {outcome:?}");
        return Ok(());
    }

    let open_convoys = store.list(ListFilter::new().with_type(gastown_core::IssueType::Convoy).with_status(gastown_core::IssueStatus::Open)).await?;
    for convoy in &open_convoys {
        let outcome = gastown_engine::check(store, sessions, clock, &convoy.id).await?;
        println!("{}: {:?}", convoy.id, outcome);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct ConvoyStatus {
    id: String,
    title: String,
    status: String,
    members: Vec<MemberStatus>,
}

#[derive(Debug, Serialize)]
struct MemberStatus {
    id: String,
    status: String,
}

pub async fn status<St: Store + ?Sized>(store: &St, format: OutputFormat, convoy: String) -> Result<(), CliError> {
    let convoy_id = IssueId::from_string(convoy);
    let convoy = store.get(&convoy_id).await?;

    let mut members = Vec::new();
    for member_id in convoy.tracked_members() {
        let status = match store.get(member_id).await {
            Ok(member) => member.status.to_string(),
            Err(_) => "n/a".to_string(),
        };
        members.push(MemberStatus { id: member_id.as_str().to_string(), status });
    }

    let report = ConvoyStatus {
        id: convoy.id.as_str().to_string(),
        title: convoy.title.clone(),
        status: convoy.status.to_string(),
        members,
    };

    crate::output::format_or_json(format, &report, || {
        println!("{} ({}): {}", report.id, report.status, report.title);
        for member in &report.members {
            println!("  {}: {}", member.id, member.status);
        }
    })?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct ConvoySummary {
    id: String,
    title: String,
    status: String,
    member_count: usize,
}

pub async fn list<St: Store + ?Sized>(store: &St, format: OutputFormat, all: bool) -> Result<(), CliError> {
    let mut filter = ListFilter::new().with_type(gastown_core::IssueType::Convoy);
    if !all {
        filter = filter.with_status(gastown_core::IssueStatus::Open);
    }
    let convoys = store.list(filter).await?;

    let rows: Vec<ConvoySummary> = convoys
        .iter()
        .map(|c| ConvoySummary {
            id: c.id.as_str().to_string(),
            title: c.title.clone(),
            status: c.status.to_string(),
            member_count: c.tracked_members().count(),
        })
        .collect();

    handle_list(format, &rows, "no convoys", |rows, out| {
        for row in rows {
            let _ = writeln!(out, "{}  {:<10}  {} member(s)  {}", row.id, row.status, row.member_count, row.title);
        }
    })?;
    Ok(())
}

pub async fn stranded<St: Store + ?Sized>(store: &St, format: OutputFormat) -> Result<(), CliError> {
    let stranded = gastown_engine::list_stranded(store).await?;
    let rows: Vec<String> = stranded.iter().map(|id| id.as_str().to_string()).collect();
    handle_list(format, &rows, "no stranded convoys", |rows, out| {
        for id in rows {
            let _ = writeln!(out, "{id}");
        }
    })?;
    Ok(())
}

pub async fn close<St: Store + ?Sized, Clk: Clock>(store: &St, clock: &Clk, convoy: String, reason: String) -> Result<(), CliError> {
    let convoy_id = IssueId::from_string(convoy);
    store.update(&convoy_id, IssuePatch::close(reason, clock.epoch_ms())).await?;
    println!("Closed convoy {convoy_id}");
    Ok(())
}

pub async fn land<St: Store + ?Sized, Clk: Clock>(store: &St, clock: &Clk, convoy: String) -> Result<(), CliError> {
    let convoy_id = IssueId::from_string(convoy);
    let convoy = store.get(&convoy_id).await?;

    let mut open_members = Vec::new();
    for member_id in convoy.tracked_members() {
        if let Ok(member) = store.get(member_id).await {
            if member.status != gastown_core::IssueStatus::Closed {
                open_members.push(member_id.as_str().to_string());
            }
        }
    }

    if !open_members.is_empty() {
        return Err(CliError::validation(format!(
            "convoy {convoy_id} still has open member(s): {}",
            open_members.join(", ")
        )));
    }

    store.update(&convoy_id, IssuePatch::close("landed", clock.epoch_ms())).await?;
    println!("Landed convoy {convoy_id}");
    Ok(())
}

#[cfg(test)]
#[path = "convoy_tests.rs"]
mod tests;
