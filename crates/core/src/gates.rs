// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! The type gate and block gate.
//!
//! Both are pure functions over an already-fetched [`Issue`] snapshot: they
//! never touch the store themselves. Fail-open behavior for block-gate store
//! errors is the caller's responsibility (the caller holds the `Result` from
//! the store fetch, not this module) — see [`is_blocked_or_open`].

use crate::issue::{Issue, IssueType};

/// Returns true iff `t` is a dispatchable leaf type.
///
/// Aggregates (`epic`, `sub-epic`, `convoy`, `decision`) must never spawn a
/// session; `wisp` issues are ephemeral reaper-managed records, not worker
/// targets, so they are excluded too. The empty type defaults to `task`.
pub fn is_dispatchable_type(t: &IssueType) -> bool {
    matches!(
        t,
        IssueType::Task | IssueType::Bug | IssueType::Feature | IssueType::Chore | IssueType::Empty
    )
}

/// Returns true iff `issue` is blocked by an open dependency of a blocking
/// kind (`blocks`, `conditional-blocks`, `waits-for`). `parent-child` never
/// contributes, by design: a child task may proceed while its parent
/// epic is still open.
pub fn is_blocked(issue: &Issue) -> bool {
    issue
        .dependencies
        .iter()
        .any(|dep| dep.kind.is_blocking_kind() && !dep.target_closed)
}

/// Fail-open wrapper for callers that hold a `Result<Issue, E>` from the
/// store rather than an already-validated `Issue`: any store error is
/// treated as "not blocked" so a transient failure cannot permanently stall
/// the queue or convoy.
pub fn is_blocked_or_open<E>(issue: &Result<Issue, E>) -> bool {
    match issue {
        Ok(issue) => is_blocked(issue),
        Err(_) => false,
    }
}

#[cfg(test)]
#[path = "gates_tests.rs"]
mod tests;
