// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

use gastown_core::IssueId;
use thiserror::Error;

/// Errors surfaced by a [`crate::Store`] implementation.
///
/// Every call site that interprets these must treat them fail-open per the
/// block gate's contract: a `StoreError` is never grounds to block or to
/// dispatch, only to retry next cycle.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("issue not found: {0}")]
    NotFound(IssueId),

    #[error("issue already bound to a live session: {id} -> {session}")]
    AlreadyBound { id: IssueId, session: String },

    #[error("conflicting convoy membership for {issue}: already tracked by {convoy}")]
    ConvoyConflict { issue: IssueId, convoy: String },

    #[error("store backend unavailable: {0}")]
    Unavailable(String),

    #[error("malformed store response: {0}")]
    Malformed(String),
}
