// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

use gastown_adapters::AdapterError;
use gastown_core::IssueId;
use gastown_store::StoreError;
use thiserror::Error;

/// Errors from the dispatch primitive.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("issue {0} not found")]
    NotFound(IssueId),

    #[error("issue {issue} already bound to session {session}")]
    AlreadyBound { issue: IssueId, session: String },

    #[error("issue {0} does not pass the type gate")]
    NotDispatchableType(IssueId),

    #[error("issue {0} is blocked by an open dependency")]
    Blocked(IssueId),

    #[error("issue {0} is not open")]
    NotOpen(IssueId),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

/// Errors from batch enrollment.
#[derive(Debug, Error)]
pub enum EnrollError {
    #[error("no issues supplied")]
    Empty,

    #[error("issues do not all resolve to the expected rig {expected}: {mismatches:?}")]
    RigMismatch {
        expected: String,
        mismatches: Vec<(IssueId, String)>,
    },

    #[error("issue {0} has no routable rig prefix")]
    UnroutableIssue(IssueId),

    #[error("issues resolve to different rigs: {0:?}")]
    InconsistentRigs(Vec<(IssueId, String)>),

    #[error("issue {issue} already tracked by open convoy {convoy}")]
    AlreadyTracked { issue: IssueId, convoy: IssueId },

    #[error(transparent)]
    Store(#[from] StoreError),
}
