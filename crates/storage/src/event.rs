// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! Store event stream items.

use gastown_core::IssueId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The kinds of event the convoy manager and patrols care about. Additional
/// kinds the store may emit are carried by [`StoreEvent::detail`] rather than
/// widening this enum, so a store upgrade never breaks deserialization here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreEventKind {
    Create,
    Close,
    LabelAdd,
    LabelRemove,
    #[serde(other)]
    Other,
}

gastown_core::simple_display! {
    StoreEventKind {
        Create => "create",
        Close => "close",
        LabelAdd => "label_add",
        LabelRemove => "label_remove",
        Other => "other",
    }
}

/// One item from a store's event stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreEvent {
    pub kind: StoreEventKind,
    pub issue_id: IssueId,
    pub at_ms: u64,
    #[serde(default)]
    pub detail: BTreeMap<String, Value>,
}

impl StoreEvent {
    pub fn new(kind: StoreEventKind, issue_id: IssueId, at_ms: u64) -> Self {
        Self {
            kind,
            issue_id,
            at_ms,
            detail: BTreeMap::new(),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: Value) -> Self {
        self.detail.insert(key.into(), value);
        self
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
