// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! Rig naming.

use serde::{Deserialize, Serialize};

/// The special store name that must never be treated as parked, even if its
/// rig carries the parked flag.
pub const HQ_STORE: &str = "hq";

/// A named workspace (repository + store + branch family) a worker runs
/// inside.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RigName(pub String);

impl RigName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RigName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RigName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RigName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for RigName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
