// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! The rig routing map: `<prefix> -> <rig name>`.
//!
//! Read at daemon start and refreshed on demand; resolves the target rig of
//! a freshly-named issue from its id prefix.

use gastown_core::RigName;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("failed to read routing file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed routing entry on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct RoutingEntry {
    prefix: String,
    rig: String,
}

/// `<prefix> -> <rig name>` lookup table.
#[derive(Debug, Clone, Default)]
pub struct RoutingMap {
    entries: BTreeMap<String, RigName>,
}

impl RoutingMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a newline-delimited JSON routing file: one
    /// `{ "prefix": "...", "rig": "..." }` object per line, read streaming
    /// rather than parsed as a single JSON document.
    pub fn load(path: &Path) -> Result<Self, RoutingError> {
        let text = std::fs::read_to_string(path).map_err(|source| RoutingError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, RoutingError> {
        let mut entries = BTreeMap::new();
        let stream = serde_json::Deserializer::from_str(text).into_iter::<RoutingEntry>();
        for (line_no, parsed) in stream.enumerate() {
            let entry = parsed.map_err(|source| RoutingError::Parse { line: line_no + 1, source })?;
            entries.insert(entry.prefix, RigName::new(entry.rig));
        }
        Ok(Self { entries })
    }

    /// Resolve `prefix` to its rig, if the routing map names one.
    pub fn resolve(&self, prefix: &str) -> Option<&RigName> {
        self.entries.get(prefix)
    }

    pub fn insert(&mut self, prefix: impl Into<String>, rig: RigName) {
        self.entries.insert(prefix.into(), rig);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "routing_tests.rs"]
mod tests;
