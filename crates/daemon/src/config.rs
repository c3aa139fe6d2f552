// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! Daemon configuration: fixed paths under the state directory,
//! plus `town.toml` overrides for dispatcher limits and per-patrol cadence.
//!
//! One daemon serves the whole town from fixed, non-configurable paths, with
//! the single configurable document being `town.toml`.

use crate::env;
use crate::error::{ConfigError, DaemonError};
use gastown_engine::EngineConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// One patrol's overridable cadence/enable bit, read from `town.toml`'s
/// `[patrols.<slug>]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatrolOverride {
    pub enabled: bool,
    pub interval_secs: u64,
}

impl Default for PatrolOverride {
    fn default() -> Self {
        Self { enabled: true, interval_secs: 30 }
    }
}

impl PatrolOverride {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// The document at `<state_dir>/town.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TownDocument {
    pub queue: EngineConfig,
    pub patrols: BTreeMap<String, PatrolOverride>,
}

/// Daemon configuration: fixed paths plus the loaded `town.toml` document.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root state directory (e.g. `~/.local/state/gastown`).
    pub state_dir: PathBuf,
    /// Path to the control-plane Unix socket.
    pub socket_path: PathBuf,
    /// Path to the daemon's lock/PID file.
    pub lock_path: PathBuf,
    /// Path to the rig routing file.
    pub routing_path: PathBuf,
    /// Path to `town.toml`.
    pub town_toml_path: PathBuf,
    pub document: TownDocument,
}

impl Config {
    /// Load configuration for the daemon serving this town.
    ///
    /// Uses fixed paths under the town's state directory; `town.toml` is
    /// optional — a missing file yields the engine's and every patrol's
    /// defaults.
    pub fn load() -> Result<Self, DaemonError> {
        let state_dir = env::state_dir()?;
        let town_toml_path = state_dir.join("town.toml");
        let document = Self::load_document(&town_toml_path)?;

        Ok(Self {
            socket_path: state_dir.join("daemon.sock"),
            lock_path: state_dir.join("daemon.pid"),
            routing_path: state_dir.join("routing.jsonl"),
            town_toml_path,
            document,
            state_dir,
        })
    }

    fn load_document(path: &std::path::Path) -> Result<TownDocument, DaemonError> {
        if !path.exists() {
            return Ok(TownDocument::default());
        }
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let document: TownDocument = toml::from_str(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        Ok(document)
    }

    /// The configured cadence/enable bit for `slug`, falling back to
    /// `default_interval` when `town.toml` names no override.
    pub fn patrol(&self, slug: &str, default_interval: Duration) -> PatrolOverride {
        self.document.patrols.get(slug).cloned().unwrap_or(PatrolOverride {
            enabled: true,
            interval_secs: default_interval.as_secs(),
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
