// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! Assembles the store/session/routing/clock handles the store-direct
//! commands (`sling`, `convoy ...`, `queue list|clear|run`) need. `queue
//! pause|resume|status` bypass this entirely and go through
//! [`crate::client::DaemonClient`] instead.
//!
//! `gastown-store` ships only the `MemoryStore` fake: a durable store is out
//! of scope for this core, so each CLI invocation starts from an empty table
//! rather than sharing state with a running daemon's own store handle. That
//! is a scope limitation, not a bug — the trait boundary is exactly where a
//! production build would plug in a shared backend.

use crate::exit_error::CliError;
use gastown_adapters::{NoopSessionAdapter, RoutingMap};
use gastown_core::SystemClock;
use gastown_daemon::Config;
use gastown_store::MemoryStore;

pub struct Context {
    pub store: MemoryStore,
    pub sessions: NoopSessionAdapter,
    pub clock: SystemClock,
    pub routing: RoutingMap,
    pub config: Config,
}

impl Context {
    pub fn load() -> Result<Self, CliError> {
        let config = Config::load()?;
        let routing = if config.routing_path.exists() {
            RoutingMap::load(&config.routing_path)?
        } else {
            RoutingMap::new()
        };
        Ok(Self {
            store: MemoryStore::new("hq"),
            sessions: NoopSessionAdapter::new(),
            clock: SystemClock,
            routing,
            config,
        })
    }

    pub fn socket_path(&self) -> std::path::PathBuf {
        self.config.socket_path.clone()
    }
}
