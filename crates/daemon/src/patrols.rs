// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! Wiring the three coordination-relevant patrols onto the scheduler:
//! event poll, stranded scan, and queue dispatch. Each is one independent
//! loop sharing nothing but the store, the session adapter, and the
//! shutdown token: no shared state beyond immutable config and a logger.

use crate::config::Config;
use crate::watermarks::WatermarkTable;
use gastown_adapters::SessionAdapter;
use gastown_core::{Clock, MoleculeHandle};
use gastown_engine::{
    event_driven_feed, run_dispatch_cycle, spawn_patrol, stranded_sweep, EngineConfig, PatrolHandle,
    PatrolSpec, QueueRuntimeState,
};
use gastown_store::Store;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::warn;

pub const EVENT_POLL_SLUG: &str = "event_poll";
pub const STRANDED_SCAN_SLUG: &str = "stranded_scan";
pub const QUEUE_DISPATCH_SLUG: &str = "queue_dispatch";

/// Spawn the event-poll, stranded-scan, and queue-dispatch patrols against
/// `store`, returning their handles. A patrol disabled in `config`'s
/// `town.toml` is simply absent from the returned list.
pub fn spawn_core_patrols<Clk>(
    store: Arc<dyn Store>,
    sessions: Arc<dyn SessionAdapter>,
    clock: Clk,
    config: &Config,
    queue_runtime: Arc<Mutex<QueueRuntimeState>>,
    watermarks: Arc<WatermarkTable>,
    token: CancellationToken,
) -> Vec<PatrolHandle>
where
    Clk: Clock + 'static,
{
    let mut handles = Vec::new();

    let event_poll = config.patrol(EVENT_POLL_SLUG, Duration::from_secs(5));
    {
        let store = Arc::clone(&store);
        let sessions = Arc::clone(&sessions);
        let clock = clock.clone();
        let watermarks = Arc::clone(&watermarks);
        let handle = spawn_patrol(
            PatrolSpec { slug: EVENT_POLL_SLUG.to_string(), enabled: event_poll.enabled, interval: event_poll.interval() },
            token.clone(),
            MoleculeHandle::null,
            move |molecule| {
                let store = Arc::clone(&store);
                let sessions = Arc::clone(&sessions);
                let clock = clock.clone();
                let watermarks = Arc::clone(&watermarks);
                async move {
                    let store_name = store.name().to_string();
                    let warm_up = watermarks.is_first_cycle(&store_name);
                    let watermark = watermarks.get(&store_name);
                    match event_driven_feed(store.as_ref(), sessions.as_ref(), &clock, watermark, warm_up).await {
                        Ok(next) => {
                            watermarks.set(&store_name, next);
                            molecule.step_closed("poll");
                        }
                        Err(e) => {
                            warn!(error = %e, store = %store_name, "event-driven feed cycle failed");
                            molecule.step_failed("poll");
                        }
                    }
                    molecule.close();
                }
            },
        );
        handles.extend(handle);
    }

    let stranded_scan = config.patrol(STRANDED_SCAN_SLUG, Duration::from_secs(30));
    {
        let store = Arc::clone(&store);
        let sessions = Arc::clone(&sessions);
        let clock = clock.clone();
        let handle = spawn_patrol(
            PatrolSpec { slug: STRANDED_SCAN_SLUG.to_string(), enabled: stranded_scan.enabled, interval: stranded_scan.interval() },
            token.clone(),
            MoleculeHandle::null,
            move |molecule| {
                let store = Arc::clone(&store);
                let sessions = Arc::clone(&sessions);
                let clock = clock.clone();
                async move {
                    match stranded_sweep(store.as_ref(), sessions.as_ref(), &clock).await {
                        Ok(dispatched) => {
                            if dispatched > 0 {
                                tracing::info!(dispatched, "stranded sweep fed convoys");
                            }
                            molecule.step_closed("sweep");
                        }
                        Err(e) => {
                            warn!(error = %e, "stranded sweep cycle failed");
                            molecule.step_failed("sweep");
                        }
                    }
                    molecule.close();
                }
            },
        );
        handles.extend(handle);
    }

    let queue_dispatch = config.patrol(QUEUE_DISPATCH_SLUG, Duration::from_secs(10));
    {
        let store = Arc::clone(&store);
        let sessions = Arc::clone(&sessions);
        let clock = clock.clone();
        let queue_runtime = Arc::clone(&queue_runtime);
        let limits = config.document.queue.clone();
        let handle = spawn_patrol(
            PatrolSpec { slug: QUEUE_DISPATCH_SLUG.to_string(), enabled: queue_dispatch.enabled, interval: queue_dispatch.interval() },
            token.clone(),
            MoleculeHandle::null,
            move |molecule| {
                let store = Arc::clone(&store);
                let sessions = Arc::clone(&sessions);
                let clock = clock.clone();
                let queue_runtime = Arc::clone(&queue_runtime);
                let limits = limits.clone();
                async move {
                    run_queue_dispatch_cycle(store.as_ref(), sessions.as_ref(), &clock, &limits, &queue_runtime).await;
                    molecule.close();
                }
            },
        );
        handles.extend(handle);
    }

    handles
}

async fn run_queue_dispatch_cycle<St, Sess, Clk>(
    store: &St,
    sessions: &Sess,
    clock: &Clk,
    limits: &EngineConfig,
    queue_runtime: &Mutex<QueueRuntimeState>,
) where
    St: Store + ?Sized,
    Sess: SessionAdapter + ?Sized,
    Clk: Clock,
{
    // run_dispatch_cycle needs &mut QueueRuntimeState for the duration of
    // the cycle's store calls; cloning it out and writing the result back
    // keeps the lock from being held across await points.
    let mut runtime_copy = queue_runtime.lock().clone();
    match run_dispatch_cycle(store, sessions, clock, limits, &mut runtime_copy, false).await {
        Ok(report) => {
            if !report.dispatched.is_empty() || !report.failed.is_empty() {
                tracing::info!(dispatched = report.dispatched.len(), failed = report.failed.len(), "queue dispatch cycle");
            }
        }
        Err(e) => warn!(error = %e, "queue dispatch cycle failed"),
    }
    *queue_runtime.lock() = runtime_copy;
}

#[cfg(test)]
#[path = "patrols_tests.rs"]
mod tests;
