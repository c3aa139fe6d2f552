// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! `gastownd`: the coordination daemon binary.

use gastown_adapters::{NoopSessionAdapter, SessionAdapter};
use gastown_core::SystemClock;
use gastown_daemon::{listener, patrols, Config, DaemonError, WatermarkTable};
use gastown_engine::QueueRuntimeState;
use gastown_store::{MemoryStore, Store};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::net::UnixListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), DaemonError> {
    tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::load()?;
    std::fs::create_dir_all(&config.state_dir)?;

    if config.socket_path.exists() {
        std::fs::remove_file(&config.socket_path)?;
    }
    let listener = UnixListener::bind(&config.socket_path)
        .map_err(|e| DaemonError::BindFailed(config.socket_path.clone(), e))?;
    info!(socket = %config.socket_path.display(), "listening");

    // The durable issue store is out of scope for this core; the
    // daemon runs against the in-memory fake shipped alongside it until a
    // real store adapter is plugged in at this boundary.
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new("hq"));
    let sessions: Arc<dyn SessionAdapter> = Arc::new(NoopSessionAdapter::new());
    let queue_runtime = Arc::new(Mutex::new(QueueRuntimeState::default()));
    let watermarks = Arc::new(WatermarkTable::new());
    let token = CancellationToken::new();

    let patrol_handles = patrols::spawn_core_patrols(
        Arc::clone(&store),
        sessions,
        SystemClock,
        &config,
        Arc::clone(&queue_runtime),
        watermarks,
        token.clone(),
    );

    let listen_ctx = Arc::new(listener::ListenCtx { queue_runtime });
    let listener_task = tokio::spawn(listener::run(listener, listen_ctx, token.clone()));

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");
    token.cancel();

    for handle in patrol_handles {
        handle.join().await;
    }
    let _ = listener_task.await;

    if config.socket_path.exists() {
        let _ = std::fs::remove_file(&config.socket_path);
    }

    Ok(())
}
