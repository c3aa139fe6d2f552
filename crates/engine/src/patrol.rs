// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! The patrol scheduler: one independent, cancellable loop per
//! patrol, sharing nothing but an immutable config and a single shutdown
//! token (the same "one token, many loops" shape the daemon's listener uses
//! for its own accept loops).

use gastown_core::MoleculeHandle;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A single configured patrol: unique slug, enabled bit, and cadence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatrolSpec {
    pub slug: String,
    pub enabled: bool,
    pub interval: Duration,
}

impl PatrolSpec {
    pub fn new(slug: impl Into<String>, interval: Duration) -> Self {
        Self { slug: slug.into(), enabled: true, interval }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Handle to one spawned patrol loop, returned by [`spawn_patrol`].
pub struct PatrolHandle {
    pub slug: String,
    join: JoinHandle<()>,
}

impl PatrolHandle {
    /// Wait for the loop to notice cancellation and return.
    pub async fn join(self) {
        if let Err(e) = self.join.await {
            tracing::error!(patrol = %self.slug, error = %e, "patrol loop panicked");
        }
    }
}

/// Spawn a patrol loop that runs `cycle` on `spec.interval`, stopping (after
/// its in-flight cycle completes) once `token` is cancelled.
///
/// `open_molecule` is called fresh at the start of every cycle; `cycle`
/// receives whatever it returns. A patrol with no observability backend
/// passes `MoleculeHandle::null` — the loop runs identically either way,
/// since opening a molecule is never allowed to gate whether the cycle runs.
pub fn spawn_patrol<F, Fut, M>(spec: PatrolSpec, token: CancellationToken, open_molecule: M, mut cycle: F) -> Option<PatrolHandle>
where
    F: FnMut(MoleculeHandle) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send,
    M: Fn() -> MoleculeHandle + Send + 'static,
{
    if !spec.enabled {
        tracing::info!(patrol = %spec.slug, "patrol disabled, not scheduling");
        return None;
    }

    let slug = spec.slug.clone();
    let join = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(spec.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::info!(patrol = %spec.slug, "patrol stopping on shutdown signal");
                    break;
                }
                _ = ticker.tick() => {
                    let molecule = open_molecule();
                    cycle(molecule).await;
                }
            }
        }
    });

    Some(PatrolHandle { slug, join })
}

/// A single named step within a patrol cycle: a label plus the boxed future
/// that performs it. Boxing lets a cycle mix differently-shaped steps (store
/// query, session spawn, sleep) in one ordered list.
pub type PatrolStep<E> = (&'static str, std::pin::Pin<Box<dyn Future<Output = Result<(), E>> + Send>>);

/// Run `steps` in order against `molecule`, closing each named step and
/// continuing past a failing one rather than aborting the rest — a single
/// patrol cycle never lets one failing step take down the rest. Molecule
/// emission failures are logged, not propagated.
pub async fn run_named_steps<E: std::fmt::Display>(molecule: &MoleculeHandle, steps: Vec<PatrolStep<E>>) {
    for (name, fut) in steps {
        match fut.await {
            Ok(()) => molecule.step_closed(name),
            Err(e) => {
                tracing::warn!(step = name, error = %e, "patrol step failed");
                molecule.step_failed(name);
            }
        }
    }
    molecule.close();
}

#[cfg(test)]
#[path = "patrol_tests.rs"]
mod tests;
