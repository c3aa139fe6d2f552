// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! Graceful-degradation observability handle for patrol cycles.
//!
//! A patrol opens a [`Molecule`] at the start of a cycle, records named steps
//! as it progresses, and closes the root when the cycle ends. Opening a
//! molecule is best-effort: if it fails, the patrol still runs. Every
//! operation on [`MoleculeHandle`] is a no-op when the underlying open
//! failed, so call sites never branch on whether observability is live —
//! the null check lives in the handle, not at every call site.

use crate::clock::Clock;
use parking_lot::Mutex;
use std::sync::Arc;

/// A single recorded step within a molecule's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoleculeStep {
    pub name: String,
    pub outcome: StepOutcome,
    pub at_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Closed,
    Failed,
}

/// A live or inert observability molecule.
///
/// Construct via [`Molecule::open`]; it is always `Some`-shaped to callers —
/// a failed open produces a [`NullMolecule`] rather than an `Option`, so the
/// no-branching rule holds all the way from construction through use.
pub trait Molecule: Send + Sync {
    /// Record that a named step completed.
    fn step_closed(&self, name: &str);
    /// Record that a named step failed.
    fn step_failed(&self, name: &str);
    /// Close the root, ending the molecule's lifetime.
    fn close(&self);
}

/// An observability handle wrapping a concrete [`Molecule`] implementation
/// (or none at all). This is the type patrols actually hold.
#[derive(Clone)]
pub struct MoleculeHandle {
    inner: Arc<dyn Molecule>,
}

impl MoleculeHandle {
    pub fn new(inner: Arc<dyn Molecule>) -> Self {
        Self { inner }
    }

    /// A handle backed by [`NullMolecule`]; every call is a no-op.
    pub fn null() -> Self {
        Self::new(Arc::new(NullMolecule))
    }

    pub fn step_closed(&self, name: &str) {
        self.inner.step_closed(name);
    }

    pub fn step_failed(&self, name: &str) {
        self.inner.step_failed(name);
    }

    pub fn close(&self) {
        self.inner.close();
    }
}

impl Default for MoleculeHandle {
    fn default() -> Self {
        Self::null()
    }
}

/// The no-op molecule: used when opening observability fails or is disabled.
pub struct NullMolecule;

impl Molecule for NullMolecule {
    fn step_closed(&self, _name: &str) {}
    fn step_failed(&self, _name: &str) {}
    fn close(&self) {}
}

/// In-memory recording molecule, for tests and for the in-process daemon
/// before a richer backend is wired in.
pub struct RecordingMolecule<C: Clock + 'static> {
    clock: C,
    steps: Mutex<Vec<MoleculeStep>>,
    closed: Mutex<bool>,
}

impl<C: Clock + 'static> RecordingMolecule<C> {
    /// Open a new recording molecule, returning both the shared record (for
    /// assertions) and the handle a patrol would actually hold.
    pub fn open(clock: C) -> (Arc<Self>, MoleculeHandle) {
        let recording = Arc::new(Self {
            clock,
            steps: Mutex::new(Vec::new()),
            closed: Mutex::new(false),
        });
        let handle = MoleculeHandle::new(recording.clone());
        (recording, handle)
    }

    pub fn steps(&self) -> Vec<MoleculeStep> {
        self.steps.lock().clone()
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.lock()
    }

    fn record(&self, name: &str, outcome: StepOutcome) {
        self.steps.lock().push(MoleculeStep {
            name: name.to_string(),
            outcome,
            at_ms: self.clock.epoch_ms(),
        });
    }
}

impl<C: Clock + 'static> Molecule for RecordingMolecule<C> {
    fn step_closed(&self, name: &str) {
        self.record(name, StepOutcome::Closed);
    }

    fn step_failed(&self, name: &str) {
        self.record(name, StepOutcome::Failed);
    }

    fn close(&self) {
        *self.closed.lock() = true;
    }
}

#[cfg(test)]
#[path = "molecule_tests.rs"]
mod tests;
