// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! The per-store event watermark: held only in memory, rebuilt from
//! scratch on every daemon restart via a seed-only warm-up cycle.

use gastown_store::Watermark;
use parking_lot::Mutex;
use std::collections::HashMap;

/// A table of per-store watermarks, shared between the event-driven feed
/// patrol and nothing else — no other loop reads or writes a watermark.
#[derive(Default)]
pub struct WatermarkTable {
    inner: Mutex<HashMap<String, Watermark>>,
}

impl WatermarkTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current watermark for `store`, or [`Watermark::EPOCH`] if this is
    /// the first cycle to touch it (the warm-up case).
    pub fn get(&self, store: &str) -> Watermark {
        self.inner.lock().get(store).copied().unwrap_or(Watermark::EPOCH)
    }

    pub fn set(&self, store: &str, watermark: Watermark) {
        self.inner.lock().insert(store.to_string(), watermark);
    }

    /// True the very first time `store` is seen — callers use this to run a
    /// warm-up cycle that only advances the watermark.
    pub fn is_first_cycle(&self, store: &str) -> bool {
        !self.inner.lock().contains_key(store)
    }
}

#[cfg(test)]
#[path = "watermarks_tests.rs"]
mod tests;
