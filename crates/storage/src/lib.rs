// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! gastown-store: the `Store` boundary trait and its in-memory fake.
//!
//! Every coordination component (convoy manager, queue dispatcher, patrol
//! scheduler) talks to issues and events only through [`Store`]; no crate
//! above this one knows whether the backing system is a SQL-flavored issue
//! tracker, a file-backed log, or the [`MemoryStore`] fake.

pub mod error;
pub mod event;
pub mod filter;
pub mod patch;
pub mod store;
pub mod watermark;

#[cfg(any(test, feature = "test-support"))]
pub mod memory;

pub use error::StoreError;
pub use event::{StoreEvent, StoreEventKind};
pub use filter::{LabelFilter, ListFilter};
pub use patch::IssuePatch;
pub use store::Store;
pub use watermark::Watermark;

#[cfg(any(test, feature = "test-support"))]
pub use memory::MemoryStore;
