// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! gastown-core: domain model and pure decision gates for the gastown
//! coordination engine.
//!
//! This crate has no knowledge of the store, the session layer, or any I/O.
//! Everything here is cheap to construct and cheap to test.

pub mod macros;

pub mod clock;
pub mod gates;
pub mod id;
pub mod issue;
pub mod label;
pub mod molecule;
pub mod rig;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use gates::{is_blocked, is_dispatchable_type};
pub use id::{short, ConvoyId, IssueId, SessionId};
pub use issue::{CloseReason, Dependency, DependencyKind, Issue, IssueStatus, IssueType};
pub use label::{dispatch_labels, parse_queue_args, queue_labels, LabelError, QueueLabels};
pub use molecule::{Molecule, MoleculeHandle, NullMolecule, RecordingMolecule};
pub use rig::RigName;
