// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! gastown-adapters: the session boundary and the rig routing map.
//!
//! The dispatch primitive spawns, binds, and starts worker sessions
//! through [`SessionAdapter`] without knowing whether the backend is a real
//! subprocess, a container, or the in-memory fake used in every test.

pub mod error;
pub mod notify;
pub mod routing;
pub mod session;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use error::AdapterError;
pub use notify::{DesktopNotifyAdapter, NotifyAdapter, NotifyError};
pub use routing::{RoutingError, RoutingMap};
pub use session::{NoopSessionAdapter, SessionAdapter, SessionHandle, SpawnOptions};

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeSessionAdapter, SessionCall};
