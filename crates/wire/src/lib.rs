// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! IPC protocol between the CLI and the daemon.
//!
//! Wire format: 4-byte big-endian length prefix + JSON payload, over a Unix
//! domain socket under the town's state directory.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod request;
mod response;
mod wire;

pub use request::Request;
pub use response::{QueueRuntimeStateDto, Response};
pub use wire::{decode, encode, read_message, write_message, ProtocolError};
