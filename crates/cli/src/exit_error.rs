// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! Custom error type that carries a process exit code.
//!
//! Commands return `CliError` instead of calling `std::process::exit()`
//! directly, allowing `main()` to handle process termination.

use std::fmt;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(1, message)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<gastown_engine::EnrollError> for CliError {
    fn from(e: gastown_engine::EnrollError) -> Self {
        Self::validation(e.to_string())
    }
}

impl From<gastown_engine::DispatchError> for CliError {
    fn from(e: gastown_engine::DispatchError) -> Self {
        Self::validation(e.to_string())
    }
}

impl From<gastown_store::StoreError> for CliError {
    fn from(e: gastown_store::StoreError) -> Self {
        Self::validation(e.to_string())
    }
}

impl From<gastown_adapters::RoutingError> for CliError {
    fn from(e: gastown_adapters::RoutingError) -> Self {
        Self::new(1, e.to_string())
    }
}

impl From<gastown_wire::ProtocolError> for CliError {
    fn from(e: gastown_wire::ProtocolError) -> Self {
        Self::new(2, format!("daemon connection error: {e}"))
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(2, format!("daemon connection error: {e}"))
    }
}

impl From<gastown_daemon::DaemonError> for CliError {
    fn from(e: gastown_daemon::DaemonError) -> Self {
        Self::new(2, e.to_string())
    }
}

impl From<anyhow::Error> for CliError {
    fn from(e: anyhow::Error) -> Self {
        Self::new(1, e.to_string())
    }
}
