// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! Thin IPC client for the control-plane operations that touch the running
//! daemon's in-memory queue runtime-state record: `queue pause`, `queue
//! resume`, `queue status`, plus `ping` for liveness checks. Every other
//! command talks to the store directly and never constructs one of these.

use crate::exit_error::CliError;
use gastown_wire::{read_message, write_message, Request, Response};
use std::path::PathBuf;
use tokio::net::UnixStream;

pub struct DaemonClient {
    socket_path: PathBuf,
}

impl DaemonClient {
    pub fn new(socket_path: PathBuf) -> Self {
        Self { socket_path }
    }

    async fn send(&self, request: &Request) -> Result<Response, CliError> {
        let mut stream = UnixStream::connect(&self.socket_path).await.map_err(|e| {
            CliError::new(2, format!("could not reach daemon at {}: {e} (is `gastownd` running?)", self.socket_path.display()))
        })?;

        let payload = gastown_wire::encode(request)?;
        write_message(&mut stream, &payload).await?;
        let raw = read_message(&mut stream).await?;
        let response: Response = gastown_wire::decode(&raw)?;
        Ok(response)
    }

    pub async fn ping(&self) -> Result<(), CliError> {
        match self.send(&Request::Ping).await? {
            Response::Pong => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    pub async fn queue_pause(&self, by: impl Into<String>) -> Result<(), CliError> {
        match self.send(&Request::QueuePause { by: by.into() }).await? {
            Response::Ok => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    pub async fn queue_resume(&self) -> Result<(), CliError> {
        match self.send(&Request::QueueResume).await? {
            Response::Ok => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    pub async fn queue_status(&self) -> Result<gastown_wire::QueueRuntimeStateDto, CliError> {
        match self.send(&Request::QueueStatus).await? {
            Response::QueueRuntimeState(dto) => Ok(dto),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(response: Response) -> CliError {
    match response {
        Response::Error { message } => CliError::new(2, format!("daemon error: {message}")),
        other => CliError::new(2, format!("unexpected daemon response: {other:?}")),
    }
}
