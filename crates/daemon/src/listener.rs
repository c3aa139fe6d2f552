// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! The control-plane listener: serves `queue pause|resume|status` and
//! `ping` over a Unix domain socket, one connection per request, stripped
//! to the four operations this core actually owns.

use gastown_engine::QueueRuntimeState;
use gastown_wire::{read_request, write_response, ProtocolError, QueueRuntimeStateDto, Request, Response};
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::UnixListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Shared daemon context for every connection handler.
pub struct ListenCtx {
    pub queue_runtime: Arc<Mutex<QueueRuntimeState>>,
}

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

/// Accept loop: one spawned task per connection, stopping (after in-flight
/// connections finish) once `token` is cancelled.
pub async fn run(listener: UnixListener, ctx: Arc<ListenCtx>, token: CancellationToken) {
    loop {
        tokio::select! {
            _ = token.cancelled() => {
                info!("control-plane listener stopping on shutdown signal");
                break;
            }
            accepted = listener.accept() => {
                match accepted {
                    Ok((stream, _addr)) => {
                        let ctx = Arc::clone(&ctx);
                        tokio::spawn(async move {
                            let (mut reader, mut writer) = stream.into_split();
                            if let Err(e) = handle_connection(&mut reader, &mut writer, &ctx).await {
                                warn!(error = %e, "connection error");
                            }
                        });
                    }
                    Err(e) => error!(error = %e, "accept error"),
                }
            }
        }
    }
}

async fn handle_connection<R, W>(reader: &mut R, writer: &mut W, ctx: &ListenCtx) -> Result<(), ConnectionError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let request = read_request(reader).await?;
    debug!(request = ?request, "received request");
    let response = handle_request(request, ctx);
    write_response(writer, &response).await?;
    Ok(())
}

fn handle_request(request: Request, ctx: &ListenCtx) -> Response {
    match request {
        Request::Ping => Response::Pong,
        Request::QueuePause { by } => {
            ctx.queue_runtime.lock().pause(by);
            Response::Ok
        }
        Request::QueueResume => {
            ctx.queue_runtime.lock().resume();
            Response::Ok
        }
        Request::QueueStatus => {
            let state = ctx.queue_runtime.lock().clone();
            Response::QueueRuntimeState(QueueRuntimeStateDto {
                paused: state.paused,
                paused_by: state.paused_by,
                last_dispatch_at_ms: state.last_dispatch_at_ms,
                last_dispatch_count: state.last_dispatch_count,
            })
        }
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
