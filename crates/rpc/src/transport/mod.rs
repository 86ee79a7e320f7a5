//! Binary transport
//!
//! Calls travel over TCP as length-prefixed bincode frames (see [`codec`]).
//! A connection carries many concurrent calls, each tagged with a
//! client-chosen id:
//!
//! ```text
//!  client                                   server
//!    │ ── Call { id: 1, timeout_ms, req } ──▶ │  spawn call 1
//!    │ ── Call { id: 2, .. } ───────────────▶ │  spawn call 2
//!    │ ◀── Reply { id: 2, Ok(resp) } ──────── │
//!    │ ── Cancel { id: 1 } ─────────────────▶ │  cancel call 1
//!    │ ◀── Reply { id: 1, Err(CANCELLED) } ── │
//! ```
//!
//! Closing the connection cancels every call still running on it.

pub mod client;
pub mod codec;
pub mod config;
pub mod server;

pub use client::{ReconnectingClient, RpcClient};
pub use config::{DEFAULT_MAX_FRAME_BYTES, TransportConfig};
pub use server::RpcServer;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::operations::{Request, Response};
use crate::status::RpcStatus;

/// A call as sent by the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub id: u64,
    /// Deadline relative to receipt, enforced by the server
    pub timeout_ms: Option<u64>,
    pub request: Request,
}

/// Client -> server frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClientFrame {
    Call(RpcRequest),
    Cancel { id: u64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    Ok(Response),
    Err(RpcStatus),
}

/// Server -> client frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcReply {
    pub id: u64,
    pub outcome: Outcome,
}

/// Request/reply over some RPC connection
///
/// Dropping the returned future before it resolves cancels the call on the
/// server.
#[async_trait]
pub trait Requester: Send + Sync {
    async fn request(
        &self,
        request: Request,
        timeout: Option<Duration>,
    ) -> Result<Response, ClientError>;
}
