//! Helm RPC
//!
//! Control plane of the helm trading daemon. Provides:
//! - Wire message types for every operation ([`messages`])
//! - The operation table tying methods to request/response types ([`operations`])
//! - Translation between wire messages and domain values ([`convert`])
//! - The service that runs operations against an [`helm_ports::EngineFacade`]
//! - A binary transport (length-prefixed bincode over TCP) with server and client
//!
//! ## Architecture
//!
//! ```text
//!   helmctl ──┐                       ┌──────────────┐
//!             │  bincode over TCP     │  RpcServer   │
//!   gateway ──┼──────────────────────▶│      │       │
//!             │                       │  RpcService  │
//!             │                       │      │       │
//!             │                       │ EngineFacade │
//!             │                       └──────────────┘
//! ```
//!
//! Every call carries a [`CallContext`]; cancelling it (client cancel,
//! dropped connection, expired deadline) drops the facade call in flight.

pub mod convert;
pub mod error;
pub mod messages;
pub mod operations;
pub mod service;
pub mod status;
pub mod transport;

// Re-export commonly used types
pub use error::{ClientError, RpcError, RpcResult, TransportError, TranslationError};
pub use operations::{Method, Request, Response};
pub use service::{CallContext, RpcService};
pub use status::{RpcStatus, StatusCode};
pub use transport::{
    ClientFrame, Outcome, ReconnectingClient, Requester, RpcClient, RpcReply, RpcRequest,
    RpcServer, TransportConfig,
};
