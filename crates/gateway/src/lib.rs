//! Helm Gateway
//!
//! HTTP/JSON front for the control-plane RPC. Every operation is served at
//! `POST /v1/<lowercase method>` (parameterless reads also answer `GET`).
//! The gateway adds no logic of its own: it decodes the JSON body into the
//! wire request, forwards it over the binary transport and returns the
//! reply, or the service's error, as JSON.
//!
//! A client that disconnects mid-call drops the handler future, which
//! cancels the call on the RPC server.

mod error;
mod handlers;
mod router;

pub use error::{ApiError, ErrorResponse, http_status};
pub use handlers::TIMEOUT_HEADER;
pub use router::{AppState, create_router};

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use helm_rpc::{ReconnectingClient, Requester, TransportConfig, TransportError};
use log::info;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("RPC endpoint unreachable: {0}")]
    Connect(#[from] TransportError),

    #[error("HTTP server failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Binary RPC endpoint to forward to
    pub rpc_endpoint: SocketAddr,
    /// Deadline applied when a request carries no timeout header
    pub request_timeout: Duration,
    pub transport: TransportConfig,
}

impl GatewayConfig {
    pub fn new(rpc_endpoint: SocketAddr) -> Self {
        Self {
            rpc_endpoint,
            request_timeout: Duration::from_secs(30),
            transport: TransportConfig::default(),
        }
    }
}

pub struct Gateway {
    state: Arc<AppState>,
}

impl Gateway {
    /// Dial the RPC endpoint; fails if it is not serving yet
    pub async fn connect(config: GatewayConfig) -> Result<Self, GatewayError> {
        let client = ReconnectingClient::connect(config.rpc_endpoint, config.transport).await?;
        info!("Gateway connected to RPC at {}", config.rpc_endpoint);
        Ok(Self::with_requester(
            Arc::new(client),
            config.request_timeout,
        ))
    }

    pub fn with_requester(rpc: Arc<dyn Requester>, request_timeout: Duration) -> Self {
        Self {
            state: Arc::new(AppState::new(rpc, request_timeout)),
        }
    }

    pub fn router(&self) -> Router {
        create_router(Arc::clone(&self.state))
    }

    /// Serve HTTP until `shutdown` fires, then drain
    pub async fn serve(
        self,
        listener: TcpListener,
        shutdown: CancellationToken,
    ) -> Result<(), GatewayError> {
        info!("Gateway listening on {}", listener.local_addr()?);
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await?;
        info!("Gateway stopped");
        Ok(())
    }
}
