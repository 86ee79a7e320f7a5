//! Process wiring: engine, RPC server and gateway

use std::net::SocketAddr;
use std::sync::Arc;

use helm_engine::InMemoryEngine;
use helm_gateway::{Gateway, GatewayError};
use helm_rpc::{RpcServer, RpcService, TransportError};
use log::info;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::{ConfigError, DaemonConfig};

#[derive(Error, Debug)]
pub enum DaemonError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to bind {addr}: {error}")]
    Bind {
        addr: SocketAddr,
        error: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Rpc(#[from] TransportError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Server task failed: {0}")]
    Task(String),
}

/// A running daemon
///
/// Both servers run as background tasks until [`Daemon::shutdown`].
pub struct Daemon {
    shutdown: CancellationToken,
    rpc_addr: SocketAddr,
    gateway_addr: Option<SocketAddr>,
    rpc_task: JoinHandle<Result<(), TransportError>>,
    gateway_task: Option<JoinHandle<Result<(), GatewayError>>>,
}

async fn bind(addr: SocketAddr) -> Result<TcpListener, DaemonError> {
    TcpListener::bind(addr)
        .await
        .map_err(|error| DaemonError::Bind { addr, error })
}

impl Daemon {
    /// Build the engine, start the RPC server, then the gateway if enabled
    pub async fn start(config: &DaemonConfig) -> Result<Self, DaemonError> {
        let engine = Arc::new(InMemoryEngine::from_config(&config.engine));
        let service = RpcService::new(engine);
        let shutdown = CancellationToken::new();

        let rpc_listener = bind(config.rpc.listen).await?;
        let rpc_addr = rpc_listener.local_addr()?;
        let server = RpcServer::new(service, config.transport());
        let rpc_task = tokio::spawn(server.serve(rpc_listener, shutdown.clone()));

        let (gateway_addr, gateway_task) = if config.gateway.enabled {
            // The RPC listener is bound, so the gateway can dial it right away
            let gateway = match Gateway::connect(config.gateway_config(rpc_addr)).await {
                Ok(gateway) => gateway,
                Err(e) => {
                    shutdown.cancel();
                    return Err(e.into());
                }
            };
            let listener = match bind(config.gateway.listen).await {
                Ok(listener) => listener,
                Err(e) => {
                    shutdown.cancel();
                    return Err(e);
                }
            };
            let addr = listener.local_addr()?;
            let task = tokio::spawn(gateway.serve(listener, shutdown.clone()));
            (Some(addr), Some(task))
        } else {
            info!("Gateway disabled");
            (None, None)
        };

        info!(
            "helmd started (rpc {}, gateway {})",
            rpc_addr,
            gateway_addr.map_or_else(|| "off".to_string(), |a| a.to_string())
        );

        Ok(Self {
            shutdown,
            rpc_addr,
            gateway_addr,
            rpc_task,
            gateway_task,
        })
    }

    pub fn rpc_addr(&self) -> SocketAddr {
        self.rpc_addr
    }

    pub fn gateway_addr(&self) -> Option<SocketAddr> {
        self.gateway_addr
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Stop both servers and wait for them to drain
    pub async fn shutdown(self) -> Result<(), DaemonError> {
        info!("helmd shutting down");
        self.shutdown.cancel();

        if let Some(task) = self.gateway_task {
            task.await.map_err(|e| DaemonError::Task(e.to_string()))??;
        }
        self.rpc_task
            .await
            .map_err(|e| DaemonError::Task(e.to_string()))??;

        info!("helmd stopped");
        Ok(())
    }
}
