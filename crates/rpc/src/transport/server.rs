//! RPC server: accepts connections and runs calls against [`RpcService`]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use log::{debug, info, warn};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::codec::{encode_frame, read_frame};
use super::config::TransportConfig;
use super::{ClientFrame, Outcome, RpcReply, RpcRequest};
use crate::error::TransportError;
use crate::service::{CallContext, RpcService};
use crate::status::{RpcStatus, StatusCode};

pub struct RpcServer {
    service: RpcService,
    config: TransportConfig,
}

impl RpcServer {
    pub fn new(service: RpcService, config: TransportConfig) -> Self {
        Self { service, config }
    }

    /// Accept connections until `shutdown` fires
    ///
    /// Cancelling `shutdown` also cancels every call in flight.
    pub async fn serve(
        self,
        listener: TcpListener,
        shutdown: CancellationToken,
    ) -> Result<(), TransportError> {
        info!("RPC server listening on {}", listener.local_addr()?);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("RPC server shutting down");
                    break;
                }
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        debug!("RPC connection from {}", peer);
                        let connection = Connection {
                            service: self.service.clone(),
                            max_frame_bytes: self.config.max_frame_bytes,
                            token: shutdown.child_token(),
                            in_flight: Arc::new(DashMap::new()),
                        };
                        tokio::spawn(connection.run(stream, peer));
                    }
                    Err(e) => warn!("RPC accept failed: {}", e),
                },
            }
        }
        Ok(())
    }
}

struct Connection {
    service: RpcService,
    max_frame_bytes: usize,
    /// Parent of every call token on this connection
    token: CancellationToken,
    in_flight: Arc<DashMap<u64, CancellationToken>>,
}

impl Connection {
    async fn run(self, stream: TcpStream, peer: SocketAddr) {
        let (mut reader, mut writer) = stream.into_split();
        let (replies, mut outbox) = mpsc::unbounded_channel::<RpcReply>();

        let max_frame_bytes = self.max_frame_bytes;
        tokio::spawn(async move {
            while let Some(reply) = outbox.recv().await {
                // A reply that cannot be framed fails only its own call
                let frame = match encode_frame(&reply, max_frame_bytes) {
                    Ok(frame) => frame,
                    Err(e) => {
                        warn!("RPC reply {} to {} not sent: {}", reply.id, peer, e);
                        let failed = RpcReply {
                            id: reply.id,
                            outcome: Outcome::Err(RpcStatus::new(
                                StatusCode::Internal,
                                e.to_string(),
                            )),
                        };
                        match encode_frame(&failed, max_frame_bytes) {
                            Ok(frame) => frame,
                            Err(e) => {
                                warn!("RPC error reply to {} not sent: {}", peer, e);
                                continue;
                            }
                        }
                    }
                };
                if let Err(e) = writer.write_all(&frame).await {
                    warn!("RPC write to {} failed: {}", peer, e);
                    break;
                }
            }
        });

        loop {
            let frame = tokio::select! {
                _ = self.token.cancelled() => break,
                frame = read_frame::<_, ClientFrame>(&mut reader, self.max_frame_bytes) => frame,
            };

            match frame {
                Ok(Some(ClientFrame::Call(call))) => self.spawn_call(call, replies.clone()),
                Ok(Some(ClientFrame::Cancel { id })) => {
                    if let Some((_, token)) = self.in_flight.remove(&id) {
                        debug!("RPC call {} from {} cancelled by client", id, peer);
                        token.cancel();
                    }
                }
                Ok(None) => {
                    debug!("RPC connection from {} closed", peer);
                    break;
                }
                Err(e) => {
                    warn!("RPC read from {} failed: {}", peer, e);
                    break;
                }
            }
        }

        // Abandon whatever the peer can no longer receive
        self.token.cancel();
    }

    fn spawn_call(&self, call: RpcRequest, replies: mpsc::UnboundedSender<RpcReply>) {
        let RpcRequest {
            id,
            timeout_ms,
            request,
        } = call;

        let token = self.token.child_token();
        self.in_flight.insert(id, token.clone());

        let mut ctx = CallContext::new(token);
        if let Some(ms) = timeout_ms {
            ctx = ctx.with_timeout(Duration::from_millis(ms));
        }

        let service = self.service.clone();
        let in_flight = Arc::clone(&self.in_flight);
        tokio::spawn(async move {
            let outcome = match service.handle(&ctx, request).await {
                Ok(response) => Outcome::Ok(response),
                Err(err) => Outcome::Err(RpcStatus::from(&err)),
            };
            in_flight.remove(&id);
            // The connection may already be gone
            let _ = replies.send(RpcReply { id, outcome });
        });
    }
}
