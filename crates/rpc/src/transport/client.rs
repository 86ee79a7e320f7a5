//! RPC clients
//!
//! [`RpcClient`] multiplexes concurrent calls over one TCP connection.
//! [`ReconnectingClient`] wraps it and dials again once the connection is
//! found closed; it is what long-lived callers such as the gateway hold.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use log::{debug, info, warn};
use tokio::net::TcpStream;
use tokio::sync::{Mutex, mpsc, oneshot};
use tokio_util::sync::CancellationToken;

use super::codec::{read_frame, write_frame};
use super::config::TransportConfig;
use super::{ClientFrame, Outcome, Requester, RpcReply, RpcRequest};
use crate::error::{ClientError, TransportError};
use crate::messages::*;
use crate::operations::{Method, Request, Response};

type Pending = DashMap<u64, oneshot::Sender<RpcReply>>;

/// Multiplexing client for one RPC connection
///
/// Cheap to clone; clones share the connection. The connection closes once
/// every clone is dropped. There are no retries: a call that fails on the
/// transport reports [`ClientError::Transport`].
#[derive(Clone)]
pub struct RpcClient {
    outbound: mpsc::UnboundedSender<ClientFrame>,
    pending: Arc<Pending>,
    next_id: Arc<AtomicU64>,
    closed: CancellationToken,
    peer: SocketAddr,
    default_timeout: Option<Duration>,
}

impl RpcClient {
    pub async fn connect(addr: SocketAddr) -> Result<Self, TransportError> {
        Self::connect_with(addr, TransportConfig::default()).await
    }

    pub async fn connect_with(
        addr: SocketAddr,
        config: TransportConfig,
    ) -> Result<Self, TransportError> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|e| TransportError::Connection(format!("{}: {}", addr, e)))?;
        stream.set_nodelay(true)?;
        debug!("RPC client connected to {}", addr);

        let (mut reader, mut writer) = stream.into_split();
        let (outbound, mut outbox) = mpsc::unbounded_channel::<ClientFrame>();
        let pending: Arc<Pending> = Arc::new(DashMap::new());
        let closed = CancellationToken::new();
        let max_frame_bytes = config.max_frame_bytes;

        let writer_closed = closed.clone();
        tokio::spawn(async move {
            while let Some(frame) = outbox.recv().await {
                if let Err(e) = write_frame(&mut writer, &frame, max_frame_bytes).await {
                    warn!("RPC write to {} failed: {}", addr, e);
                    writer_closed.cancel();
                    break;
                }
            }
        });

        let reader_pending = Arc::clone(&pending);
        let reader_closed = closed.clone();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = reader_closed.cancelled() => break,
                    frame = read_frame::<_, RpcReply>(&mut reader, max_frame_bytes) => match frame {
                        Ok(Some(reply)) => {
                            if let Some((_, waiter)) = reader_pending.remove(&reply.id) {
                                let _ = waiter.send(reply);
                            }
                        }
                        Ok(None) => {
                            debug!("RPC connection to {} closed", addr);
                            break;
                        }
                        Err(e) => {
                            warn!("RPC read from {} failed: {}", addr, e);
                            break;
                        }
                    },
                }
            }
            // Mark closed before failing waiters so no new call can slip in
            reader_closed.cancel();
            reader_pending.clear();
        });

        Ok(Self {
            outbound,
            pending,
            next_id: Arc::new(AtomicU64::new(1)),
            closed,
            peer: addr,
            default_timeout: None,
        })
    }

    /// Deadline applied by the typed methods
    pub fn with_default_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn is_closed(&self) -> bool {
        self.closed.is_cancelled()
    }

    /// Issue one call and wait for its reply
    ///
    /// Dropping the future before it resolves sends a cancel for the call.
    pub async fn call(
        &self,
        request: Request,
        timeout: Option<Duration>,
    ) -> Result<Response, ClientError> {
        if self.is_closed() {
            return Err(TransportError::ChannelClosed.into());
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (waiter, reply) = oneshot::channel();
        self.pending.insert(id, waiter);
        let mut guard = CallGuard {
            id,
            pending: &self.pending,
            outbound: &self.outbound,
            done: false,
        };

        if self.is_closed() {
            guard.done = true;
            self.pending.remove(&id);
            return Err(TransportError::ChannelClosed.into());
        }

        let timeout_ms = timeout.map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX));
        self.outbound
            .send(ClientFrame::Call(RpcRequest {
                id,
                timeout_ms,
                request,
            }))
            .map_err(|_| TransportError::ChannelClosed)?;

        let reply = reply.await;
        guard.done = true;

        match reply.map_err(|_| TransportError::ChannelClosed)?.outcome {
            Outcome::Ok(response) => Ok(response),
            Outcome::Err(status) => Err(ClientError::Status(status)),
        }
    }
}

impl std::fmt::Debug for RpcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcClient")
            .field("peer", &self.peer)
            .field("closed", &self.is_closed())
            .field("in_flight", &self.pending.len())
            .finish()
    }
}

/// Cancels the call on the server if the caller stops waiting
struct CallGuard<'a> {
    id: u64,
    pending: &'a Pending,
    outbound: &'a mpsc::UnboundedSender<ClientFrame>,
    done: bool,
}

impl Drop for CallGuard<'_> {
    fn drop(&mut self) {
        if self.done {
            return;
        }
        if self.pending.remove(&self.id).is_some() {
            let _ = self.outbound.send(ClientFrame::Cancel { id: self.id });
        }
    }
}

#[async_trait]
impl Requester for RpcClient {
    async fn request(
        &self,
        request: Request,
        timeout: Option<Duration>,
    ) -> Result<Response, ClientError> {
        self.call(request, timeout).await
    }
}

macro_rules! typed_calls {
    ($($name:ident: $method:ident($req:ty) -> $resp:ty;)*) => {
        impl RpcClient {
            $(
                pub async fn $name(&self, req: $req) -> Result<$resp, ClientError> {
                    match self.call(Request::$method(req), self.default_timeout).await? {
                        Response::$method(resp) => Ok(resp),
                        other => Err(ClientError::UnexpectedResponse {
                            expected: Method::$method.name(),
                            got: other.method().name(),
                        }),
                    }
                }
            )*
        }
    };
}

typed_calls! {
    get_exchanges: GetExchanges(GetExchangesRequest) -> GetExchangesResponse;
    enable_exchange: EnableExchange(GenericExchangeNameRequest) -> GenericExchangeNameResponse;
    disable_exchange: DisableExchange(GenericExchangeNameRequest) -> GenericExchangeNameResponse;
    get_ticker: GetTicker(GetTickerRequest) -> TickerResponse;
    get_tickers: GetTickers(GetTickersRequest) -> GetTickersResponse;
    get_orderbook: GetOrderbook(GetOrderbookRequest) -> OrderbookResponse;
    get_orderbooks: GetOrderbooks(GetOrderbooksRequest) -> GetOrderbooksResponse;
    get_config: GetConfig(GetConfigRequest) -> GetConfigResponse;
    get_portfolio: GetPortfolio(GetPortfolioRequest) -> GetPortfolioResponse;
    add_portfolio_address: AddPortfolioAddress(AddPortfolioAddressRequest) -> AddPortfolioAddressResponse;
    remove_portfolio_address: RemovePortfolioAddress(RemovePortfolioAddressRequest) -> RemovePortfolioAddressResponse;
    get_forex_rates: GetForexRates(GetForexRatesRequest) -> GetForexRatesResponse;
    get_orders: GetOrders(GetOrdersRequest) -> GetOrdersResponse;
    get_order: GetOrder(GetOrderRequest) -> OrderDetails;
    submit_order: SubmitOrder(SubmitOrderRequest) -> SubmitOrderResponse;
    cancel_order: CancelOrder(CancelOrderRequest) -> CancelOrderResponse;
    cancel_all_orders: CancelAllOrders(CancelAllOrdersRequest) -> CancelAllOrdersResponse;
    get_events: GetEvents(GetEventsRequest) -> GetEventsResponse;
    add_event: AddEvent(AddEventRequest) -> AddEventResponse;
    remove_event: RemoveEvent(RemoveEventRequest) -> RemoveEventResponse;
    get_cryptocurrency_deposit_addresses: GetCryptocurrencyDepositAddresses(GetCryptocurrencyDepositAddressesRequest) -> GetCryptocurrencyDepositAddressesResponse;
    get_cryptocurrency_deposit_address: GetCryptocurrencyDepositAddress(GetCryptocurrencyDepositAddressRequest) -> GetCryptocurrencyDepositAddressResponse;
    withdraw_cryptocurrency_funds: WithdrawCryptocurrencyFunds(WithdrawCurrencyRequest) -> WithdrawResponse;
    withdraw_fiat_funds: WithdrawFiatFunds(WithdrawCurrencyRequest) -> WithdrawResponse;
}

/// Client that redials when its connection has closed
pub struct ReconnectingClient {
    addr: SocketAddr,
    config: TransportConfig,
    current: Mutex<RpcClient>,
}

impl ReconnectingClient {
    /// Dial `addr` now; fails if nothing is serving there
    pub async fn connect(
        addr: SocketAddr,
        config: TransportConfig,
    ) -> Result<Self, TransportError> {
        let client = RpcClient::connect_with(addr, config.clone()).await?;
        Ok(Self {
            addr,
            config,
            current: Mutex::new(client),
        })
    }

    /// The live client, redialing first if the last one closed
    pub async fn client(&self) -> Result<RpcClient, TransportError> {
        let mut current = self.current.lock().await;
        if current.is_closed() {
            info!("RPC connection to {} lost, redialing", self.addr);
            *current = RpcClient::connect_with(self.addr, self.config.clone()).await?;
        }
        Ok(current.clone())
    }
}

#[async_trait]
impl Requester for ReconnectingClient {
    async fn request(
        &self,
        request: Request,
        timeout: Option<Duration>,
    ) -> Result<Response, ClientError> {
        let client = self.client().await?;
        client.call(request, timeout).await
    }
}
