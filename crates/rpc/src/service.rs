//! RPC service
//!
//! One async method per operation. Implemented operations translate the
//! wire request, call the engine facade with the call's cancellation token
//! and translate the result back; engine errors pass through unchanged.
//! Operations the daemon does not serve answer with the
//! [`RpcError::NotYetImplemented`] sentinel without looking at their input.

use std::sync::Arc;
use std::time::Duration;

use helm_core::{AssetType, EventId, EventWatch, PortfolioAddress as DomainAddress};
use helm_ports::EngineFacade;
use log::debug;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::convert::required_pair;
use crate::error::{RpcError, RpcResult};
use crate::messages::*;
use crate::operations::{Request, Response};
use crate::status::RpcStatus;

/// Per-call cancellation and deadline
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl CallContext {
    pub fn new(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Fail fast if the call is already cancelled or past its deadline
    pub fn check(&self) -> RpcResult<()> {
        if self.token.is_cancelled() {
            return Err(RpcError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(RpcError::DeadlineExceeded),
            _ => Ok(()),
        }
    }
}

/// Control-plane service over an injected engine facade
#[derive(Clone)]
pub struct RpcService {
    engine: Arc<dyn EngineFacade>,
}

impl RpcService {
    pub fn new(engine: Arc<dyn EngineFacade>) -> Self {
        Self { engine }
    }

    /// Route a request to its operation
    ///
    /// The handler races the context: cancellation yields
    /// [`RpcError::Cancelled`], an expired deadline
    /// [`RpcError::DeadlineExceeded`], and in both cases the handler future
    /// (and the facade call inside it) is dropped.
    pub async fn handle(&self, ctx: &CallContext, request: Request) -> RpcResult<Response> {
        let method = request.method();
        let call = self.dispatch(ctx, request);

        let result = tokio::select! {
            biased;
            _ = ctx.token.cancelled() => Err(RpcError::Cancelled),
            result = async {
                match ctx.deadline {
                    Some(deadline) => tokio::time::timeout_at(deadline, call)
                        .await
                        .unwrap_or(Err(RpcError::DeadlineExceeded)),
                    None => call.await,
                }
            } => result,
        };

        match &result {
            Ok(_) => debug!("{} ok", method),
            Err(err) => debug!("{} failed: {}", method, RpcStatus::from(err)),
        }
        result
    }

    async fn dispatch(&self, ctx: &CallContext, request: Request) -> RpcResult<Response> {
        match request {
            Request::GetExchanges(r) => {
                self.get_exchanges(ctx, r).await.map(Response::GetExchanges)
            }
            Request::EnableExchange(r) => {
                self.enable_exchange(ctx, r).await.map(Response::EnableExchange)
            }
            Request::DisableExchange(r) => {
                self.disable_exchange(ctx, r).await.map(Response::DisableExchange)
            }
            Request::GetTicker(r) => self.get_ticker(ctx, r).await.map(Response::GetTicker),
            Request::GetTickers(r) => self.get_tickers(ctx, r).await.map(Response::GetTickers),
            Request::GetOrderbook(r) => {
                self.get_orderbook(ctx, r).await.map(Response::GetOrderbook)
            }
            Request::GetOrderbooks(r) => {
                self.get_orderbooks(ctx, r).await.map(Response::GetOrderbooks)
            }
            Request::GetConfig(r) => self.get_config(ctx, r).await.map(Response::GetConfig),
            Request::GetPortfolio(r) => {
                self.get_portfolio(ctx, r).await.map(Response::GetPortfolio)
            }
            Request::AddPortfolioAddress(r) => self
                .add_portfolio_address(ctx, r)
                .await
                .map(Response::AddPortfolioAddress),
            Request::RemovePortfolioAddress(r) => self
                .remove_portfolio_address(ctx, r)
                .await
                .map(Response::RemovePortfolioAddress),
            Request::GetForexRates(r) => {
                self.get_forex_rates(ctx, r).await.map(Response::GetForexRates)
            }
            Request::GetOrders(r) => self.get_orders(ctx, r).await.map(Response::GetOrders),
            Request::GetOrder(r) => self.get_order(ctx, r).await.map(Response::GetOrder),
            Request::SubmitOrder(r) => self.submit_order(ctx, r).await.map(Response::SubmitOrder),
            Request::CancelOrder(r) => self.cancel_order(ctx, r).await.map(Response::CancelOrder),
            Request::CancelAllOrders(r) => {
                self.cancel_all_orders(ctx, r).await.map(Response::CancelAllOrders)
            }
            Request::GetEvents(r) => self.get_events(ctx, r).await.map(Response::GetEvents),
            Request::AddEvent(r) => self.add_event(ctx, r).await.map(Response::AddEvent),
            Request::RemoveEvent(r) => self.remove_event(ctx, r).await.map(Response::RemoveEvent),
            Request::GetCryptocurrencyDepositAddresses(r) => self
                .get_cryptocurrency_deposit_addresses(ctx, r)
                .await
                .map(Response::GetCryptocurrencyDepositAddresses),
            Request::GetCryptocurrencyDepositAddress(r) => self
                .get_cryptocurrency_deposit_address(ctx, r)
                .await
                .map(Response::GetCryptocurrencyDepositAddress),
            Request::WithdrawCryptocurrencyFunds(r) => self
                .withdraw_cryptocurrency_funds(ctx, r)
                .await
                .map(Response::WithdrawCryptocurrencyFunds),
            Request::WithdrawFiatFunds(r) => self
                .withdraw_fiat_funds(ctx, r)
                .await
                .map(Response::WithdrawFiatFunds),
        }
    }

    // ------------------------------------------------------------------
    // Exchanges
    // ------------------------------------------------------------------

    /// Comma-joined exchange names, enabled ones only when asked
    pub async fn get_exchanges(
        &self,
        ctx: &CallContext,
        req: GetExchangesRequest,
    ) -> RpcResult<GetExchangesResponse> {
        ctx.check()?;
        let names = self.engine.list_exchanges(req.enabled, ctx.token()).await?;
        ctx.check()?;
        Ok(GetExchangesResponse {
            exchanges: names.join(","),
        })
    }

    pub async fn enable_exchange(
        &self,
        ctx: &CallContext,
        req: GenericExchangeNameRequest,
    ) -> RpcResult<GenericExchangeNameResponse> {
        ctx.check()?;
        self.engine.load_exchange(&req.exchange, ctx.token()).await?;
        Ok(GenericExchangeNameResponse {})
    }

    pub async fn disable_exchange(
        &self,
        ctx: &CallContext,
        req: GenericExchangeNameRequest,
    ) -> RpcResult<GenericExchangeNameResponse> {
        ctx.check()?;
        self.engine.unload_exchange(&req.exchange, ctx.token()).await?;
        Ok(GenericExchangeNameResponse {})
    }

    // ------------------------------------------------------------------
    // Market data
    // ------------------------------------------------------------------

    pub async fn get_ticker(
        &self,
        ctx: &CallContext,
        req: GetTickerRequest,
    ) -> RpcResult<TickerResponse> {
        let pair = required_pair(req.pair.as_ref(), "pair")?;
        let asset_type = AssetType::new(req.asset_type);
        ctx.check()?;
        let ticker = self
            .engine
            .get_ticker(&pair, &req.exchange, &asset_type, ctx.token())
            .await?;
        ctx.check()?;
        Ok(TickerResponse::from(&ticker))
    }

    pub async fn get_tickers(
        &self,
        ctx: &CallContext,
        _req: GetTickersRequest,
    ) -> RpcResult<GetTickersResponse> {
        ctx.check()?;
        let groups = self.engine.all_active_tickers(ctx.token()).await?;
        ctx.check()?;
        Ok(GetTickersResponse {
            tickers: groups.iter().map(Tickers::from).collect(),
        })
    }

    pub async fn get_orderbook(
        &self,
        ctx: &CallContext,
        req: GetOrderbookRequest,
    ) -> RpcResult<OrderbookResponse> {
        let pair = required_pair(req.pair.as_ref(), "pair")?;
        let asset_type = AssetType::new(req.asset_type);
        ctx.check()?;
        let book = self
            .engine
            .get_orderbook(&pair, &req.exchange, &asset_type, ctx.token())
            .await?;
        ctx.check()?;
        Ok(OrderbookResponse::from(&book))
    }

    pub async fn get_orderbooks(
        &self,
        _ctx: &CallContext,
        _req: GetOrderbooksRequest,
    ) -> RpcResult<GetOrderbooksResponse> {
        Err(RpcError::NotYetImplemented)
    }

    /// Fails with [`RpcError::ForexRatesEmpty`] while no rates are loaded
    pub async fn get_forex_rates(
        &self,
        ctx: &CallContext,
        _req: GetForexRatesRequest,
    ) -> RpcResult<GetForexRatesResponse> {
        ctx.check()?;
        let rates = self.engine.exchange_rates(ctx.token()).await?;
        ctx.check()?;
        match rates {
            Some(forex_rates) if !forex_rates.is_empty() => {
                Ok(GetForexRatesResponse { forex_rates })
            }
            _ => Err(RpcError::ForexRatesEmpty),
        }
    }

    pub async fn get_config(
        &self,
        _ctx: &CallContext,
        _req: GetConfigRequest,
    ) -> RpcResult<GetConfigResponse> {
        Err(RpcError::NotYetImplemented)
    }

    // ------------------------------------------------------------------
    // Portfolio
    // ------------------------------------------------------------------

    pub async fn get_portfolio(
        &self,
        ctx: &CallContext,
        _req: GetPortfolioRequest,
    ) -> RpcResult<GetPortfolioResponse> {
        ctx.check()?;
        let addresses = self.engine.list_addresses(ctx.token()).await?;
        ctx.check()?;
        Ok(GetPortfolioResponse {
            portfolio: addresses.iter().map(PortfolioAddress::from).collect(),
        })
    }

    pub async fn add_portfolio_address(
        &self,
        ctx: &CallContext,
        req: AddPortfolioAddressRequest,
    ) -> RpcResult<AddPortfolioAddressResponse> {
        let address = DomainAddress::from(req);
        ctx.check()?;
        self.engine.add_address(address, ctx.token()).await?;
        Ok(AddPortfolioAddressResponse {})
    }

    pub async fn remove_portfolio_address(
        &self,
        ctx: &CallContext,
        req: RemovePortfolioAddressRequest,
    ) -> RpcResult<RemovePortfolioAddressResponse> {
        ctx.check()?;
        self.engine
            .remove_address(&req.address, &req.coin_type, &req.description, ctx.token())
            .await?;
        Ok(RemovePortfolioAddressResponse {})
    }

    // ------------------------------------------------------------------
    // Orders
    // ------------------------------------------------------------------

    pub async fn get_orders(
        &self,
        _ctx: &CallContext,
        _req: GetOrdersRequest,
    ) -> RpcResult<GetOrdersResponse> {
        Err(RpcError::NotYetImplemented)
    }

    pub async fn get_order(
        &self,
        _ctx: &CallContext,
        _req: GetOrderRequest,
    ) -> RpcResult<OrderDetails> {
        Err(RpcError::NotYetImplemented)
    }

    pub async fn submit_order(
        &self,
        _ctx: &CallContext,
        _req: SubmitOrderRequest,
    ) -> RpcResult<SubmitOrderResponse> {
        Err(RpcError::NotYetImplemented)
    }

    pub async fn cancel_order(
        &self,
        _ctx: &CallContext,
        _req: CancelOrderRequest,
    ) -> RpcResult<CancelOrderResponse> {
        Err(RpcError::NotYetImplemented)
    }

    pub async fn cancel_all_orders(
        &self,
        _ctx: &CallContext,
        _req: CancelAllOrdersRequest,
    ) -> RpcResult<CancelAllOrdersResponse> {
        Err(RpcError::NotYetImplemented)
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    pub async fn get_events(
        &self,
        _ctx: &CallContext,
        _req: GetEventsRequest,
    ) -> RpcResult<GetEventsResponse> {
        Err(RpcError::NotYetImplemented)
    }

    pub async fn add_event(
        &self,
        ctx: &CallContext,
        req: AddEventRequest,
    ) -> RpcResult<AddEventResponse> {
        let watch = EventWatch::try_from(req)?;
        ctx.check()?;
        let id = self.engine.add_event(watch, ctx.token()).await?;
        Ok(AddEventResponse { id: id.value() })
    }

    pub async fn remove_event(
        &self,
        ctx: &CallContext,
        req: RemoveEventRequest,
    ) -> RpcResult<RemoveEventResponse> {
        ctx.check()?;
        self.engine
            .remove_event(EventId::from(req.id), ctx.token())
            .await?;
        Ok(RemoveEventResponse {})
    }

    // ------------------------------------------------------------------
    // Funding
    // ------------------------------------------------------------------

    pub async fn get_cryptocurrency_deposit_addresses(
        &self,
        _ctx: &CallContext,
        _req: GetCryptocurrencyDepositAddressesRequest,
    ) -> RpcResult<GetCryptocurrencyDepositAddressesResponse> {
        Err(RpcError::NotYetImplemented)
    }

    pub async fn get_cryptocurrency_deposit_address(
        &self,
        _ctx: &CallContext,
        _req: GetCryptocurrencyDepositAddressRequest,
    ) -> RpcResult<GetCryptocurrencyDepositAddressResponse> {
        Err(RpcError::NotYetImplemented)
    }

    pub async fn withdraw_cryptocurrency_funds(
        &self,
        _ctx: &CallContext,
        _req: WithdrawCurrencyRequest,
    ) -> RpcResult<WithdrawResponse> {
        Err(RpcError::NotYetImplemented)
    }

    pub async fn withdraw_fiat_funds(
        &self,
        _ctx: &CallContext,
        _req: WithdrawCurrencyRequest,
    ) -> RpcResult<WithdrawResponse> {
        Err(RpcError::NotYetImplemented)
    }
}

impl std::fmt::Debug for RpcService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcService").finish_non_exhaustive()
    }
}
