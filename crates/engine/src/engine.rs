use async_trait::async_trait;
use helm_core::{
    AssetType, CurrencyPair, EventId, EventWatch, ExchangeTickers, Orderbook, PortfolioAddress,
    Ticker,
};
use helm_ports::{EngineError, EngineFacade, EngineResult, ForexRates};
use log::{debug, info};
use parking_lot::RwLock;
use tokio_util::sync::CancellationToken;

use crate::config::EngineConfig;
use crate::events::EventRegistry;
use crate::exchanges::ExchangeRegistry;
use crate::market_data::MarketDataStore;
use crate::portfolio::PortfolioStore;

/// In-memory trading engine
///
/// Every store synchronises itself, so the engine can be shared behind an
/// `Arc` and called from any number of concurrent RPC calls.
#[derive(Debug, Default)]
pub struct InMemoryEngine {
    exchanges: ExchangeRegistry,
    market_data: MarketDataStore,
    forex_rates: RwLock<Option<ForexRates>>,
    portfolio: PortfolioStore,
    events: EventRegistry,
}

impl InMemoryEngine {
    /// Create an empty engine (no exchanges, no data)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine seeded from configuration
    pub fn from_config(config: &EngineConfig) -> Self {
        let engine = Self::new();
        for exchange in &config.exchanges {
            engine.exchanges.register(&exchange.name, exchange.enabled);
        }
        if let Some(rates) = &config.forex_rates {
            engine.set_exchange_rates(rates.clone());
        }
        for address in &config.portfolio {
            engine.portfolio.add(address.clone());
        }
        info!(
            "Engine seeded: {} exchanges ({} enabled), {} portfolio addresses",
            config.exchanges.len(),
            engine.exchanges.names(true).len(),
            config.portfolio.len()
        );
        engine
    }

    /// Register an exchange
    pub fn register_exchange(&self, name: impl Into<String>, enabled: bool) {
        self.exchanges.register(name, enabled);
    }

    /// Push a ticker snapshot
    pub fn update_ticker(&self, exchange: &str, asset_type: AssetType, ticker: Ticker) {
        debug!("Ticker update {} {} {}", exchange, ticker.pair, asset_type);
        self.market_data.update_ticker(exchange, asset_type, ticker);
    }

    /// Push an orderbook snapshot
    pub fn update_orderbook(&self, exchange: &str, orderbook: Orderbook) {
        debug!(
            "Orderbook update {} {} {}",
            exchange, orderbook.pair, orderbook.asset_type
        );
        self.market_data.update_orderbook(exchange, orderbook);
    }

    /// Replace the forex table
    pub fn set_exchange_rates(&self, rates: ForexRates) {
        *self.forex_rates.write() = Some(rates);
    }

    /// Drop the forex table (rates become unavailable)
    pub fn clear_exchange_rates(&self) {
        *self.forex_rates.write() = None;
    }

    /// Registered events ordered by id
    pub fn events(&self) -> Vec<(EventId, EventWatch)> {
        self.events.list()
    }

    fn known_exchange(&self, name: &str) -> EngineResult<()> {
        if self.exchanges.contains(name) {
            Ok(())
        } else {
            Err(EngineError::UnknownExchange(name.to_string()))
        }
    }
}

fn ensure_live(cancel: &CancellationToken) -> EngineResult<()> {
    if cancel.is_cancelled() {
        Err(EngineError::Cancelled)
    } else {
        Ok(())
    }
}

#[async_trait]
impl EngineFacade for InMemoryEngine {
    async fn list_exchanges(
        &self,
        enabled_only: bool,
        cancel: &CancellationToken,
    ) -> EngineResult<Vec<String>> {
        ensure_live(cancel)?;
        Ok(self.exchanges.names(enabled_only))
    }

    async fn load_exchange(&self, name: &str, cancel: &CancellationToken) -> EngineResult<()> {
        ensure_live(cancel)?;
        self.exchanges.enable(name)
    }

    async fn unload_exchange(&self, name: &str, cancel: &CancellationToken) -> EngineResult<()> {
        ensure_live(cancel)?;
        self.exchanges.disable(name)
    }

    async fn get_ticker(
        &self,
        pair: &CurrencyPair,
        exchange: &str,
        asset_type: &AssetType,
        cancel: &CancellationToken,
    ) -> EngineResult<Ticker> {
        ensure_live(cancel)?;
        self.known_exchange(exchange)?;
        self.market_data
            .ticker(exchange, pair, asset_type)
            .ok_or_else(|| EngineError::NoTickerData {
                exchange: exchange.to_string(),
                pair: pair.to_string(),
                asset_type: asset_type.to_string(),
            })
    }

    async fn all_active_tickers(
        &self,
        cancel: &CancellationToken,
    ) -> EngineResult<Vec<ExchangeTickers>> {
        ensure_live(cancel)?;
        Ok(self
            .market_data
            .tickers_by_exchange()
            .into_iter()
            .filter(|(exchange, _)| self.exchanges.is_enabled(exchange) == Some(true))
            .map(|(exchange, tickers)| ExchangeTickers::new(exchange, tickers))
            .collect())
    }

    async fn get_orderbook(
        &self,
        pair: &CurrencyPair,
        exchange: &str,
        asset_type: &AssetType,
        cancel: &CancellationToken,
    ) -> EngineResult<Orderbook> {
        ensure_live(cancel)?;
        self.known_exchange(exchange)?;
        self.market_data
            .orderbook(exchange, pair, asset_type)
            .ok_or_else(|| EngineError::NoOrderbookData {
                exchange: exchange.to_string(),
                pair: pair.to_string(),
                asset_type: asset_type.to_string(),
            })
    }

    async fn exchange_rates(
        &self,
        cancel: &CancellationToken,
    ) -> EngineResult<Option<ForexRates>> {
        ensure_live(cancel)?;
        Ok(self.forex_rates.read().clone())
    }

    async fn list_addresses(
        &self,
        cancel: &CancellationToken,
    ) -> EngineResult<Vec<PortfolioAddress>> {
        ensure_live(cancel)?;
        Ok(self.portfolio.addresses())
    }

    async fn add_address(
        &self,
        address: PortfolioAddress,
        cancel: &CancellationToken,
    ) -> EngineResult<()> {
        ensure_live(cancel)?;
        self.portfolio.add(address);
        Ok(())
    }

    async fn remove_address(
        &self,
        address: &str,
        coin_type: &str,
        description: &str,
        cancel: &CancellationToken,
    ) -> EngineResult<()> {
        ensure_live(cancel)?;
        if !self.portfolio.remove(address, coin_type, description) {
            debug!("Portfolio address {} {} not tracked", address, coin_type);
        }
        Ok(())
    }

    async fn add_event(
        &self,
        watch: EventWatch,
        cancel: &CancellationToken,
    ) -> EngineResult<EventId> {
        ensure_live(cancel)?;
        self.known_exchange(&watch.exchange)?;
        let id = self.events.add(watch)?;
        info!("Event {} registered", id);
        Ok(id)
    }

    async fn remove_event(&self, id: EventId, cancel: &CancellationToken) -> EngineResult<()> {
        ensure_live(cancel)?;
        self.events.remove(id)?;
        info!("Event {} removed", id);
        Ok(())
    }
}
