use std::collections::BTreeMap;

use async_trait::async_trait;
use helm_core::{
    AssetType, CurrencyPair, EventId, EventWatch, ExchangeTickers, Orderbook, PortfolioAddress,
    Ticker,
};
use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;

use crate::error::EngineResult;

/// Currency code -> rate
pub type ForexRates = BTreeMap<String, Decimal>;

/// Port for the trading engine
///
/// The engine owns all mutable state (exchange availability, market data,
/// portfolio, event registry) and synchronises it internally. Every call
/// may block on network or disk I/O and receives the caller's cancellation
/// token; implementations should stop and return [`EngineError::Cancelled`]
/// once it fires.
///
/// [`EngineError::Cancelled`]: crate::EngineError::Cancelled
#[async_trait]
pub trait EngineFacade: Send + Sync {
    // Exchanges

    /// Names of configured exchanges, optionally only the enabled ones
    async fn list_exchanges(
        &self,
        enabled_only: bool,
        cancel: &CancellationToken,
    ) -> EngineResult<Vec<String>>;

    /// Enable an exchange
    async fn load_exchange(&self, name: &str, cancel: &CancellationToken) -> EngineResult<()>;

    /// Disable an exchange
    async fn unload_exchange(&self, name: &str, cancel: &CancellationToken) -> EngineResult<()>;

    // Market data

    async fn get_ticker(
        &self,
        pair: &CurrencyPair,
        exchange: &str,
        asset_type: &AssetType,
        cancel: &CancellationToken,
    ) -> EngineResult<Ticker>;

    /// Tickers of every enabled exchange, grouped per exchange
    async fn all_active_tickers(
        &self,
        cancel: &CancellationToken,
    ) -> EngineResult<Vec<ExchangeTickers>>;

    async fn get_orderbook(
        &self,
        pair: &CurrencyPair,
        exchange: &str,
        asset_type: &AssetType,
        cancel: &CancellationToken,
    ) -> EngineResult<Orderbook>;

    /// Current forex table, `None` while no rates are available
    async fn exchange_rates(&self, cancel: &CancellationToken)
    -> EngineResult<Option<ForexRates>>;

    // Portfolio

    async fn list_addresses(&self, cancel: &CancellationToken)
    -> EngineResult<Vec<PortfolioAddress>>;

    async fn add_address(
        &self,
        address: PortfolioAddress,
        cancel: &CancellationToken,
    ) -> EngineResult<()>;

    async fn remove_address(
        &self,
        address: &str,
        coin_type: &str,
        description: &str,
        cancel: &CancellationToken,
    ) -> EngineResult<()>;

    // Conditional events

    /// Register a watch, returning its engine-assigned id
    async fn add_event(&self, watch: EventWatch, cancel: &CancellationToken)
    -> EngineResult<EventId>;

    async fn remove_event(&self, id: EventId, cancel: &CancellationToken) -> EngineResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Ensure the facade can be injected as a trait object
    fn _assert_engine_object_safe(_: &dyn EngineFacade) {}
}
