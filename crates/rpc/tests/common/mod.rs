//! Shared fixtures for helm-rpc integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use helm_core::{
    AssetType, CurrencyPair, EventId, EventWatch, ExchangeTickers, Orderbook, OrderbookItem,
    PortfolioAddress, Ticker,
};
use helm_engine::InMemoryEngine;
use helm_ports::{EngineError, EngineFacade, EngineResult, ForexRates};
use rust_decimal_macros::dec;
use tokio_util::sync::CancellationToken;

pub const TICKER_SECS: i64 = 1_700_000_000;

/// Engine with A enabled, B disabled and one BTC-USD ticker/orderbook on A
pub fn seeded_engine() -> Arc<InMemoryEngine> {
    let engine = InMemoryEngine::new();
    engine.register_exchange("A", true);
    engine.register_exchange("B", false);

    let pair = CurrencyPair::with_delimiter("BTC", "USD", "-");
    // Sub-second part must not survive the wire
    let last_updated = Utc.timestamp_opt(TICKER_SECS, 750_000_000).unwrap();
    engine.update_ticker(
        "A",
        AssetType::spot(),
        Ticker {
            pair: pair.clone(),
            last_updated,
            last: dec!(30000),
            high: dec!(31000),
            low: dec!(29000),
            bid: dec!(29999.5),
            ask: dec!(30000.5),
            volume: dec!(12.5),
            price_ath: dec!(69000),
        },
    );
    engine.update_orderbook(
        "A",
        Orderbook {
            pair,
            asset_type: AssetType::spot(),
            bids: vec![
                OrderbookItem::new(dec!(1), dec!(29999)),
                OrderbookItem::new(dec!(2), dec!(29998)),
            ],
            asks: vec![OrderbookItem::new(dec!(0.5), dec!(30001))],
            last_updated,
        },
    );
    Arc::new(engine)
}

pub fn btc_usd() -> helm_rpc::messages::CurrencyPair {
    helm_rpc::messages::CurrencyPair::new("BTC", "USD", "-")
}

/// Facade that records how often it is entered
///
/// When `blocking`, every call parks until its token is cancelled.
#[derive(Default)]
pub struct StubEngine {
    pub calls: AtomicUsize,
    /// Calls that have left the engine, by returning or by being dropped
    pub finished: Arc<AtomicUsize>,
    pub blocking: bool,
}

impl StubEngine {
    pub fn blocking() -> Self {
        Self {
            blocking: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn finished(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }

    async fn enter(&self, cancel: &CancellationToken) -> EngineError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _exit = ExitCounter(Arc::clone(&self.finished));
        if self.blocking {
            cancel.cancelled().await;
            return EngineError::Cancelled;
        }
        EngineError::Unavailable("stub".to_string())
    }
}

struct ExitCounter(Arc<AtomicUsize>);

impl Drop for ExitCounter {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Poll `cond` until it holds or two seconds pass
pub async fn wait_until(mut cond: impl FnMut() -> bool) -> bool {
    for _ in 0..200 {
        if cond() {
            return true;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    cond()
}

#[async_trait]
impl EngineFacade for StubEngine {
    async fn list_exchanges(
        &self,
        _enabled_only: bool,
        cancel: &CancellationToken,
    ) -> EngineResult<Vec<String>> {
        Err(self.enter(cancel).await)
    }

    async fn load_exchange(&self, _name: &str, cancel: &CancellationToken) -> EngineResult<()> {
        Err(self.enter(cancel).await)
    }

    async fn unload_exchange(&self, _name: &str, cancel: &CancellationToken) -> EngineResult<()> {
        Err(self.enter(cancel).await)
    }

    async fn get_ticker(
        &self,
        _pair: &CurrencyPair,
        _exchange: &str,
        _asset_type: &AssetType,
        cancel: &CancellationToken,
    ) -> EngineResult<Ticker> {
        Err(self.enter(cancel).await)
    }

    async fn all_active_tickers(
        &self,
        cancel: &CancellationToken,
    ) -> EngineResult<Vec<ExchangeTickers>> {
        Err(self.enter(cancel).await)
    }

    async fn get_orderbook(
        &self,
        _pair: &CurrencyPair,
        _exchange: &str,
        _asset_type: &AssetType,
        cancel: &CancellationToken,
    ) -> EngineResult<Orderbook> {
        Err(self.enter(cancel).await)
    }

    async fn exchange_rates(
        &self,
        cancel: &CancellationToken,
    ) -> EngineResult<Option<ForexRates>> {
        Err(self.enter(cancel).await)
    }

    async fn list_addresses(
        &self,
        cancel: &CancellationToken,
    ) -> EngineResult<Vec<PortfolioAddress>> {
        Err(self.enter(cancel).await)
    }

    async fn add_address(
        &self,
        _address: PortfolioAddress,
        cancel: &CancellationToken,
    ) -> EngineResult<()> {
        Err(self.enter(cancel).await)
    }

    async fn remove_address(
        &self,
        _address: &str,
        _coin_type: &str,
        _description: &str,
        cancel: &CancellationToken,
    ) -> EngineResult<()> {
        Err(self.enter(cancel).await)
    }

    async fn add_event(
        &self,
        _watch: EventWatch,
        cancel: &CancellationToken,
    ) -> EngineResult<EventId> {
        Err(self.enter(cancel).await)
    }

    async fn remove_event(&self, _id: EventId, cancel: &CancellationToken) -> EngineResult<()> {
        Err(self.enter(cancel).await)
    }
}
