use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CurrencyPair;
use crate::values::{ExchangeName, Timestamp};

/// Latest price snapshot for a pair on one exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub pair: CurrencyPair,
    pub last_updated: Timestamp,
    pub last: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub bid: Decimal,
    pub ask: Decimal,
    pub volume: Decimal,
    /// All-time high seen by the engine
    pub price_ath: Decimal,
}

/// Every active ticker of one exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeTickers {
    pub exchange: ExchangeName,
    pub tickers: Vec<Ticker>,
}

impl ExchangeTickers {
    pub fn new(exchange: impl Into<ExchangeName>, tickers: Vec<Ticker>) -> Self {
        Self {
            exchange: exchange.into(),
            tickers,
        }
    }
}
