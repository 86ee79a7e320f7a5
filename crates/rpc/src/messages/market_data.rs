//! Market data messages (tickers, orderbooks, forex)

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency pair as sent on the wire
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyPair {
    pub delimiter: String,
    pub first_currency: String,
    pub second_currency: String,
}

impl CurrencyPair {
    pub fn new(
        first_currency: impl Into<String>,
        second_currency: impl Into<String>,
        delimiter: impl Into<String>,
    ) -> Self {
        Self {
            delimiter: delimiter.into(),
            first_currency: first_currency.into(),
            second_currency: second_currency.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetTickerRequest {
    pub exchange: String,
    pub pair: Option<CurrencyPair>,
    pub asset_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickerResponse {
    pub pair: Option<CurrencyPair>,
    /// Unix seconds
    pub last_updated: i64,
    pub last: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub bid: Decimal,
    pub ask: Decimal,
    pub volume: Decimal,
    pub price_ath: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTickersRequest {}

/// Tickers of one exchange
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tickers {
    pub exchange: String,
    pub tickers: Vec<TickerResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetTickersResponse {
    pub tickers: Vec<Tickers>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetOrderbookRequest {
    pub exchange: String,
    pub pair: Option<CurrencyPair>,
    pub asset_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderbookItem {
    pub amount: Decimal,
    pub price: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderbookResponse {
    pub pair: Option<CurrencyPair>,
    pub bids: Vec<OrderbookItem>,
    pub asks: Vec<OrderbookItem>,
    /// Unix seconds
    pub last_updated: i64,
    pub asset_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetOrderbooksRequest {}

/// Orderbooks of one exchange
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Orderbooks {
    pub exchange: String,
    pub orderbooks: Vec<OrderbookResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetOrderbooksResponse {
    pub orderbooks: Vec<Orderbooks>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetForexRatesRequest {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetForexRatesResponse {
    pub forex_rates: BTreeMap<String, Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_decimals_travel_as_strings() {
        let item = OrderbookItem {
            amount: dec!(1.5),
            price: dec!(100.25),
        };
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({"amount": "1.5", "price": "100.25"})
        );
    }

    #[test]
    fn test_missing_pair_decodes_as_none() {
        let req: GetTickerRequest =
            serde_json::from_value(json!({"exchange": "Bitstamp"})).unwrap();
        assert_eq!(req.pair, None);
        assert_eq!(req.asset_type, "");
    }
}
