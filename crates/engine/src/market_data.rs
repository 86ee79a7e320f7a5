use std::collections::BTreeMap;

use dashmap::DashMap;
use helm_core::{AssetType, CurrencyPair, Orderbook, Ticker};

/// (exchange, pair, asset type)
type MarketKey = (String, CurrencyPair, AssetType);

/// Latest ticker and orderbook snapshot per market
#[derive(Debug, Default)]
pub struct MarketDataStore {
    tickers: DashMap<MarketKey, Ticker>,
    orderbooks: DashMap<MarketKey, Orderbook>,
}

impl MarketDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the ticker for `(exchange, ticker.pair, asset_type)`
    pub fn update_ticker(&self, exchange: &str, asset_type: AssetType, ticker: Ticker) {
        let key = (exchange.to_string(), ticker.pair.clone(), asset_type);
        self.tickers.insert(key, ticker);
    }

    pub fn ticker(
        &self,
        exchange: &str,
        pair: &CurrencyPair,
        asset_type: &AssetType,
    ) -> Option<Ticker> {
        let key = (exchange.to_string(), pair.clone(), asset_type.clone());
        self.tickers.get(&key).map(|t| t.value().clone())
    }

    /// Tickers grouped by exchange; each group sorted by pair
    pub fn tickers_by_exchange(&self) -> BTreeMap<String, Vec<Ticker>> {
        let mut grouped: BTreeMap<String, Vec<Ticker>> = BTreeMap::new();
        for entry in self.tickers.iter() {
            let (exchange, _, _) = entry.key();
            grouped
                .entry(exchange.clone())
                .or_default()
                .push(entry.value().clone());
        }
        for tickers in grouped.values_mut() {
            tickers.sort_by(|a, b| a.pair.cmp(&b.pair));
        }
        grouped
    }

    /// Replace the orderbook for `(exchange, book.pair, book.asset_type)`
    pub fn update_orderbook(&self, exchange: &str, orderbook: Orderbook) {
        let key = (
            exchange.to_string(),
            orderbook.pair.clone(),
            orderbook.asset_type.clone(),
        );
        self.orderbooks.insert(key, orderbook);
    }

    pub fn orderbook(
        &self,
        exchange: &str,
        pair: &CurrencyPair,
        asset_type: &AssetType,
    ) -> Option<Orderbook> {
        let key = (exchange.to_string(), pair.clone(), asset_type.clone());
        self.orderbooks.get(&key).map(|ob| ob.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn ticker(first: &str, last: Decimal) -> Ticker {
        Ticker {
            pair: CurrencyPair::with_delimiter(first, "USD", "-"),
            last_updated: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            last,
            high: last,
            low: last,
            bid: last,
            ask: last,
            volume: dec!(1),
            price_ath: last,
        }
    }

    #[test]
    fn test_ticker_keyed_by_asset_type() {
        let store = MarketDataStore::new();
        store.update_ticker("Bitstamp", AssetType::spot(), ticker("BTC", dec!(100)));

        let pair = CurrencyPair::with_delimiter("BTC", "USD", "-");
        assert!(store.ticker("Bitstamp", &pair, &AssetType::spot()).is_some());
        assert!(
            store
                .ticker("Bitstamp", &pair, &AssetType::new(AssetType::FUTURES))
                .is_none()
        );
    }

    #[test]
    fn test_update_replaces_previous_snapshot() {
        let store = MarketDataStore::new();
        store.update_ticker("Bitstamp", AssetType::spot(), ticker("BTC", dec!(100)));
        store.update_ticker("Bitstamp", AssetType::spot(), ticker("BTC", dec!(101)));

        let grouped = store.tickers_by_exchange();
        assert_eq!(grouped["Bitstamp"].len(), 1);
        assert_eq!(grouped["Bitstamp"][0].last, dec!(101));
    }

    #[test]
    fn test_grouping_sorted_by_pair() {
        let store = MarketDataStore::new();
        store.update_ticker("Bitstamp", AssetType::spot(), ticker("LTC", dec!(70)));
        store.update_ticker("Bitstamp", AssetType::spot(), ticker("BTC", dec!(100)));
        store.update_ticker("Kraken", AssetType::spot(), ticker("ETH", dec!(3)));

        let grouped = store.tickers_by_exchange();
        let firsts: Vec<&str> = grouped["Bitstamp"]
            .iter()
            .map(|t| t.pair.first.as_str())
            .collect();
        assert_eq!(firsts, vec!["BTC", "LTC"]);
        assert_eq!(grouped.keys().collect::<Vec<_>>(), vec!["Bitstamp", "Kraken"]);
    }
}
