//! Translation between wire messages and domain values
//!
//! Wire messages mark nested structs as optional; the domain does not. A
//! missing required field is rejected here, before the engine is asked
//! anything. Timestamps are encoded as whole Unix seconds (sub-second
//! precision is truncated).

use chrono::DateTime;
use helm_core::{self as domain, AssetType, Timestamp};

use crate::error::TranslationError;
use crate::messages::{
    AddEventRequest, AddPortfolioAddressRequest, ConditionParams, CurrencyPair, OrderbookItem,
    OrderbookResponse, PortfolioAddress, TickerResponse, Tickers,
};

pub fn unix_seconds(ts: &Timestamp) -> i64 {
    ts.timestamp()
}

pub fn from_unix_seconds(secs: i64) -> Result<Timestamp, TranslationError> {
    DateTime::from_timestamp(secs, 0).ok_or(TranslationError::TimestampOutOfRange(secs))
}

/// Require an optional wire pair, naming the field when absent
pub fn required_pair(
    pair: Option<&CurrencyPair>,
    field: &'static str,
) -> Result<domain::CurrencyPair, TranslationError> {
    pair.map(domain::CurrencyPair::from)
        .ok_or(TranslationError::MissingField(field))
}

// ============================================================================
// Currency pair
// ============================================================================

impl From<&CurrencyPair> for domain::CurrencyPair {
    fn from(pair: &CurrencyPair) -> Self {
        domain::CurrencyPair::with_delimiter(
            pair.first_currency.clone(),
            pair.second_currency.clone(),
            pair.delimiter.clone(),
        )
    }
}

impl From<&domain::CurrencyPair> for CurrencyPair {
    fn from(pair: &domain::CurrencyPair) -> Self {
        CurrencyPair {
            delimiter: pair.delimiter.clone(),
            first_currency: pair.first.clone(),
            second_currency: pair.second.clone(),
        }
    }
}

// ============================================================================
// Market data
// ============================================================================

impl From<&domain::Ticker> for TickerResponse {
    fn from(t: &domain::Ticker) -> Self {
        TickerResponse {
            pair: Some(CurrencyPair::from(&t.pair)),
            last_updated: unix_seconds(&t.last_updated),
            last: t.last,
            high: t.high,
            low: t.low,
            bid: t.bid,
            ask: t.ask,
            volume: t.volume,
            price_ath: t.price_ath,
        }
    }
}

impl TryFrom<&TickerResponse> for domain::Ticker {
    type Error = TranslationError;

    fn try_from(t: &TickerResponse) -> Result<Self, Self::Error> {
        Ok(domain::Ticker {
            pair: required_pair(t.pair.as_ref(), "pair")?,
            last_updated: from_unix_seconds(t.last_updated)?,
            last: t.last,
            high: t.high,
            low: t.low,
            bid: t.bid,
            ask: t.ask,
            volume: t.volume,
            price_ath: t.price_ath,
        })
    }
}

impl From<&domain::ExchangeTickers> for Tickers {
    fn from(group: &domain::ExchangeTickers) -> Self {
        Tickers {
            exchange: group.exchange.clone(),
            tickers: group.tickers.iter().map(TickerResponse::from).collect(),
        }
    }
}

impl From<&domain::OrderbookItem> for OrderbookItem {
    fn from(item: &domain::OrderbookItem) -> Self {
        OrderbookItem {
            amount: item.amount,
            price: item.price,
        }
    }
}

impl From<&domain::Orderbook> for OrderbookResponse {
    fn from(book: &domain::Orderbook) -> Self {
        OrderbookResponse {
            pair: Some(CurrencyPair::from(&book.pair)),
            bids: book.bids.iter().map(OrderbookItem::from).collect(),
            asks: book.asks.iter().map(OrderbookItem::from).collect(),
            last_updated: unix_seconds(&book.last_updated),
            asset_type: book.asset_type.to_string(),
        }
    }
}

impl TryFrom<&OrderbookResponse> for domain::Orderbook {
    type Error = TranslationError;

    fn try_from(book: &OrderbookResponse) -> Result<Self, Self::Error> {
        let level = |item: &OrderbookItem| domain::OrderbookItem::new(item.amount, item.price);
        Ok(domain::Orderbook {
            pair: required_pair(book.pair.as_ref(), "pair")?,
            asset_type: AssetType::new(book.asset_type.clone()),
            bids: book.bids.iter().map(level).collect(),
            asks: book.asks.iter().map(level).collect(),
            last_updated: from_unix_seconds(book.last_updated)?,
        })
    }
}

// ============================================================================
// Portfolio
// ============================================================================

impl From<&domain::PortfolioAddress> for PortfolioAddress {
    fn from(addr: &domain::PortfolioAddress) -> Self {
        PortfolioAddress {
            address: addr.address.clone(),
            coin_type: addr.coin_type.clone(),
            description: addr.description.clone(),
            balance: addr.balance,
        }
    }
}

impl From<AddPortfolioAddressRequest> for domain::PortfolioAddress {
    fn from(req: AddPortfolioAddressRequest) -> Self {
        domain::PortfolioAddress::new(req.address, req.coin_type, req.description, req.balance)
    }
}

// ============================================================================
// Events
// ============================================================================

impl From<ConditionParams> for domain::EventCondition {
    fn from(p: ConditionParams) -> Self {
        domain::EventCondition {
            check_bids: p.check_bids,
            check_bids_and_asks: p.check_bids_and_asks,
            condition: p.condition,
            orderbook_amount: p.orderbook_amount,
            price: p.price,
        }
    }
}

impl From<&domain::EventCondition> for ConditionParams {
    fn from(c: &domain::EventCondition) -> Self {
        ConditionParams {
            check_bids: c.check_bids,
            check_bids_and_asks: c.check_bids_and_asks,
            condition: c.condition.clone(),
            orderbook_amount: c.orderbook_amount,
            price: c.price,
        }
    }
}

impl TryFrom<AddEventRequest> for domain::EventWatch {
    type Error = TranslationError;

    fn try_from(req: AddEventRequest) -> Result<Self, Self::Error> {
        let pair = required_pair(req.pair.as_ref(), "pair")?;
        let condition = req
            .condition_params
            .ok_or(TranslationError::MissingField("condition_params"))?;
        Ok(domain::EventWatch {
            exchange: req.exchange,
            item: req.item,
            condition: condition.into(),
            pair,
            asset_type: AssetType::new(req.asset_type),
            action: req.action,
        })
    }
}

impl From<&domain::EventWatch> for AddEventRequest {
    fn from(w: &domain::EventWatch) -> Self {
        AddEventRequest {
            exchange: w.exchange.clone(),
            item: w.item.clone(),
            condition_params: Some(ConditionParams::from(&w.condition)),
            pair: Some(CurrencyPair::from(&w.pair)),
            asset_type: w.asset_type.to_string(),
            action: w.action.clone(),
        }
    }
}
