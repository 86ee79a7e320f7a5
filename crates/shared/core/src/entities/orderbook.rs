use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::CurrencyPair;
use crate::values::{AssetType, Timestamp};

/// Single orderbook level (amount at price)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderbookItem {
    pub amount: Decimal,
    pub price: Decimal,
}

impl OrderbookItem {
    pub fn new(amount: Decimal, price: Decimal) -> Self {
        Self { amount, price }
    }
}

/// Orderbook snapshot as held by the engine
///
/// Bids and asks keep the order the engine produced them in; nothing in the
/// control plane re-sorts them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orderbook {
    pub pair: CurrencyPair,
    pub asset_type: AssetType,
    pub bids: Vec<OrderbookItem>,
    pub asks: Vec<OrderbookItem>,
    pub last_updated: Timestamp,
}
