use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::CurrencyPair;
use crate::values::{AssetType, ExchangeName};

/// Handle of a registered event, assigned by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub i64);

impl EventId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for EventId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Condition evaluated against live market data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCondition {
    pub check_bids: bool,
    pub check_bids_and_asks: bool,
    /// Comparison operator, e.g. `>=`
    pub condition: String,
    pub orderbook_amount: Decimal,
    pub price: Decimal,
}

/// A conditional watch: what to look at, when it fires and what to do
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventWatch {
    pub exchange: ExchangeName,
    /// Market data item to watch (`PRICE`, `ORDERBOOK`)
    pub item: String,
    pub condition: EventCondition,
    pub pair: CurrencyPair,
    pub asset_type: AssetType,
    /// Action to run when the condition holds
    pub action: String,
}
