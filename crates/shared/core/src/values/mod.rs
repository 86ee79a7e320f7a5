use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Price value - uses Decimal for precision
pub type Price = Decimal;

/// Amount/volume value - uses Decimal for precision
pub type Amount = Decimal;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Key identifying a configured exchange
pub type ExchangeName = String;

/// Asset class tag (spot, margin, futures, ...)
///
/// Carried opaquely: the control plane never checks membership, it forwards
/// whatever the caller sent and lets the engine decide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetType(String);

impl AssetType {
    pub const SPOT: &'static str = "SPOT";
    pub const FUTURES: &'static str = "FUTURES";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn spot() -> Self {
        Self::new(Self::SPOT)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AssetType {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AssetType {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
