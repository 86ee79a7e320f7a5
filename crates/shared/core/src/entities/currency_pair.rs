use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency pair (e.g. `BTC-USD`, or `BTCUSD` with an empty delimiter)
///
/// Equality is by value of all three fields, so `BTC-USD` and `BTCUSD` are
/// different pairs even though they name the same market.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub delimiter: String,
    pub first: String,
    pub second: String,
}

impl CurrencyPair {
    /// Create a pair in concatenated form (empty delimiter)
    pub fn new(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            delimiter: String::new(),
            first: first.into(),
            second: second.into(),
        }
    }

    /// Create a pair with an explicit delimiter
    pub fn with_delimiter(
        first: impl Into<String>,
        second: impl Into<String>,
        delimiter: impl Into<String>,
    ) -> Self {
        Self {
            delimiter: delimiter.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    /// Whether the pair is written without a delimiter
    pub fn is_concatenated(&self) -> bool {
        self.delimiter.is_empty()
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.first, self.delimiter, self.second)
    }
}
