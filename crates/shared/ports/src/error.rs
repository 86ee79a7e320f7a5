use thiserror::Error;

/// Failures raised by the trading engine
///
/// The control plane forwards these unchanged; the variants exist so callers
/// can pick a transport status without parsing messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("exchange {0} not found")]
    UnknownExchange(String),

    #[error("exchange {0} already enabled")]
    ExchangeAlreadyEnabled(String),

    #[error("exchange {0} is not enabled")]
    ExchangeNotEnabled(String),

    #[error("no ticker found for {exchange} {pair} {asset_type}")]
    NoTickerData {
        exchange: String,
        pair: String,
        asset_type: String,
    },

    #[error("no orderbook found for {exchange} {pair} {asset_type}")]
    NoOrderbookData {
        exchange: String,
        pair: String,
        asset_type: String,
    },

    #[error("invalid event: {0}")]
    InvalidEvent(String),

    #[error("event {0} not found")]
    UnknownEvent(i64),

    #[error("engine unavailable: {0}")]
    Unavailable(String),

    #[error("engine call cancelled")]
    Cancelled,
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
