//! Helm Core Domain
//!
//! Pure domain types for the helm trading daemon control plane.
//! This crate contains no async, no I/O, and is 100% unit testable.
//!
//! Everything here is built per request from wire input or per response
//! from engine output; nothing in this crate is long-lived state.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    // Market data
    CurrencyPair,
    ExchangeTickers,
    Orderbook,
    OrderbookItem,
    Ticker,
    // Portfolio
    PortfolioAddress,
    // Conditional events
    EventCondition,
    EventId,
    EventWatch,
};
pub use values::{Amount, AssetType, ExchangeName, Price, Timestamp};
