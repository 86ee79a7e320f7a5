//! Helm Engine
//!
//! In-memory implementation of [`helm_ports::EngineFacade`]. It holds the
//! daemon's exchange registry, latest market data, portfolio and event
//! registry, each behind its own lock so concurrent RPC calls never
//! serialise on a single mutex.
//!
//! Market data is pushed in with [`InMemoryEngine::update_ticker`] and
//! [`InMemoryEngine::update_orderbook`]; everything else is driven through
//! the facade.

pub mod config;
mod engine;
mod events;
mod exchanges;
mod market_data;
mod portfolio;

pub use config::{EngineConfig, ExchangeConfig};
pub use engine::InMemoryEngine;
pub use events::EventRegistry;
pub use exchanges::ExchangeRegistry;
pub use market_data::MarketDataStore;
pub use portfolio::PortfolioStore;
