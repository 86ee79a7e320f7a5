//! Engine seed configuration
//!
//! Loaded as part of the daemon configuration file:
//! - Configured exchanges and whether they start enabled
//! - Optional forex rate table
//! - Portfolio addresses tracked from startup

use helm_core::PortfolioAddress;
use helm_ports::ForexRates;
use serde::{Deserialize, Serialize};

/// Seed state for [`crate::InMemoryEngine`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Exchanges known to the engine
    #[serde(default)]
    pub exchanges: Vec<ExchangeConfig>,

    /// Forex rates available from startup (none = unavailable)
    #[serde(default)]
    pub forex_rates: Option<ForexRates>,

    /// Portfolio addresses tracked from startup
    #[serde(default)]
    pub portfolio: Vec<PortfolioAddress>,
}

/// One configured exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeConfig {
    pub name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl ExchangeConfig {
    pub fn enabled(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
        }
    }

    pub fn disabled(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: false,
        }
    }
}
