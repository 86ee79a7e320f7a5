mod currency_pair;
mod event;
mod orderbook;
mod portfolio;
mod ticker;

pub use currency_pair::CurrencyPair;
pub use event::{EventCondition, EventId, EventWatch};
pub use orderbook::{Orderbook, OrderbookItem};
pub use portfolio::PortfolioAddress;
pub use ticker::{ExchangeTickers, Ticker};
