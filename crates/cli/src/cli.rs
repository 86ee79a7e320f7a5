//! CLI argument definitions for helmctl.
//!
//! One subcommand per RPC operation, named by the lowercase method name
//! (`getexchanges`, `getticker`, ...). Every command prints the response as
//! pretty JSON.
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--host` | `127.0.0.1:4444` | RPC endpoint (env `HELM_RPC_ADDR`) |
//! | `--timeout-ms` | none | Per-call deadline |
//!
//! # Examples
//!
//! ```bash
//! helmctl getexchanges --enabled
//! helmctl getticker --exchange Bitstamp --base BTC --quote USD --asset-type SPOT
//! helmctl addportfolioaddress --address 1Boat... --coin-type BTC --balance 1.5
//! ```

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

#[derive(Debug, Parser)]
#[command(
    name = "helmctl",
    author,
    version,
    about = "Command-line client for the helm trading daemon"
)]
pub struct Cli {
    /// RPC endpoint of the daemon (host:port).
    #[arg(long, global = true, env = "HELM_RPC_ADDR", default_value = "127.0.0.1:4444")]
    pub host: String,

    /// Per-call deadline in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List exchanges.
    #[command(name = "getexchanges")]
    GetExchanges {
        /// Only enabled exchanges.
        #[arg(long)]
        enabled: bool,
    },

    /// Enable an exchange.
    #[command(name = "enableexchange")]
    EnableExchange(ExchangeArgs),

    /// Disable an exchange.
    #[command(name = "disableexchange")]
    DisableExchange(ExchangeArgs),

    /// Latest ticker of one pair.
    #[command(name = "getticker")]
    GetTicker(MarketArgs),

    /// Tickers of every enabled exchange.
    #[command(name = "gettickers")]
    GetTickers,

    /// Orderbook of one pair.
    #[command(name = "getorderbook")]
    GetOrderbook(MarketArgs),

    /// Orderbooks of every enabled exchange.
    #[command(name = "getorderbooks")]
    GetOrderbooks,

    /// Daemon configuration.
    #[command(name = "getconfig")]
    GetConfig,

    /// Tracked portfolio addresses.
    #[command(name = "getportfolio")]
    GetPortfolio,

    /// Track a portfolio address.
    #[command(name = "addportfolioaddress")]
    AddPortfolioAddress {
        #[arg(long)]
        address: String,
        #[arg(long)]
        coin_type: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        balance: Decimal,
    },

    /// Stop tracking a portfolio address.
    #[command(name = "removeportfolioaddress")]
    RemovePortfolioAddress {
        #[arg(long)]
        address: String,
        #[arg(long)]
        coin_type: String,
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Current forex rates.
    #[command(name = "getforexrates")]
    GetForexRates,

    /// Open orders on an exchange.
    #[command(name = "getorders")]
    GetOrders {
        #[arg(long)]
        exchange: String,
        #[arg(long, default_value = "")]
        asset_type: String,
        #[command(flatten)]
        pair: OptionalPairArgs,
    },

    /// One order by id.
    #[command(name = "getorder")]
    GetOrder {
        #[arg(long)]
        exchange: String,
        #[arg(long)]
        order_id: String,
    },

    /// Submit an order.
    #[command(name = "submitorder")]
    SubmitOrder {
        #[arg(long)]
        exchange: String,
        #[command(flatten)]
        pair: OptionalPairArgs,
        #[arg(long)]
        side: String,
        #[arg(long)]
        order_type: String,
        #[arg(long)]
        amount: Decimal,
        #[arg(long, default_value_t = Decimal::ZERO)]
        price: Decimal,
        #[arg(long, default_value = "")]
        client_id: String,
    },

    /// Cancel one order.
    #[command(name = "cancelorder")]
    CancelOrder {
        #[arg(long)]
        exchange: String,
        #[arg(long, default_value = "")]
        account_id: String,
        #[arg(long)]
        order_id: String,
        #[command(flatten)]
        pair: OptionalPairArgs,
        #[arg(long, default_value = "")]
        asset_type: String,
        #[arg(long, default_value = "")]
        wallet_address: String,
        #[arg(long, default_value = "")]
        side: String,
    },

    /// Cancel every order on an exchange.
    #[command(name = "cancelallorders")]
    CancelAllOrders(ExchangeArgs),

    /// Registered event watches.
    #[command(name = "getevents")]
    GetEvents,

    /// Register an event watch.
    #[command(name = "addevent")]
    AddEvent {
        #[arg(long)]
        exchange: String,
        /// PRICE or ORDERBOOK
        #[arg(long)]
        item: String,
        /// One of >, >=, <, <=, ==
        #[arg(long)]
        condition: String,
        #[arg(long)]
        price: Decimal,
        #[arg(long)]
        check_bids: bool,
        #[arg(long)]
        check_bids_and_asks: bool,
        #[arg(long, default_value_t = Decimal::ZERO)]
        orderbook_amount: Decimal,
        #[command(flatten)]
        pair: PairArgs,
        #[arg(long)]
        asset_type: String,
        #[arg(long)]
        action: String,
    },

    /// Remove an event watch.
    #[command(name = "removeevent")]
    RemoveEvent {
        #[arg(long)]
        id: i64,
    },

    /// Deposit addresses of an exchange.
    #[command(name = "getcryptocurrencydepositaddresses")]
    GetCryptocurrencyDepositAddresses(ExchangeArgs),

    /// Deposit address for one cryptocurrency.
    #[command(name = "getcryptocurrencydepositaddress")]
    GetCryptocurrencyDepositAddress {
        #[arg(long)]
        exchange: String,
        #[arg(long)]
        cryptocurrency: String,
    },

    /// Withdraw cryptocurrency.
    #[command(name = "withdrawcryptofunds")]
    WithdrawCryptoFunds(WithdrawArgs),

    /// Withdraw fiat.
    #[command(name = "withdrawfiatfunds")]
    WithdrawFiatFunds(WithdrawArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ExchangeArgs {
    #[arg(long)]
    pub exchange: String,
}

#[derive(Debug, Clone, Args)]
pub struct PairArgs {
    /// Base currency, e.g. BTC.
    #[arg(long)]
    pub base: String,

    /// Quote currency, e.g. USD.
    #[arg(long)]
    pub quote: String,

    #[arg(long, default_value = "-")]
    pub delimiter: String,
}

#[derive(Debug, Clone, Args)]
pub struct OptionalPairArgs {
    #[arg(long, requires = "quote")]
    pub base: Option<String>,

    #[arg(long, requires = "base")]
    pub quote: Option<String>,

    #[arg(long, default_value = "-")]
    pub delimiter: String,
}

#[derive(Debug, Clone, Args)]
pub struct MarketArgs {
    #[arg(long)]
    pub exchange: String,

    #[command(flatten)]
    pub pair: PairArgs,

    #[arg(long)]
    pub asset_type: String,
}

#[derive(Debug, Clone, Args)]
pub struct WithdrawArgs {
    #[arg(long)]
    pub exchange: String,
    #[arg(long)]
    pub currency: String,
    #[arg(long, default_value = "")]
    pub address: String,
    #[arg(long, default_value = "")]
    pub address_tag: String,
    #[arg(long)]
    pub amount: Decimal,
    #[arg(long, default_value_t = Decimal::ZERO)]
    pub fee: Decimal,
    #[arg(long, default_value = "")]
    pub description: String,
}
