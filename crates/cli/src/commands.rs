//! Turns parsed commands into RPC requests and runs them.

use std::time::Duration;

use helm_rpc::messages::*;
use helm_rpc::{Request, RpcClient};
use serde_json::Value;

use crate::cli::{Cli, Command, OptionalPairArgs, PairArgs, WithdrawArgs};
use crate::error::CliError;

/// Resolve the endpoint, issue the call and return the response JSON
pub async fn run(cli: Cli) -> Result<Value, CliError> {
    let addr = tokio::net::lookup_host(&cli.host)
        .await
        .map_err(|e| CliError::Resolve {
            host: cli.host.clone(),
            reason: e.to_string(),
        })?
        .next()
        .ok_or_else(|| CliError::Resolve {
            host: cli.host.clone(),
            reason: "no address found".to_string(),
        })?;

    let client = RpcClient::connect(addr).await?;
    let timeout = cli.timeout_ms.map(Duration::from_millis);
    let response = client.call(build_request(cli.command), timeout).await?;
    Ok(response.to_json()?)
}

pub fn build_request(command: Command) -> Request {
    match command {
        Command::GetExchanges { enabled } => Request::GetExchanges(GetExchangesRequest { enabled }),
        Command::EnableExchange(args) => {
            Request::EnableExchange(GenericExchangeNameRequest::new(args.exchange))
        }
        Command::DisableExchange(args) => {
            Request::DisableExchange(GenericExchangeNameRequest::new(args.exchange))
        }
        Command::GetTicker(args) => Request::GetTicker(GetTickerRequest {
            exchange: args.exchange,
            pair: Some(pair(&args.pair)),
            asset_type: args.asset_type,
        }),
        Command::GetTickers => Request::GetTickers(GetTickersRequest {}),
        Command::GetOrderbook(args) => Request::GetOrderbook(GetOrderbookRequest {
            exchange: args.exchange,
            pair: Some(pair(&args.pair)),
            asset_type: args.asset_type,
        }),
        Command::GetOrderbooks => Request::GetOrderbooks(GetOrderbooksRequest {}),
        Command::GetConfig => Request::GetConfig(GetConfigRequest {}),
        Command::GetPortfolio => Request::GetPortfolio(GetPortfolioRequest {}),
        Command::AddPortfolioAddress {
            address,
            coin_type,
            description,
            balance,
        } => Request::AddPortfolioAddress(AddPortfolioAddressRequest {
            address,
            coin_type,
            description,
            balance,
        }),
        Command::RemovePortfolioAddress {
            address,
            coin_type,
            description,
        } => Request::RemovePortfolioAddress(RemovePortfolioAddressRequest {
            address,
            coin_type,
            description,
        }),
        Command::GetForexRates => Request::GetForexRates(GetForexRatesRequest {}),
        Command::GetOrders {
            exchange,
            asset_type,
            pair,
        } => Request::GetOrders(GetOrdersRequest {
            exchange,
            asset_type,
            pair: optional_pair(&pair),
        }),
        Command::GetOrder { exchange, order_id } => {
            Request::GetOrder(GetOrderRequest { exchange, order_id })
        }
        Command::SubmitOrder {
            exchange,
            pair,
            side,
            order_type,
            amount,
            price,
            client_id,
        } => Request::SubmitOrder(SubmitOrderRequest {
            exchange,
            pair: optional_pair(&pair),
            side,
            order_type,
            amount,
            price,
            client_id,
        }),
        Command::CancelOrder {
            exchange,
            account_id,
            order_id,
            pair,
            asset_type,
            wallet_address,
            side,
        } => Request::CancelOrder(CancelOrderRequest {
            exchange,
            account_id,
            order_id,
            pair: optional_pair(&pair),
            asset_type,
            wallet_address,
            side,
        }),
        Command::CancelAllOrders(args) => Request::CancelAllOrders(CancelAllOrdersRequest {
            exchange: args.exchange,
        }),
        Command::GetEvents => Request::GetEvents(GetEventsRequest {}),
        Command::AddEvent {
            exchange,
            item,
            condition,
            price,
            check_bids,
            check_bids_and_asks,
            orderbook_amount,
            pair: pair_args,
            asset_type,
            action,
        } => Request::AddEvent(AddEventRequest {
            exchange,
            item,
            condition_params: Some(ConditionParams {
                check_bids,
                check_bids_and_asks,
                condition,
                orderbook_amount,
                price,
            }),
            pair: Some(pair(&pair_args)),
            asset_type,
            action,
        }),
        Command::RemoveEvent { id } => Request::RemoveEvent(RemoveEventRequest { id }),
        Command::GetCryptocurrencyDepositAddresses(args) => {
            Request::GetCryptocurrencyDepositAddresses(GetCryptocurrencyDepositAddressesRequest {
                exchange: args.exchange,
            })
        }
        Command::GetCryptocurrencyDepositAddress {
            exchange,
            cryptocurrency,
        } => Request::GetCryptocurrencyDepositAddress(GetCryptocurrencyDepositAddressRequest {
            exchange,
            cryptocurrency,
        }),
        Command::WithdrawCryptoFunds(args) => Request::WithdrawCryptocurrencyFunds(withdraw(args)),
        Command::WithdrawFiatFunds(args) => Request::WithdrawFiatFunds(withdraw(args)),
    }
}

fn pair(args: &PairArgs) -> CurrencyPair {
    CurrencyPair::new(&args.base, &args.quote, &args.delimiter)
}

fn optional_pair(args: &OptionalPairArgs) -> Option<CurrencyPair> {
    match (&args.base, &args.quote) {
        (Some(base), Some(quote)) => Some(CurrencyPair::new(base, quote, &args.delimiter)),
        _ => None,
    }
}

fn withdraw(args: WithdrawArgs) -> WithdrawCurrencyRequest {
    WithdrawCurrencyRequest {
        exchange: args.exchange,
        currency: args.currency,
        address: args.address,
        address_tag: args.address_tag,
        amount: args.amount,
        fee: args.fee,
        description: args.description,
    }
}
