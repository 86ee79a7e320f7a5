use std::process::ExitCode;

use clap::Parser;
use helm_daemon::{Daemon, DaemonArgs};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing (log records from the libraries are bridged in)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "helm_daemon=info,helm_engine=info,helm_rpc=info,helm_gateway=info,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = DaemonArgs::parse();

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(path) = &args.config {
        tracing::info!("Loaded configuration from: {}", path.display());
    }
    tracing::info!("Exchanges: {}", config.engine.exchanges.len());

    let daemon = match Daemon::start(&config).await {
        Ok(daemon) => daemon,
        Err(e) => {
            tracing::error!("Startup failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for Ctrl-C: {}", e);
    }

    match daemon.shutdown().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Shutdown failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
