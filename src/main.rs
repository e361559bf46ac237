//! DeFi-data aggregation gateway.
//!
//! A stateless HTTP gateway exposing simplified REST endpoints (wallet
//! balances, OHLC candles, cross-chain swap quotes, transaction history,
//! news, a static token directory) and forwarding each to the upstream
//! aggregation API with server-held credentials.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────┐
//!                    │                   GATEWAY                      │
//!                    │                                                │
//!   Client Request   │  ┌──────┐   ┌──────────┐   ┌───────────────┐  │
//!   ─────────────────┼─▶│ http │──▶│ gateway  │──▶│   upstream    │──┼──▶ Aggregation /
//!                    │  │server│   │  engine  │   │    client     │  │    News API
//!                    │  └──────┘   └────┬─────┘   └───────┬───────┘  │
//!                    │                  │                 │          │
//!   Client Response  │  ┌──────┐   ┌────▼─────┐   ┌───────▼───────┐  │
//!   ◀────────────────┼──│ cors │◀──│ response │◀──│   outcome     │  │
//!                    │  └──────┘   │  shaper  │   │ classification│  │
//!                    │             └──────────┘   └───────────────┘  │
//!                    │                                                │
//!                    │  config · observability · lifecycle            │
//!                    └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use defi_gateway::config::load_config;
use defi_gateway::http::HttpServer;
use defi_gateway::lifecycle::Shutdown;
use defi_gateway::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "defi-gateway")]
#[command(about = "Credential-injecting gateway for DeFi-data aggregation APIs", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        aggregation_base = %config.upstream.aggregation_base_url,
        news_base = %config.upstream.news_base_url,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        credentials = ?config.credentials,
        "Configuration loaded"
    );

    if config.credentials.api_auth_token.is_none() {
        tracing::warn!("API_AUTH_TOKEN is not set; proxied endpoints will report a configuration error");
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
