//! coin-fetcher — Entry Point
//!
//! Serves the JSON price/health API in front of CoinGecko, or acts as
//! a client for a running instance.
//!
//! Wiring sequence (serve):
//! 1. Parse CLI flags (--listenaddr, --config, --log-level)
//! 2. Load config.toml (optional) + apply flags + validate
//! 3. Init tracing (JSON structured logging)
//! 4. Create CoinGeckoClient (HTTP + 10s timeout)
//! 5. Build the chain: LogService → MetricsService → CoinGeckoService
//! 6. Serve /v1/price, /v1/health and /metrics until SIGINT

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::{info, warn};

use coin_fetcher::adapters::coingecko::{CoinGeckoClient, CoinGeckoService};
use coin_fetcher::adapters::http::{ApiServer, PriceClient};
use coin_fetcher::adapters::metrics::MetricsRegistry;
use coin_fetcher::config::{self, AppConfig, ConfigOverrides};
use coin_fetcher::ports::FetchService;
use coin_fetcher::usecases::{LogService, MetricsService};

const DEFAULT_ENDPOINT: &str = "http://localhost:9899";

#[derive(Debug, Parser)]
#[command(name = "coin-fetcher", version, about = "Cryptocurrency price proxy for the CoinGecko API")]
struct Cli {
    /// Listen address the service is running on [default: :9899]
    #[arg(long = "listenaddr", global = true)]
    listen_addr: Option<String>,

    /// Path to a TOML config file [default: ./config.toml if present]
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long = "log-level", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the JSON API server (default)
    Serve,
    /// Query a running instance for a coin price
    Price {
        /// Coin ticker, e.g. "bitcoin"
        ticker: String,
        #[arg(long, default_value = DEFAULT_ENDPOINT)]
        endpoint: String,
    },
    /// Query a running instance for the upstream health
    Health {
        #[arg(long, default_value = DEFAULT_ENDPOINT)]
        endpoint: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── 1. Load configuration (file optional, flags win) ────
    let (config, source) = config::loader::load_config(
        cli.config.as_deref(),
        ConfigOverrides {
            listen_addr: cli.listen_addr,
            log_level: cli.log_level,
        },
    )
    .context("Failed to load configuration")?;

    // ── 2. Initialize structured logging ────────────────────
    init_tracing(&config);
    match &source {
        Some(path) => info!(path = %path.display(), "Configuration file loaded"),
        None => info!("No configuration file found, using defaults"),
    }

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Price { ticker, endpoint } => {
            let resp = PriceClient::new(endpoint).fetch_price(&ticker).await?;
            println!("{}", serde_json::to_string_pretty(&resp)?);
            Ok(())
        }
        Command::Health { endpoint } => {
            let resp = PriceClient::new(endpoint).check_health().await?;
            println!("{}", serde_json::to_string_pretty(&resp)?);
            Ok(())
        }
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    if config.logging.json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Wire the decorator chain and run the API server until shutdown.
async fn serve(config: AppConfig) -> Result<()> {
    let bind_addr = config.server.bind_addr();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        listen = %bind_addr,
        upstream = %config.upstream.base_url,
        metrics = config.metrics.enabled,
        "Starting coin-fetcher"
    );

    // ── 3. Upstream client + base service ───────────────────
    let client = Arc::new(
        CoinGeckoClient::new(config.coingecko()).context("Failed to create CoinGecko client")?,
    );
    let base = CoinGeckoService::new(client);

    // ── 4. Decorator chain: log(metrics(base)) ──────────────
    let registry = if config.metrics.enabled {
        Some(Arc::new(MetricsRegistry::new().context("Failed to register metrics")?))
    } else {
        None
    };

    let mut metered = MetricsService::new(base).with_console(config.metrics.console);
    if let Some(registry) = &registry {
        metered = metered.with_registry(Arc::clone(registry));
    }
    let service: Arc<dyn FetchService> = Arc::new(LogService::new(metered));

    // ── 5. HTTP server ──────────────────────────────────────
    let mut server = ApiServer::new(bind_addr, service);
    if let Some(registry) = registry {
        server = server.with_metrics(registry);
    }

    server.run(shutdown_signal()).await?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("SIGINT received, initiating graceful shutdown"),
        Err(e) => {
            warn!(error = %e, "Failed to listen for SIGINT, serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
