//! Widget profile routing service.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌───────────────────────────────────────────────┐
//!                        │                 WIDGET ROUTER                 │
//!   Embedding page       │  ┌──────────────┐     ┌─────────────────────┐ │
//!   ─────────────────────┼─▶│ http server  │────▶│ profiles::lookup    │ │
//!   GET /api/widget-     │  │ (CORS: *)    │     │  routing::resolver  │ │
//!   config               │  └──────┬───────┘     │  routing::matcher   │ │
//!                        │         │             └──────────┬──────────┘ │
//!   Admin tooling        │         ▼                        ▼            │
//!   ─────────────────────┼─▶ CRUD handlers ───────▶ record store (JSON)   │
//!                        │                                  │            │
//!                        │   widget-cli build-snapshot ◀────┘            │
//!                        │         │                                     │
//!                        │         ▼                                     │
//!   Loader fallback      │   dist/widget-manifest.json                   │
//!   ◀────────────────────┼── GET /widget-manifest.json                   │
//!                        └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use widget_router::config::{load_config, ServerConfig};
use widget_router::observability::{logging, metrics};
use widget_router::profiles::FileStore;
use widget_router::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "widget-router")]
#[command(
    about = "Serves widget profile resolution and rule/profile management",
    long_about = None
)]
struct Args {
    /// Path to the TOML configuration file. Built-in defaults when omitted.
    #[arg(short, long, env = "WIDGET_ROUTER_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };

    logging::init_logging(&config.observability);
    tracing::info!("widget-router v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        profiles_dir = %config.store.profiles_dir,
        rules_dir = %config.store.rules_dir,
        snapshot_path = %config.snapshot.path,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let store = Arc::new(FileStore::new(&config.store.profiles_dir, &config.store.rules_dir));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => signal.trigger(),
            Err(e) => tracing::error!(error = %e, "Failed to install Ctrl+C handler"),
        }
    });

    let server = HttpServer::new(config, store);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
