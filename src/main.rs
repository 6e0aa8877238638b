//! Ant Route Server
//!
//! Serves static responses from a TOML route table, dispatching each request
//! to the first route whose Ant-style pattern matches `<METHOD><path>`.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request      ┌─────────┐    ┌──────────────┐    ┌──────────────┐
//!     ───────────────────▶│  http   │───▶│   routing    │───▶│   pattern    │
//!                         │ server  │    │ first match  │    │ Ant matcher  │
//!                         └────┬────┘    └──────▲───────┘    └──────────────┘
//!     Client Response          │                │ ArcSwap
//!     ◀────────────────────────┘         ┌──────┴───────┐
//!                                        │    config    │◀── routes.toml (watched)
//!                                        └──────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use ant_router::config::{load_config, ConfigWatcher, ServerConfig};
use ant_router::http::HttpServer;
use ant_router::lifecycle::Shutdown;
use ant_router::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "ant-router")]
#[command(about = "Serve static responses from an Ant-style route table", long_about = None)]
struct Args {
    /// Route table (TOML). Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not reload the route table when the file changes.
    #[arg(long)]
    no_watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };

    logging::init_logging(&config.observability)?;
    tracing::info!("ant-router v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
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

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    // The watcher stops when dropped, so it lives until main returns.
    let (_watcher, config_updates) = match &args.config {
        Some(path) if !args.no_watch => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (Some(watcher.run()?), updates)
        }
        _ => {
            let (_, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let server = HttpServer::new(config);
    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
