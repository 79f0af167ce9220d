//! Tourism website API gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                  GATEWAY                     │
//!     Browser request    │  ┌─────────┐   ┌──────────┐   ┌──────────┐   │
//!     ───────────────────┼─▶│  http   │──▶│  routes  │──▶│ upstream │───┼───▶ Backend API
//!                        │  │ server  │   │ handlers │   │  client  │   │
//!                        │  └─────────┘   └──────────┘   └──────────┘   │
//!     JSON response      │       ▲              │                       │
//!     ◀──────────────────┼───────┴──── relay / error shape ◀───────────┼──── status + JSON
//!                        │                                              │
//!                        │  config · observability · lifecycle          │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use tourism_gateway::config::load_config;
use tourism_gateway::lifecycle::signals::wait_for_signal;
use tourism_gateway::observability::{logging, metrics};
use tourism_gateway::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "tourism-gateway")]
#[command(about = "API gateway between the tourism website and its backend", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Listener address, overriding config and environment.
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

    logging::init(&config.observability);

    tracing::info!("tourism-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        backend = %config.backend.base_url,
        request_timeout_secs = config.timeouts.request_secs,
        expose_reset_token = config.security.expose_reset_token,
        "Configuration loaded"
    );
    if config.security.expose_reset_token {
        tracing::warn!("Password reset tokens will be echoed to callers");
    }

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        wait_for_signal().await;
        signal_shutdown.trigger();
    });

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
