//! pulsed — the PulseGrid daemon.
//!
//! Single binary that assembles the PulseGrid subsystems:
//! - Trend registry + periodic collector loop
//! - REST API serving trend snapshots
//! - Request instrumentation feeding the built-in traffic trends
//!
//! # Usage
//!
//! ```text
//! pulsed serve --port 8750 --tick-interval 10 [--config pulse.toml]
//! ```

mod config;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing::info;

use crate::config::PulseConfig;
use pulsegrid_api::traffic;
use pulsegrid_collector::TrendRegistry;

#[derive(Parser)]
#[command(name = "pulsed", about = "PulseGrid daemon")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the trend collector and API server.
    Serve {
        /// Port to listen on (overrides the config file).
        #[arg(long)]
        port: Option<u16>,

        /// Base tick interval in seconds (overrides the config file).
        #[arg(long)]
        tick_interval: Option<u64>,

        /// Path to a pulse.toml configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,pulsed=debug,pulsegrid=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            port,
            tick_interval,
            config,
        } => serve(port, tick_interval, config).await,
    }
}

async fn serve(
    port: Option<u16>,
    tick_interval: Option<u64>,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    info!("PulseGrid daemon starting");

    let mut config = match config_path {
        Some(path) => PulseConfig::from_file(&path)?,
        None => PulseConfig::default(),
    };
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(secs) = tick_interval {
        config.collector.tick_interval_secs = secs;
    }

    // ── Trend registry ─────────────────────────────────────────

    let registry = TrendRegistry::new(Duration::from_secs(config.collector.tick_interval_secs));

    // Built-in traffic trends, then anything from the config file.
    registry.register(traffic::requests_spec()).await?;
    registry.register(traffic::inflight_spec()).await?;
    for entry in &config.series {
        registry.register(entry.to_spec()).await?;
    }
    info!(
        series = config.series.len() + 2,
        tick_secs = config.collector.tick_interval_secs,
        "trend registry initialized"
    );

    // ── Shutdown signal ────────────────────────────────────────

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Collector loop ─────────────────────────────────────────

    let collector = registry.clone();
    let collector_handle = tokio::spawn(async move {
        collector.run(shutdown_rx).await;
    });

    // ── API server ─────────────────────────────────────────────

    let monitor = traffic::TrafficMonitor::new(registry.clone());
    let router = pulsegrid_api::build_router(registry)
        .layer(axum::middleware::from_fn_with_state(monitor, traffic::track));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!(%addr, "API server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Graceful shutdown on Ctrl-C.
    let server = axum::serve(listener, router).with_graceful_shutdown(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
        info!("shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    server.await?;

    // Wait for the collector loop.
    let _ = collector_handle.await;

    info!("PulseGrid daemon stopped");
    Ok(())
}
