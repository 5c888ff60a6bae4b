//! Aviation data proxy binary.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use aviation_proxy::config::load_config;
use aviation_proxy::http::HttpServer;
use aviation_proxy::lifecycle::{signals, Shutdown};
use aviation_proxy::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "aviation-proxy")]
#[command(about = "Validating proxy for METAR, TAF and NOTAM data", long_about = None)]
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

    let config = load_config(cli.config.as_deref(), cli.bind)?;

    logging::init(&config.observability);
    tracing::info!("aviation-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        weather_upstream = %config.upstream.weather_base_url,
        notam_upstream = %config.upstream.notam_url,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        "Configuration loaded"
    );

    if config.notam.is_empty() {
        tracing::warn!("NOTAM credentials not configured (set FAA_ID / FAA_KEY); NOTAM requests will likely be rejected upstream");
    }

    if config.observability.metrics_enabled {
        // Address was checked during config validation.
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
