//! Prometheus exporter for Azure Resource Health.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::watch;
use tracing::{error, info};

use jsonstat_common::http::shutdown_signal;
use jsonstat_common::{HttpServer, JsonClient, init_tracing};
use jsonstat_exporter_azure::http::create_router;
use jsonstat_exporter_azure::{AzureExporterConfig, HealthCollector};

/// Prometheus exporter for Azure Resource Health.
#[derive(Parser, Debug)]
#[command(name = "jsonstat-exporter-azure")]
#[command(about = "Export Azure Resource Health availability as Prometheus metrics")]
#[command(version)]
struct Args {
    /// Path to configuration file (JSON5 format).
    #[arg(short, long)]
    config: Option<String>,

    /// HTTP listen port (overrides config).
    #[arg(short, long, env = "PUBLISH_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let mut config = if let Some(config_path) = &args.config {
        AzureExporterConfig::load_from_file(config_path)?
    } else {
        AzureExporterConfig::default()
    };

    if let Some(port) = args.port {
        config.server.set_port(port)?;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }

    init_tracing(&config.logging)?;

    info!("Starting jsonstat Azure Resource Health exporter");

    let listen_addr = config.server.socket_addr()?;
    let metrics_path = config.server.path.clone();

    let client = JsonClient::new(concat!("jsonstat-exporter-azure/", env!("CARGO_PKG_VERSION")))?;
    let collector = Arc::new(HealthCollector::new(client, config));
    let http_server = HttpServer::new(create_router(collector, &metrics_path), listen_addr);

    info!(addr = %listen_addr, path = %metrics_path, "Serving metrics");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut http_task = tokio::spawn(async move { http_server.run(shutdown_rx).await });

    tokio::select! {
        _ = shutdown_signal() => {}
        result = &mut http_task => {
            // The server stopped on its own, most likely because it could not bind.
            result??;
            return Ok(());
        }
    }

    let _ = shutdown_tx.send(true);

    match tokio::time::timeout(Duration::from_secs(5), http_task).await {
        Ok(Ok(Err(e))) => error!("HTTP server error: {}", e),
        Ok(Err(e)) => error!("HTTP server task failed: {}", e),
        _ => {}
    }

    info!("Exporter stopped");
    Ok(())
}
