//! Prometheus exporter for Couchbase.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::{mpsc, watch};
use tracing::{error, info};

use jsonstat_common::http::shutdown_signal;
use jsonstat_common::{Credentials, HttpServer, JsonClient, init_tracing};
use jsonstat_exporter_couchbase::config::{PASSWORD_ENV, USERNAME_ENV};
use jsonstat_exporter_couchbase::http::create_router;
use jsonstat_exporter_couchbase::{CouchbaseCollector, CouchbaseExporterConfig};

/// Prometheus exporter for Couchbase.
#[derive(Parser, Debug)]
#[command(name = "jsonstat-exporter-couchbase")]
#[command(about = "Export Couchbase cluster, node and bucket statistics as Prometheus metrics")]
#[command(version)]
struct Args {
    /// Path to configuration file (JSON5 format).
    #[arg(long)]
    config: Option<String>,

    /// Couchbase REST API base URL (overrides config).
    #[arg(short, long)]
    couchbase: Option<String>,

    /// HTTP listen port (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// REST API username.
    #[arg(long, env = USERNAME_ENV, hide_env_values = true)]
    username: Option<String>,

    /// REST API password.
    #[arg(long, env = PASSWORD_ENV, hide_env_values = true)]
    password: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // Load configuration
    let mut config = if let Some(config_path) = &args.config {
        CouchbaseExporterConfig::load_from_file(config_path)?
    } else {
        CouchbaseExporterConfig::default()
    };

    if let Some(url) = args.couchbase {
        config.couchbase.url = url;
    }
    if let Some(port) = args.port {
        config.server.set_port(port)?;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    config.validate()?;

    init_tracing(&config.logging)?;

    info!("Starting jsonstat Couchbase exporter");

    // Credentials are only used when both halves are present.
    let credentials = match (args.username, args.password) {
        (Some(username), Some(password)) => Some(Credentials::new(username, password)),
        _ => None,
    };

    let listen_addr = config.server.socket_addr()?;
    let metrics_path = config.server.path.clone();

    info!(
        couchbase = %config.couchbase.base_url(),
        authenticated = credentials.is_some(),
        "Polling Couchbase"
    );

    let client = JsonClient::new(concat!(
        "jsonstat-exporter-couchbase/",
        env!("CARGO_PKG_VERSION")
    ))?;
    let collector = Arc::new(CouchbaseCollector::new(
        client,
        config.couchbase.base_url(),
        credentials,
    ));

    let (fatal_tx, mut fatal_rx) = mpsc::unbounded_channel();
    let http_server = HttpServer::new(
        create_router(collector, &metrics_path, fatal_tx),
        listen_addr,
    );

    info!(addr = %listen_addr, path = %metrics_path, "Serving metrics");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let mut http_task = tokio::spawn(async move { http_server.run(shutdown_rx).await });

    let failed = tokio::select! {
        _ = shutdown_signal() => false,
        Some(_) = fatal_rx.recv() => true,
        result = &mut http_task => {
            // The server stopped on its own, most likely because it could not bind.
            result??;
            return Ok(ExitCode::SUCCESS);
        }
    };

    let _ = shutdown_tx.send(true);

    match tokio::time::timeout(Duration::from_secs(5), http_task).await {
        Ok(Ok(Err(e))) => error!("HTTP server error: {}", e),
        Ok(Err(e)) => error!("HTTP server task failed: {}", e),
        _ => {}
    }

    if failed {
        // The failing handler already logged the cause.
        return Ok(ExitCode::FAILURE);
    }

    info!("Exporter stopped");
    Ok(ExitCode::SUCCESS)
}
