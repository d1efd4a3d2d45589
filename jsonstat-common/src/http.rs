//! Shared HTTP serving for exporters.

use std::net::SocketAddr;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::error::{Error, Result};
use crate::exposition::CONTENT_TYPE;

/// Build a `200 OK` exposition response.
pub fn metrics_response(body: String) -> Response {
    (StatusCode::OK, [("content-type", CONTENT_TYPE)], body).into_response()
}

/// Handler for the /health endpoint.
pub async fn health_handler() -> Response {
    (StatusCode::OK, "healthy\n").into_response()
}

/// Add the routes and layers every exporter serves.
pub fn with_common_routes(router: Router) -> Router {
    router
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
}

/// HTTP server for an exporter router.
pub struct HttpServer {
    router: Router,
    listen_addr: SocketAddr,
}

impl HttpServer {
    /// Create a new HTTP server.
    pub fn new(router: Router, listen_addr: SocketAddr) -> Self {
        Self {
            router,
            listen_addr,
        }
    }

    /// Bind and run until the shutdown signal is received.
    pub async fn run(self, shutdown: watch::Receiver<bool>) -> Result<()> {
        info!(addr = %self.listen_addr, "Starting HTTP server");

        let listener = TcpListener::bind(self.listen_addr).await.map_err(|e| {
            Error::Config(format!("Failed to bind to {}: {}", self.listen_addr, e))
        })?;

        serve(listener, self.router, shutdown).await
    }
}

/// Serve `router` on an already bound listener until shutdown.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(addr = %addr, "HTTP server listening");
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            loop {
                if shutdown.changed().await.is_err() {
                    break;
                }
                if *shutdown.borrow() {
                    break;
                }
            }
            info!("HTTP server shutting down");
        })
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = async {
            #[cfg(unix)]
            {
                match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                    Ok(mut sigterm) => {
                        sigterm.recv().await;
                    }
                    Err(_) => std::future::pending::<()>().await,
                }
            }
            #[cfg(not(unix))]
            {
                std::future::pending::<()>().await;
            }
        } => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
