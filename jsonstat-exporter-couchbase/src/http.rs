//! HTTP endpoint for Couchbase scrapes.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tokio::sync::mpsc;
use tracing::error;

use jsonstat_common::http::{metrics_response, with_common_routes};

use crate::collector::SharedCollector;

/// Sender half used to report a failed poll cycle to the process.
pub type FatalSender = mpsc::UnboundedSender<String>;

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    collector: SharedCollector,
    fatal: FatalSender,
}

/// Create the HTTP router.
///
/// A failed cycle answers `500` and pushes the failure onto `fatal`.
pub fn create_router(collector: SharedCollector, metrics_path: &str, fatal: FatalSender) -> Router {
    let state = AppState { collector, fatal };

    let router = Router::new()
        .route(metrics_path, get(metrics_handler))
        .with_state(state);

    with_common_routes(router)
}

/// Handler for the metrics endpoint.
async fn metrics_handler(State(state): State<AppState>) -> Response {
    match state.collector.collect().await {
        Ok(body) => metrics_response(body),
        Err(e) => {
            error!("{}", e);
            let message = e.to_string();
            // The receiver is gone once shutdown has started.
            let _ = state.fatal.send(message.clone());
            (StatusCode::INTERNAL_SERVER_ERROR, format!("{}\n", message)).into_response()
        }
    }
}
