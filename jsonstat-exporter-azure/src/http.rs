//! HTTP endpoint for Resource Health scrapes.

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde::Deserialize;
use tracing::debug;

use jsonstat_common::http::{metrics_response, with_common_routes};

use crate::collector::SharedCollector;

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    collector: SharedCollector,
}

/// Query parameters of a scrape.
#[derive(Debug, Deserialize)]
struct ScrapeParams {
    /// Subscription to report on.
    target: Option<String>,
}

/// Create the HTTP router.
pub fn create_router(collector: SharedCollector, metrics_path: &str) -> Router {
    let state = AppState { collector };

    let router = Router::new()
        .route(metrics_path, get(metrics_handler))
        .with_state(state);

    with_common_routes(router)
}

/// Handler for the metrics endpoint.
async fn metrics_handler(
    State(state): State<AppState>,
    Query(params): Query<ScrapeParams>,
) -> Response {
    let Some(target) = params.target.filter(|t| !t.is_empty()) else {
        debug!("Scrape without target parameter");
        return (StatusCode::BAD_REQUEST, "Target parameter is required\n").into_response();
    };

    metrics_response(state.collector.collect(&target).await)
}
