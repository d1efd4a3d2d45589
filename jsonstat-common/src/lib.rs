//! jsonstat Common Library
//!
//! Shared engine for exporters that poll a JSON status API and re-expose it
//! in the Prometheus text exposition format:
//!
//! - [`path`] - Dotted field-path resolution over nested JSON
//! - [`normalize`] - Conversion of resolved values into one numeric observation
//! - [`definition`] - Declarative metric definitions, label sets and samples
//! - [`registry`] - Cycle-scoped deduplication of metrics into named families
//! - [`exposition`] - Text exposition rendering
//! - [`cycle`] - Poll cycle lifecycle
//! - [`fetch`] - Outbound JSON client
//! - [`config`] - Configuration loading (JSON5 format)
//! - [`http`] - Shared HTTP serving
//! - [`error`] - Error types
//!
//! Data flows one way: an exporter fetches a payload, resolves each declared
//! [`MetricDefinition`] against it, normalizes the value, records it in the
//! cycle's [`Registry`] and renders the result.

pub mod config;
pub mod cycle;
pub mod definition;
pub mod error;
pub mod exposition;
pub mod fetch;
pub mod http;
pub mod normalize;
pub mod path;
pub mod registry;

// Re-export commonly used types at the crate root
pub use config::{LogFormat, LoggingConfig, ServerConfig, load_config, parse_config};
pub use cycle::{CyclePhase, PollCycle};
pub use definition::{LabelSet, MetricDefinition, Sample};
pub use error::{Error, Result};
pub use exposition::{format_sample, format_value, render_families, render_flat};
pub use fetch::{Credentials, FetchError, FetchRequest, JsonClient, JsonResponse, ResponseStatus};
pub use http::HttpServer;
pub use normalize::normalize;
pub use path::resolve;
pub use registry::{MetricFamily, Registry, sanitize_identity};

/// Initialize tracing with the given configuration.
///
/// `RUST_LOG` takes precedence over the configured level. Supports two output
/// formats:
/// - `LogFormat::Text` (default): Human-readable text format
/// - `LogFormat::Json`: Structured JSON format for log aggregation systems
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(fmt::layer())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(fmt::layer().json())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
    }

    Ok(())
}
