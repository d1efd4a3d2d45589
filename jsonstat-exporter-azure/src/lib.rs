//! Prometheus exporter for Azure Resource Health.
//!
//! Each scrape of `/metrics?target=<subscription>` acquires a token from the
//! instance metadata service, lists the subscription's availability statuses
//! and exposes one `azure_resource_health_state` sample per resource plus a
//! single `azure_resource_health_up` sample.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌─────────────────┐     ┌─────────────────┐
//! │  IMDS / ARM API │<────│ HealthCollector │<────│   HTTP Server   │
//! │  (token, health)│     │  (poll cycle)   │     │   (/metrics)    │
//! └─────────────────┘     └─────────────────┘     └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```bash
//! jsonstat-exporter-azure --port 10500
//! curl 'http://localhost:10500/metrics?target=<subscription-id>'
//! ```
//!
//! # Configuration
//!
//! See [`config::AzureExporterConfig`] for configuration options.

pub mod collector;
pub mod config;
pub mod health;
pub mod http;

pub use collector::{HealthCollector, SharedCollector};
pub use config::AzureExporterConfig;
pub use health::HealthState;
