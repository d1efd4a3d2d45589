//! Prometheus exporter for Couchbase.
//!
//! Each scrape of `/metrics` walks the cluster's REST API (cluster totals,
//! nodes, buckets and per-bucket detail and replication statistics) and
//! exposes every declared metric as a gauge family.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌────────────────────┐     ┌─────────────────┐
//! │ Couchbase REST  │<────│ CouchbaseCollector │<────│   HTTP Server   │
//! │  (/pools/...)   │     │    (poll cycle)    │     │   (/metrics)    │
//! └─────────────────┘     └────────────────────┘     └─────────────────┘
//! ```
//!
//! A failed cycle is fatal: the scrape is answered with `500` and the
//! process shuts down with a non-zero exit code.
//!
//! # Usage
//!
//! ```bash
//! COUCHBASE_USERNAME=admin COUCHBASE_PASSWORD=secret \
//!     jsonstat-exporter-couchbase --couchbase http://10.0.0.5:8091 --port 9420
//! curl http://localhost:9420/metrics
//! ```
//!
//! # Configuration
//!
//! See [`config::CouchbaseExporterConfig`] for configuration options.

pub mod collector;
pub mod config;
pub mod http;
pub mod metrics;

pub use collector::{CouchbaseCollector, SharedCollector};
pub use config::CouchbaseExporterConfig;
