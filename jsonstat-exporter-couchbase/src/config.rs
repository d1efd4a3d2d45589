//! Configuration for the Couchbase exporter.

use serde::{Deserialize, Serialize};
use std::path::Path;

use jsonstat_common::{Error, LoggingConfig, Result, ServerConfig, load_config, parse_config};

/// Default listen port.
pub const DEFAULT_PORT: u16 = 9420;

/// Environment variable holding the REST API username.
pub const USERNAME_ENV: &str = "COUCHBASE_USERNAME";

/// Environment variable holding the REST API password.
pub const PASSWORD_ENV: &str = "COUCHBASE_PASSWORD";

/// Complete exporter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouchbaseExporterConfig {
    /// HTTP endpoint settings.
    #[serde(default = "default_server")]
    pub server: ServerConfig,

    /// Couchbase REST API settings.
    #[serde(default)]
    pub couchbase: CouchbaseConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_server() -> ServerConfig {
    ServerConfig::on_port(DEFAULT_PORT)
}

/// Couchbase REST API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouchbaseConfig {
    /// Base URL of the cluster's REST API (default: "http://127.0.0.1:8091").
    #[serde(default = "default_url")]
    pub url: String,
}

fn default_url() -> String {
    "http://127.0.0.1:8091".to_string()
}

impl Default for CouchbaseConfig {
    fn default() -> Self {
        Self { url: default_url() }
    }
}

impl CouchbaseConfig {
    /// Base URL without trailing slashes.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

impl CouchbaseExporterConfig {
    /// Load configuration from a JSON5 file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config: CouchbaseExporterConfig = load_config(path)?;
        config.server.or_port(DEFAULT_PORT);
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a JSON5 string.
    pub fn parse(content: &str) -> Result<Self> {
        let mut config: CouchbaseExporterConfig = parse_config(content)?;
        config.server.or_port(DEFAULT_PORT);
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;

        let url = &self.couchbase.url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "Couchbase URL must start with http:// or https://: {}",
                url
            )));
        }

        Ok(())
    }
}

impl Default for CouchbaseExporterConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            couchbase: CouchbaseConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
