//! Configuration for the Azure Resource Health exporter.

use serde::{Deserialize, Serialize};
use std::path::Path;

use jsonstat_common::{Error, LoggingConfig, Result, ServerConfig, load_config, parse_config};

/// Default listen port.
pub const DEFAULT_PORT: u16 = 10500;

/// Complete exporter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureExporterConfig {
    /// HTTP endpoint settings.
    #[serde(default = "default_server")]
    pub server: ServerConfig,

    /// Instance metadata token endpoint.
    #[serde(default)]
    pub metadata: MetadataConfig,

    /// Resource Health management API.
    #[serde(default)]
    pub management: ManagementConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_server() -> ServerConfig {
    ServerConfig::on_port(DEFAULT_PORT)
}

/// Instance metadata service token settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    /// Token endpoint URL.
    #[serde(default = "default_token_url")]
    pub token_url: String,

    /// `api-version` query parameter.
    #[serde(default = "default_metadata_api_version")]
    pub api_version: String,

    /// `resource` query parameter (audience of the token).
    #[serde(default = "default_resource")]
    pub resource: String,
}

fn default_token_url() -> String {
    "http://169.254.169.254/metadata/identity/oauth2/token".to_string()
}

fn default_metadata_api_version() -> String {
    "2018-02-01".to_string()
}

fn default_resource() -> String {
    "https://management.azure.com/".to_string()
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            token_url: default_token_url(),
            api_version: default_metadata_api_version(),
            resource: default_resource(),
        }
    }
}

/// Resource Health API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagementConfig {
    /// Management API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// `api-version` query parameter.
    #[serde(default = "default_health_api_version")]
    pub api_version: String,
}

fn default_base_url() -> String {
    "https://management.azure.com".to_string()
}

fn default_health_api_version() -> String {
    "2017-07-01".to_string()
}

impl Default for ManagementConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_version: default_health_api_version(),
        }
    }
}

impl ManagementConfig {
    /// Availability status listing URL for a subscription.
    pub fn health_url(&self, subscription: &str) -> String {
        format!(
            "{}/subscriptions/{}/providers/Microsoft.ResourceHealth/availabilityStatuses",
            self.base_url.trim_end_matches('/'),
            subscription
        )
    }
}

impl AzureExporterConfig {
    /// Load configuration from a JSON5 file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config: AzureExporterConfig = load_config(path)?;
        config.server.or_port(DEFAULT_PORT);
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a JSON5 string.
    pub fn parse(content: &str) -> Result<Self> {
        let mut config: AzureExporterConfig = parse_config(content)?;
        config.server.or_port(DEFAULT_PORT);
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;

        if self.metadata.token_url.is_empty() {
            return Err(Error::Config("metadata.token_url must not be empty".to_string()));
        }

        if self.management.base_url.is_empty() {
            return Err(Error::Config(
                "management.base_url must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for AzureExporterConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            metadata: MetadataConfig::default(),
            management: ManagementConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
