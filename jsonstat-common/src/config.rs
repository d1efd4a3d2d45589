use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

use crate::error::{Error, Result};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format (default).
    #[default]
    Text,
    /// Structured JSON format.
    Json,
}

/// Common logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format: "text" or "json".
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Listening endpoint of an exporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on. When unset the exporter fills in its own
    /// default port with [`ServerConfig::or_port`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listen: Option<String>,

    /// Path of the metrics endpoint (default: "/metrics").
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

fn all_interfaces(port: u16) -> String {
    format!("0.0.0.0:{}", port)
}

/// Default metrics endpoint path.
pub fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl ServerConfig {
    /// Listen on all interfaces at `port`.
    pub fn on_port(port: u16) -> Self {
        Self {
            listen: Some(all_interfaces(port)),
            path: default_metrics_path(),
        }
    }

    /// Listen on all interfaces at `port` unless an address is configured.
    pub fn or_port(&mut self, port: u16) {
        if self.listen.is_none() {
            self.listen = Some(all_interfaces(port));
        }
    }

    /// Replace the port of the listen address, keeping its host.
    pub fn set_port(&mut self, port: u16) -> Result<()> {
        let mut addr = self.socket_addr()?;
        addr.set_port(port);
        self.listen = Some(addr.to_string());
        Ok(())
    }

    /// Parse the listen address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let listen = self
            .listen
            .as_deref()
            .ok_or_else(|| Error::Config("No listen address configured".to_string()))?;
        listen
            .parse()
            .map_err(|_| Error::Config(format!("Invalid listen address: {}", listen)))
    }

    /// Validate the listen address and metrics path.
    pub fn validate(&self) -> Result<()> {
        self.socket_addr()?;

        if !self.path.starts_with('/') {
            return Err(Error::Config("Metrics path must start with /".to_string()));
        }

        Ok(())
    }
}

/// Load a configuration file in JSON5 format.
pub fn load_config<T: for<'de> Deserialize<'de>>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    json5::from_str(&content).map_err(|e| {
        Error::Config(format!(
            "Failed to parse config file '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Load a configuration from a JSON5 string.
pub fn parse_config<T: for<'de> Deserialize<'de>>(content: &str) -> Result<T> {
    json5::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[derive(Debug, Deserialize)]
    struct TestConfig {
        #[serde(default)]
        logging: LoggingConfig,
    }

    #[test]
    fn test_default_logging() {
        let config: TestConfig = parse_config("{}").unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_json_logging_format() {
        let json5 = r#"
        {
            logging: {
                level: "debug",
                format: "json",
            },
        }
        "#;

        let config: TestConfig = parse_config(json5).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_server_config_set_port() {
        let mut server = ServerConfig::on_port(9420);
        assert_eq!(server.listen.as_deref(), Some("0.0.0.0:9420"));
        assert_eq!(server.path, "/metrics");

        server.set_port(10000).unwrap();
        assert_eq!(server.listen.as_deref(), Some("0.0.0.0:10000"));
    }

    #[test]
    fn test_server_config_validate() {
        let mut server = ServerConfig::on_port(9420);
        assert!(server.validate().is_ok());

        server.path = "metrics".to_string();
        assert!(server.validate().unwrap_err().to_string().contains("must start with /"));

        server.path = "/metrics".to_string();
        server.listen = Some("not-an-address".to_string());
        assert!(server.validate().unwrap_err().to_string().contains("Invalid listen address"));

        server.listen = None;
        assert!(server.validate().unwrap_err().to_string().contains("No listen address"));
    }

    #[test]
    fn test_server_config_without_listen() {
        #[derive(Debug, Deserialize)]
        struct WithServer {
            server: ServerConfig,
        }

        let mut config: WithServer = parse_config(r#"{ server: { path: "/x" } }"#).unwrap();
        assert_eq!(config.server.listen, None);
        assert_eq!(config.server.path, "/x");

        config.server.or_port(9420);
        assert_eq!(config.server.listen.as_deref(), Some("0.0.0.0:9420"));

        config.server.or_port(10500);
        assert_eq!(config.server.listen.as_deref(), Some("0.0.0.0:9420"));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{ logging: {{ level: 'warn' }} }}").unwrap();

        let config: TestConfig = load_config(file.path()).unwrap();
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_config_missing_file() {
        let result: Result<TestConfig> = load_config("/nonexistent/jsonstat.json5");
        assert!(result.unwrap_err().to_string().contains("Failed to read config file"));
    }
}
