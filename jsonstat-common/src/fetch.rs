//! Outbound JSON fetching.
//!
//! Every call is a single blocking-style `GET` that is awaited to completion
//! before the next one starts; there are no retries and no timeouts beyond
//! the HTTP client's defaults. Failures are only logged at `debug`; callers
//! decide how to report them.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::error::{Error, Result};

/// Response code reported when no connection could be made.
pub const TRANSPORT_FAILURE_CODE: &str = "404";

/// Response message reported when no connection could be made.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Failed to establish a new connection";

/// Errors from a single fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The connection could not be established or the body not read.
    #[error("Failed to get data from {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("Response Status ({status}) from {url}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    /// The body was not valid JSON.
    #[error("Invalid JSON payload from {url}: {source}")]
    Parse {
        url: String,
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// The URL the failed request targeted.
    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::Parse { url, .. } => url,
        }
    }

    /// Diagnostic code/message pair describing the failure.
    pub fn response_status(&self) -> ResponseStatus {
        match self {
            FetchError::Transport { .. } => ResponseStatus {
                code: TRANSPORT_FAILURE_CODE.to_string(),
                message: TRANSPORT_FAILURE_MESSAGE.to_string(),
            },
            FetchError::Status { status, .. } | FetchError::Parse { status, .. } => {
                ResponseStatus::from_status(*status)
            }
        }
    }
}

/// The code and reason phrase of the last HTTP exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseStatus {
    pub code: String,
    pub message: String,
}

impl ResponseStatus {
    pub fn from_status(status: StatusCode) -> Self {
        Self {
            code: status.as_u16().to_string(),
            message: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }
}

/// Basic-auth credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A `GET` request description.
#[derive(Debug, Clone, Default)]
pub struct FetchRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub bearer_token: Option<String>,
    pub basic_auth: Option<Credentials>,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn basic_auth(mut self, credentials: Option<Credentials>) -> Self {
        self.basic_auth = credentials;
        self
    }
}

/// A successfully fetched and parsed JSON response.
#[derive(Debug, Clone)]
pub struct JsonResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl JsonResponse {
    pub fn response_status(&self) -> ResponseStatus {
        ResponseStatus::from_status(self.status)
    }

    /// Reject anything but `200 OK`.
    pub fn require_ok(self, url: &str) -> std::result::Result<Self, FetchError> {
        if self.status == StatusCode::OK {
            return Ok(self);
        }
        debug!(url = %url, status = self.status.as_u16(), "Expected 200 OK");
        Err(FetchError::Status {
            url: url.to_string(),
            status: self.status,
            body: String::new(),
        })
    }
}

/// HTTP client returning parsed JSON payloads.
#[derive(Debug, Clone)]
pub struct JsonClient {
    client: reqwest::Client,
}

impl JsonClient {
    /// Build a client with the given user agent.
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Issue a `GET` and parse the body as JSON.
    ///
    /// Any 2xx status counts as success.
    pub async fn get(&self, request: FetchRequest) -> std::result::Result<JsonResponse, FetchError> {
        let url = request.url;
        debug!(url = %url, "Hitting api");

        let mut builder = self.client.get(&url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some(token) = &request.bearer_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(credentials) = &request.basic_auth {
            builder = builder.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let response = match builder.send().await {
            Ok(r) => r,
            Err(source) => {
                debug!(url = %url, error = %source, "Failed to get data");
                return Err(FetchError::Transport { url, source });
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(t) => t,
            Err(source) => {
                debug!(url = %url, error = %source, "Failed to read response body");
                return Err(FetchError::Transport { url, source });
            }
        };

        if !status.is_success() {
            debug!(url = %url, status = status.as_u16(), "Failed to get data");
            return Err(FetchError::Status {
                url,
                status,
                body: text,
            });
        }

        match serde_json::from_str(&text) {
            Ok(body) => Ok(JsonResponse { status, body }),
            Err(source) => {
                debug!(url = %url, error = %source, "Response is not valid JSON");
                Err(FetchError::Parse {
                    url,
                    status,
                    source,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_status_from_status() {
        let status = ResponseStatus::from_status(StatusCode::OK);
        assert_eq!(status.code, "200");
        assert_eq!(status.message, "OK");

        let status = ResponseStatus::from_status(StatusCode::UNAUTHORIZED);
        assert_eq!(status.code, "401");
        assert_eq!(status.message, "Unauthorized");
    }

    #[test]
    fn test_status_error_reports_actual_code() {
        let err = FetchError::Status {
            url: "http://x/".to_string(),
            status: StatusCode::FORBIDDEN,
            body: "denied".to_string(),
        };
        assert_eq!(err.url(), "http://x/");
        assert_eq!(
            err.response_status(),
            ResponseStatus {
                code: "403".to_string(),
                message: "Forbidden".to_string()
            }
        );
        assert!(err.to_string().contains("403"));
    }

    #[test]
    fn test_parse_error_reports_response_code() {
        let source = serde_json::from_str::<Value>("not json").unwrap_err();
        let err = FetchError::Parse {
            url: "http://x/".to_string(),
            status: StatusCode::OK,
            source,
        };
        assert_eq!(err.response_status().code, "200");
    }

    #[test]
    fn test_require_ok() {
        let ok = JsonResponse {
            status: StatusCode::OK,
            body: Value::Null,
        };
        assert!(ok.require_ok("http://x/").is_ok());

        let accepted = JsonResponse {
            status: StatusCode::ACCEPTED,
            body: Value::Null,
        };
        let err = accepted.require_ok("http://x/").unwrap_err();
        assert_eq!(err.response_status().code, "202");
    }

    #[test]
    fn test_request_builder() {
        let request = FetchRequest::new("http://localhost/token")
            .query("api-version", "2018-02-01")
            .header("Metadata", "true")
            .bearer("abc")
            .basic_auth(Some(Credentials::new("user", "pass")));

        assert_eq!(request.query, vec![("api-version".to_string(), "2018-02-01".to_string())]);
        assert_eq!(request.headers, vec![("Metadata".to_string(), "true".to_string())]);
        assert_eq!(request.bearer_token.as_deref(), Some("abc"));
        assert_eq!(request.basic_auth.as_ref().map(|c| c.username.as_str()), Some("user"));
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("admin", "secret");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("admin"));
        assert!(!debug.contains("secret"));
    }
}
