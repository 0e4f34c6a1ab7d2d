use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::MAX_LIMIT;

/// ClientConfig configures a SearchClient.
///
/// Only `url` and `access_token` are required; `timeout_ms` and `max_limit`
/// default to the values the public search service expects.
#[derive(Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    pub url: String,
    pub access_token: String,

    /// Upper bound on a whole round trip, including the body read
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Page size the server will not exceed
    #[serde(default = "default_max_limit")]
    pub max_limit: i64,
}

// Hand-written so the token never ends up in logs
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("url", &self.url)
            .field("access_token", &"<redacted>")
            .field("timeout_ms", &self.timeout_ms)
            .field("max_limit", &self.max_limit)
            .finish()
    }
}

fn default_timeout_ms() -> u64 {
    1000
}

fn default_max_limit() -> i64 {
    MAX_LIMIT
}

impl ClientConfig {
    pub fn new(url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: access_token.into(),
            timeout_ms: default_timeout_ms(),
            max_limit: default_max_limit(),
        }
    }

    pub fn load(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read client config {}", path))?;
        let config: ClientConfig = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse client config {}", path))?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// ServerConfig configures the reference search server
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: String,

    /// Token a caller must present to get real results
    #[serde(default = "default_access_token")]
    pub access_token: String,

    /// JSON file holding an array of users
    #[serde(default = "default_dataset_path")]
    pub dataset_path: String,

    #[serde(default = "default_max_limit")]
    pub max_limit: i64,

    /// Directory for rotated JSON logs; empty logs to the console only
    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    /// Tracing filter used when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_port() -> String {
    "8080".to_string()
}

fn default_access_token() -> String {
    "Test".to_string()
}

fn default_dataset_path() -> String {
    "./data/users.json".to_string()
}

fn default_log_dir() -> String {
    "./logs".to_string()
}

fn default_log_filter() -> String {
    "usersearch_server=debug,usersearch_core=debug,actix_web=info".to_string()
}

impl ServerConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read server config {}", path))?;
        let config: ServerConfig = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse server config {}", path))?;
        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            access_token: default_access_token(),
            dataset_path: default_dataset_path(),
            max_limit: default_max_limit(),
            log_dir: default_log_dir(),
            log_filter: default_log_filter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_client_config_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"url":"http://localhost:8080","access_token":"Test"}"#)
                .unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(1));
        assert_eq!(config.max_limit, 25);
    }

    #[test]
    fn test_client_config_debug_redacts_token() {
        let config = ClientConfig::new("http://localhost:8080", "super-secret");
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_client_config_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let body = serde_json::json!({
            "url": "http://search.local",
            "access_token": "abc",
            "timeout_ms": 250,
            "max_limit": 10
        });
        write!(file, "{}", body).unwrap();

        let config = ClientConfig::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.url, "http://search.local");
        assert_eq!(config.timeout(), Duration::from_millis(250));
        assert_eq!(config.max_limit, 10);
    }

    #[test]
    fn test_client_config_load_missing_file() {
        let err = ClientConfig::load("/nonexistent/usersearch.json").unwrap_err();
        assert!(err.to_string().contains("failed to read client config"));
    }

    #[test]
    fn test_server_config_partial_json() {
        let config: ServerConfig = serde_json::from_str(r#"{"port":"9090"}"#).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:9090");
        assert_eq!(config.access_token, "Test");
        assert_eq!(config.max_limit, 25);
        assert!(config.log_filter.contains("usersearch_server=debug"));
    }
}
