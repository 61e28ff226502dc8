use crate::error::{Result, RsketchError};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ENDPOINT_FILE: &str = "endpoint.json";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

/// Process settings resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub endpoint_file: PathBuf,
    pub request_timeout_secs: u64,
    pub probe_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            endpoint_file: PathBuf::from(DEFAULT_ENDPOINT_FILE),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let endpoint_file = env::var("RSKETCH_ENDPOINT_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ENDPOINT_FILE));
        let request_timeout_secs = env::var("RSKETCH_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        let probe_timeout_secs = env::var("RSKETCH_PROBE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PROBE_TIMEOUT_SECS);

        AppConfig {
            endpoint_file,
            request_timeout_secs,
            probe_timeout_secs,
        }
    }

    pub fn with_endpoint_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.endpoint_file = path.into();
        self
    }

    pub fn with_request_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    pub fn with_probe_timeout(mut self, secs: u64) -> Self {
        self.probe_timeout_secs = secs;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

/// The persisted endpoint record. Read once and handed to whatever needs
/// to reach the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub base_url: String,
}

impl EndpointConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn route(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    pub fn generate_url(&self) -> String {
        self.route("generate")
    }

    pub fn test_url(&self) -> String {
        self.route("test")
    }

    pub fn parameters_url(&self) -> String {
        self.route("parameters")
    }

    pub fn tunnel_url_endpoint(&self) -> String {
        self.route("ngrok-url")
    }

    pub fn ensure_present(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(RsketchError::ConfigError("Endpoint base URL is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_builders() {
        let config = AppConfig::new()
            .with_endpoint_file("/tmp/ep.json")
            .with_request_timeout(30)
            .with_probe_timeout(2);
        assert_eq!(config.endpoint_file, PathBuf::from("/tmp/ep.json"));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.probe_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_app_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.endpoint_file, PathBuf::from("endpoint.json"));
        assert_eq!(config.request_timeout_secs, 600);
        assert_eq!(config.probe_timeout_secs, 10);
    }

    #[test]
    fn test_endpoint_routes() {
        let endpoint = EndpointConfig::new("https://abc123.example.com/");
        assert_eq!(endpoint.generate_url(), "https://abc123.example.com/generate");
        assert_eq!(endpoint.test_url(), "https://abc123.example.com/test");
        assert_eq!(endpoint.parameters_url(), "https://abc123.example.com/parameters");
        assert_eq!(endpoint.tunnel_url_endpoint(), "https://abc123.example.com/ngrok-url");
    }

    #[test]
    fn test_endpoint_ensure_present() {
        assert!(EndpointConfig::new("  ").ensure_present().is_err());
        assert!(EndpointConfig::new("http://localhost:8000").ensure_present().is_ok());
    }
}
