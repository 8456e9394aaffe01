//! Client configuration
//!
//! Values come from an optional TOML file and the process environment, with
//! the environment taking precedence. The resulting [`ApiConfig`] is passed
//! explicitly to [`crate::HttpApi::new`]; nothing here is global.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const API_BASE_URL_ENV: &str = "DOCWISE_API_BASE_URL";
pub const CHAT_API_BASE_URL_ENV: &str = "DOCWISE_CHAT_API_BASE_URL";
pub const REQUEST_TIMEOUT_ENV: &str = "DOCWISE_REQUEST_TIMEOUT_SECS";
pub const MAX_UPLOAD_BYTES_ENV: &str = "DOCWISE_MAX_UPLOAD_BYTES";

/// Default cap on an uploaded document (50 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the proposals/documents API
    #[serde(default)]
    pub api_base_url: Option<String>,
    /// Base URL of the chat API
    #[serde(default)]
    pub chat_api_base_url: Option<String>,
    /// Per-request timeout; unset means no timeout
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Delay before re-fetching after a mutation the backend processes
    /// asynchronously (default: 3000)
    #[serde(default = "default_refresh_delay_ms")]
    pub refresh_delay_ms: u64,
    /// Delay before re-fetching page HTML after triggering extraction
    /// (default: 5000)
    #[serde(default = "default_extraction_refresh_delay_ms")]
    pub extraction_refresh_delay_ms: u64,
    /// Largest request body accepted for a document upload
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_refresh_delay_ms() -> u64 {
    3000
}

fn default_extraction_refresh_delay_ms() -> u64 {
    5000
}

fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            chat_api_base_url: None,
            request_timeout_secs: None,
            refresh_delay_ms: default_refresh_delay_ms(),
            extraction_refresh_delay_ms: default_extraction_refresh_delay_ms(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl ApiConfig {
    /// Configuration pointing both APIs at explicit URLs
    pub fn new(api_base_url: impl Into<String>, chat_api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: Some(api_base_url.into()),
            chat_api_base_url: Some(chat_api_base_url.into()),
            ..Self::default()
        }
    }

    /// Load configuration from the process environment only
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is malformed
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML configuration")
    }

    /// Apply environment-style overrides on top of this configuration
    ///
    /// `lookup` returns the value of a variable if it is set. Blank values
    /// are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = lookup(API_BASE_URL_ENV) {
            self.api_base_url = Some(url);
        }
        if let Some(url) = lookup(CHAT_API_BASE_URL_ENV) {
            self.chat_api_base_url = Some(url);
        }
        if let Some(secs) = lookup(REQUEST_TIMEOUT_ENV).and_then(|v| v.trim().parse().ok()) {
            self.request_timeout_secs = Some(secs);
        }
        if let Some(bytes) = lookup(MAX_UPLOAD_BYTES_ENV).and_then(|v| v.trim().parse().ok()) {
            self.max_upload_bytes = bytes;
        }
        self
    }

    /// Names of required settings that are missing
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.api_base_url) {
            missing.push(API_BASE_URL_ENV);
        }
        if is_blank(&self.chat_api_base_url) {
            missing.push(CHAT_API_BASE_URL_ENV);
        }
        missing
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }

    pub fn extraction_refresh_delay(&self) -> Duration {
        Duration::from_millis(self.extraction_refresh_delay_ms)
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn defaults_have_no_urls() {
        let config = ApiConfig::default();
        assert_eq!(config.missing(), vec![API_BASE_URL_ENV, CHAT_API_BASE_URL_ENV]);
        assert_eq!(config.refresh_delay(), Duration::from_secs(3));
        assert_eq!(config.extraction_refresh_delay(), Duration::from_secs(5));
        assert!(config.request_timeout().is_none());
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[test]
    fn overrides_replace_file_values() {
        let config = ApiConfig::from_toml(
            r#"
            api_base_url = "http://file:8000"
            chat_api_base_url = "http://file:8001"
            request_timeout_secs = 10
            "#,
        )
        .unwrap();

        let env: HashMap<&str, &str> = [
            (API_BASE_URL_ENV, "http://env:9000"),
            (CHAT_API_BASE_URL_ENV, "   "),
            (REQUEST_TIMEOUT_ENV, "30"),
            (MAX_UPLOAD_BYTES_ENV, "1048576"),
        ]
        .into_iter()
        .collect();

        let config = config.with_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.api_base_url.as_deref(), Some("http://env:9000"));
        // Blank env values do not clobber the file
        assert_eq!(config.chat_api_base_url.as_deref(), Some("http://file:8001"));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.max_upload_bytes, 1024 * 1024);
        assert!(config.missing().is_empty());
    }

    #[test]
    fn from_file_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_base_url = \"http://localhost:8000\"").unwrap();
        writeln!(file, "refresh_delay_ms = 50").unwrap();
        writeln!(file, "max_upload_bytes = 2048").unwrap();

        let config = ApiConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api_base_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(config.refresh_delay(), Duration::from_millis(50));
        assert_eq!(config.max_upload_bytes, 2048);
        assert_eq!(config.missing(), vec![CHAT_API_BASE_URL_ENV]);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(ApiConfig::from_toml("api_base_url = ").is_err());
    }
}
