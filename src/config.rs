//! Client configuration.
//!
//! Values come from built-in defaults, an optional TOML file, and then
//! environment variables, in increasing order of priority.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Environment variable selecting the backend origin.
pub const BASE_URL_ENV: &str = "DOCSEARCH_API_BASE_URL";

/// Backend origin used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Largest file accepted by client-side validation (10 MiB).
pub const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Largest upload body the transport will send (1 GiB).
pub const DEFAULT_MAX_BODY_BYTES: u64 = 1024 * 1024 * 1024;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for the docsearch client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend origin, e.g. `http://localhost:8000`.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Timeout for ordinary JSON requests.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Timeout for multipart uploads.
    #[serde(default = "default_upload_timeout_secs")]
    pub upload_timeout_secs: u64,
    /// Ceiling for a whole upload body.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: u64,
    /// Ceiling for a single file, checked before any network transfer.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
    /// Results requested per search page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_upload_timeout_secs() -> u64 {
    30 * 60
}

fn default_max_body_bytes() -> u64 {
    DEFAULT_MAX_BODY_BYTES
}

fn default_max_file_bytes() -> u64 {
    DEFAULT_MAX_FILE_BYTES
}

fn default_page_size() -> u32 {
    10
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            request_timeout_secs: default_request_timeout_secs(),
            upload_timeout_secs: default_upload_timeout_secs(),
            max_body_bytes: default_max_body_bytes(),
            max_file_bytes: default_max_file_bytes(),
            page_size: default_page_size(),
        }
    }
}

impl ClientConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::default().with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML config file, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = toml::from_str(&content)?;
        let config = config.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars:
    /// - `DOCSEARCH_API_BASE_URL`: backend origin
    /// - `DOCSEARCH_REQUEST_TIMEOUT_SECS`: JSON request timeout
    /// - `DOCSEARCH_UPLOAD_TIMEOUT_SECS`: upload timeout
    /// - `DOCSEARCH_MAX_FILE_BYTES`: per-file validation ceiling
    /// - `DOCSEARCH_PAGE_SIZE`: results per search page
    ///
    /// Unparseable numeric values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var(BASE_URL_ENV) {
            if !val.trim().is_empty() {
                self.base_url = Some(val.trim().to_string());
            }
        }
        if let Ok(val) = std::env::var("DOCSEARCH_REQUEST_TIMEOUT_SECS") {
            if let Ok(n) = val.parse() {
                self.request_timeout_secs = n;
            }
        }
        if let Ok(val) = std::env::var("DOCSEARCH_UPLOAD_TIMEOUT_SECS") {
            if let Ok(n) = val.parse() {
                self.upload_timeout_secs = n;
            }
        }
        if let Ok(val) = std::env::var("DOCSEARCH_MAX_FILE_BYTES") {
            if let Ok(n) = val.parse() {
                self.max_file_bytes = n;
            }
        }
        if let Ok(val) = std::env::var("DOCSEARCH_PAGE_SIZE") {
            if let Ok(n) = val.parse() {
                self.page_size = n;
            }
        }
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }

    /// The configured backend origin, or the local default.
    ///
    /// Falling back is not an error, but it is logged every time.
    pub fn resolved_base_url(&self) -> &str {
        match self.base_url.as_deref() {
            Some(url) => url,
            None => {
                warn!(
                    "{} is not set, using default backend {}",
                    BASE_URL_ENV, DEFAULT_BASE_URL
                );
                DEFAULT_BASE_URL
            }
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be > 0".to_string()));
        }
        if self.request_timeout_secs == 0 || self.upload_timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeouts must be > 0".to_string()));
        }
        if self.max_file_bytes > self.max_body_bytes {
            return Err(ConfigError::Invalid(
                "max_file_bytes must not exceed max_body_bytes".to_string(),
            ));
        }
        if let Some(base_url) = &self.base_url {
            let parsed = url::Url::parse(base_url)
                .map_err(|e| ConfigError::Invalid(format!("base_url '{}': {}", base_url, e)))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::Invalid(format!(
                    "base_url must be http or https, got '{}'",
                    parsed.scheme()
                )));
            }
        }
        Ok(())
    }
}
