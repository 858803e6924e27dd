//! Application configuration
//!
//! Loaded from YAML with full serde defaults; every section can be
//! omitted. The fetcher itself stays caller-configured; this module is
//! the application-level assembly point that feeds it.

use crate::catalog::CatalogConfig;
use crate::error::{Error, Result};
use crate::http::RateLimiterConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Catalog service access
    #[serde(default)]
    pub catalog: CatalogSection,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSection,

    /// Session token settings
    #[serde(default)]
    pub session: SessionSection,

    /// Store settings
    #[serde(default)]
    pub store: StoreSection,
}

/// Catalog service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSection {
    /// Catalog API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Cover image base URL
    #[serde(default = "default_covers_base_url")]
    pub covers_base_url: String,

    /// Total fetch attempts per request
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Base delay between attempts in milliseconds
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Per-attempt timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Optional courtesy rate limit (requests per second)
    #[serde(default)]
    pub rate_limit_rps: Option<u32>,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            covers_base_url: default_covers_base_url(),
            retries: default_retries(),
            base_delay_ms: default_base_delay_ms(),
            timeout_ms: default_timeout_ms(),
            rate_limit_rps: None,
        }
    }
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

/// Session token settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSection {
    /// Signing secret; required when serving
    #[serde(default)]
    pub secret: String,

    /// Token lifetime in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            secret: String::new(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

/// Store settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSection {
    /// Path to the JSON store file; absent = in-memory
    #[serde(default)]
    pub path: Option<String>,
}

fn default_base_url() -> String {
    "https://openlibrary.org".to_string()
}

fn default_covers_base_url() -> String {
    "https://covers.openlibrary.org".to_string()
}

fn default_retries() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    1000
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_port() -> u16 {
    8080
}

fn default_ttl_secs() -> u64 {
    // 30 days
    2_592_000
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(contents: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(contents)?;
        Ok(config)
    }

    /// Build the catalog client configuration from this config
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            base_url: self.catalog.base_url.clone(),
            covers_base_url: self.catalog.covers_base_url.clone(),
            retries: self.catalog.retries,
            base_delay: Duration::from_millis(self.catalog.base_delay_ms),
            timeout: Duration::from_millis(self.catalog.timeout_ms),
            rate_limit: self
                .catalog
                .rate_limit_rps
                .map(|rps| RateLimiterConfig::new(rps, rps)),
        }
    }

    /// Validate the parts required for serving
    pub fn validate_for_serve(&self) -> Result<()> {
        url::Url::parse(&self.catalog.base_url)?;
        if self.session.secret.trim().is_empty() {
            return Err(Error::config(
                "session.secret must be set to serve the API",
            ));
        }
        Ok(())
    }
}
