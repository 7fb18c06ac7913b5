//! Runtime configuration, read from flags or the environment.

use clap::Args;
use reqwest::Url;
use resource_sync::StoreConfig;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/posts";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid API URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Where the posts API lives and how long to wait for it.
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// Collection URL of the posts API
    #[arg(long, env = "POSTS_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Per-request timeout in milliseconds, 0 waits forever
    #[arg(long, env = "POSTS_TIMEOUT_MS", default_value_t = 5000)]
    pub timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_ms: 5000,
        }
    }
}

impl AppConfig {
    /// Parses and checks the collection URL.
    pub fn api_url(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidUrl {
            url: self.api_url.clone(),
            reason,
        };
        let url = Url::parse(&self.api_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", url.scheme())));
        }
        if url.cannot_be_a_base() {
            return Err(invalid("not a base URL".to_string()));
        }
        Ok(url)
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            request_timeout: (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms)),
        }
    }
}
