//! Configuration for the pricing client

use std::env;

use common::error::{Error, Result};
use url::Url;

/// Default backend address
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Default request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Configuration for the pricing client
#[derive(Debug, Clone)]
pub struct PricingClientConfig {
    /// Base URL of the sales backend
    pub base_url: Url,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl PricingClientConfig {
    /// Create a new configuration with custom values
    pub fn new(base_url: Url, timeout_ms: u64) -> Self {
        Self {
            base_url,
            timeout_ms,
        }
    }

    /// Create a new configuration using environment variables
    ///
    /// - `PRICING_API_URL` (default: `http://127.0.0.1:8080`)
    /// - `PRICING_API_TIMEOUT_MS` (default: 5000)
    pub fn from_env() -> Result<Self> {
        let raw_url = env::var("PRICING_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let base_url = Url::parse(&raw_url)
            .map_err(|e| Error::ConfigurationError(format!("Invalid PRICING_API_URL {}: {}", raw_url, e)))?;

        let timeout_ms = env::var("PRICING_API_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        Ok(Self::new(base_url, timeout_ms))
    }

    /// Absolute URL of an API path such as `api/v1/iva`
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
