//! Application configuration

use std::env;
use std::path::PathBuf;

/// Application configuration
pub struct AppConfig {
    /// API port
    pub port: u16,
    /// JSON file with the IVA and withholding reference lists
    pub tax_rates_file: Option<PathBuf>,
}

impl AppConfig {
    /// Create a new configuration from environment variables
    pub fn new() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            tax_rates_file: env::var("TAX_RATES_FILE").ok().map(PathBuf::from),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}
