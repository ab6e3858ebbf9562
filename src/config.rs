use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

/// Connection settings for the remote listing store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub url: String,
    pub api_key: String,
    pub table: String,
    pub timeout_secs: u64,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` runs against the in-memory demo plots
    pub store: Option<StoreConfig>,
    pub export_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let store = match lookup("PLOT_STORE_URL").filter(|url| !url.trim().is_empty()) {
            Some(url) => Some(StoreConfig {
                url,
                api_key: lookup("PLOT_STORE_API_KEY")
                    .context("PLOT_STORE_API_KEY must be set when PLOT_STORE_URL is set")?,
                table: lookup("PLOT_LISTINGS_TABLE").unwrap_or_else(|| "plots".to_string()),
                timeout_secs: lookup("PLOT_REQUEST_TIMEOUT_SECS")
                    .unwrap_or_else(|| "30".to_string())
                    .parse()
                    .context("PLOT_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            }),
            None => None,
        };

        Ok(Self {
            store,
            export_path: lookup("PLOT_EXPORT_PATH")
                .unwrap_or_else(|| "listings.json".to_string())
                .into(),
        })
    }
}
