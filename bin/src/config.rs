//! Runtime configuration for the CLI.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Default report file written by `predict`.
pub(crate) const DEFAULT_REPORT_FILE: &str = "forward-valuations.txt";

/// Settings resolved once at startup.
#[derive(Debug, Clone)]
pub(crate) struct AppConfig {
    /// FMP API key, if set.
    pub(crate) api_key: Option<String>,
    /// Directory holding the ticker list and statement snapshot.
    pub(crate) data_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            data_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// Load from the environment, reading a `.env` file first if present.
    ///
    /// `FMP_API_KEY` is optional here; commands that call the API check
    /// for it with [`AppConfig::require_api_key`]. `VANTAGE_DATA_DIR`
    /// defaults to the working directory.
    pub(crate) fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let api_key = env::var("FMP_API_KEY").ok().filter(|k| !k.trim().is_empty());
        let data_dir = env::var("VANTAGE_DATA_DIR")
            .ok()
            .filter(|d| !d.trim().is_empty())
            .map_or_else(|| PathBuf::from("."), PathBuf::from);

        Self { api_key, data_dir }
    }

    /// The API key, or an error naming the missing variable.
    pub(crate) fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .context("FMP_API_KEY is not set (export it or add it to .env)")
    }
}
