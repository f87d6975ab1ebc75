//! FMP API client implementation.

use crate::{
    Result,
    error::FmpError,
    types::{IncomeStatement, MarketCapitalization, Period, into_history},
};
use reqwest::Client;
use std::env;
use vantage_traits::{MarketCapTable, StatementBook, StatementHistory};

/// Base URL for the FMP stable API.
const FMP_BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Maximum number of quarters requested per ticker.
pub const QUARTERLY_LIMIT: u32 = 400;

/// Financial Modeling Prep API client.
#[derive(Debug, Clone)]
pub struct FmpClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl FmpClient {
    /// Create a new FMP client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: FMP_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different API root (e.g. a proxy or mirror).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Create a new FMP client from the `FMP_API_KEY` environment variable.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_key = env::var("FMP_API_KEY").map_err(|_| FmpError::MissingApiKey)?;

        Ok(Self::new(api_key))
    }

    /// Build a URL with the API key.
    fn url(&self, endpoint: &str) -> String {
        if endpoint.contains('?') {
            format!("{}/{endpoint}&apikey={}", self.base_url, self.api_key)
        } else {
            format!("{}/{endpoint}?apikey={}", self.base_url, self.api_key)
        }
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.url(endpoint);
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FmpError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(FmpError::Api(format!("HTTP {status}: {text}")));
        }

        let text = response.text().await?;

        // Check for error responses
        if text.contains("\"Error Message\"") || text.contains("\"error\"") {
            return Err(FmpError::Api(text));
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Get income statements for a symbol, most recent first.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Stock ticker symbol (e.g., "NET")
    /// * `period` - Annual or quarterly
    /// * `limit` - Number of periods to return
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn income_statement(
        &self,
        symbol: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<IncomeStatement>> {
        let limit_param = limit.map(|l| format!("&limit={l}")).unwrap_or_default();
        let endpoint = format!(
            "income-statement?symbol={}&period={}{}",
            symbol.to_uppercase(),
            period.as_str(),
            limit_param
        );
        self.get(&endpoint).await
    }

    /// Get a symbol's quarterly statement history, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn quarterly_history(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<StatementHistory> {
        let statements = self
            .income_statement(symbol, Period::Quarter, limit)
            .await?;
        Ok(into_history(statements))
    }

    /// Get quarterly histories for several symbols.
    ///
    /// A symbol whose request fails is stored with an empty history and a
    /// warning is logged; the remaining symbols are still fetched.
    pub async fn quarterly_histories(
        &self,
        symbols: &[String],
        limit: Option<u32>,
    ) -> StatementBook {
        let mut book = StatementBook::new();

        for symbol in symbols {
            let history = match self.quarterly_history(symbol, limit).await {
                Ok(history) => {
                    tracing::debug!(
                        symbol = %symbol,
                        quarters = history.len(),
                        "fetched income statements"
                    );
                    history
                }
                Err(e) => {
                    tracing::warn!(
                        symbol = %symbol,
                        error = %e,
                        "failed to fetch income statements"
                    );
                    StatementHistory::default()
                }
            };
            book.insert(symbol.clone(), history);
        }

        book
    }

    /// Get the current market capitalization for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns no rows.
    pub async fn market_cap(&self, symbol: &str) -> Result<f64> {
        let endpoint = format!("market-capitalization?symbol={}", symbol.to_uppercase());
        let caps: Vec<MarketCapitalization> = self.get(&endpoint).await?;
        caps.into_iter()
            .next()
            .map(|c| c.market_cap)
            .ok_or_else(|| FmpError::NoData(symbol.to_string()))
    }

    /// Resolve market caps for several symbols into a table.
    ///
    /// Failed lookups are recorded in the table rather than returned.
    pub async fn market_caps(&self, symbols: &[String]) -> MarketCapTable {
        let mut table = MarketCapTable::new();

        for symbol in symbols {
            match self.market_cap(symbol).await {
                Ok(cap) => table.insert(symbol.clone(), cap),
                Err(e) => {
                    tracing::warn!(symbol = %symbol, error = %e, "failed to fetch market cap");
                    table.record_failure(symbol.clone(), e.to_string());
                }
            }
        }

        table
    }
}
