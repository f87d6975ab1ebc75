//! Financial Modeling Prep (FMP) API client for vantage.
//!
//! This crate fetches the two inputs of a valuation run from the
//! [Financial Modeling Prep](https://financialmodelingprep.com/) API:
//! quarterly income statements, converted into oldest-first
//! [`StatementHistory`](vantage_traits::StatementHistory) values, and
//! current market capitalization.
//!
//! # Usage
//!
//! ```rust,ignore
//! use vantage_fmp::FmpClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FmpClient::from_env()?;
//!
//!     // Up to 400 quarters, oldest first
//!     let history = client.quarterly_history("NET", Some(400)).await?;
//!
//!     // Current market capitalization
//!     let cap = client.market_cap("NET").await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `FMP_API_KEY` in your environment or `.env` file:
//!
//! ```bash
//! FMP_API_KEY=your_api_key_here
//! ```

mod client;
mod error;
mod types;

pub use client::{FmpClient, QUARTERLY_LIMIT};
pub use error::FmpError;
pub use types::*;

/// Result type for FMP operations.
pub type Result<T> = std::result::Result<T, FmpError>;
