#![doc(issue_tracker_base_url = "https://github.com/factordynamics/vantage/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # vantage
//!
//! Forward valuation of equities from trend-extrapolated fundamentals.
//!
//! vantage is an umbrella crate that re-exports all vantage sub-crates for
//! convenience. It fits a linear trend to each tracked quarterly metric,
//! projects it five quarters ahead, and turns the revenue and net income
//! projections into forward price/revenue and price/earnings multiples.
//!
//! ## Quick Start
//!
//! ```ignore
//! use vantage::{ValuationConfig, ValuationEngine};
//! use vantage::fmp::{FmpClient, QUARTERLY_LIMIT};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = FmpClient::from_env()?;
//! let tickers = vec!["NET".to_string(), "DDOG".to_string()];
//!
//! let histories = client.quarterly_histories(&tickers, Some(QUARTERLY_LIMIT)).await;
//! let market_caps = client.market_caps(&tickers).await;
//!
//! let engine = ValuationEngine::new(ValuationConfig::default())?;
//! let report = engine.run(&histories, &market_caps);
//! print!("{}", report.render_text());
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Statement types, metrics and the market cap seam
//! - [`trend`] - Least-squares trend forecasting
//! - [`valuation`] - Forward multiples, ranking and rendering
//! - [`fmp`] - Financial Modeling Prep data client
//!
//! ## Architecture
//!
//! 1. **Histories** are fetched per ticker, oldest quarter first
//! 2. **Forecasters** project each metric series forward
//! 3. **The engine** divides market cap by annualized forecasts
//! 4. **Reports** rank tickers by their furthest price/revenue multiple

/// Version information for the vantage crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Core types for vantage.
///
/// - [`QuarterlyStatement`] - One quarter of income-statement metrics
/// - [`StatementHistory`] - A ticker's quarters, oldest first
/// - [`Metric`] - Selector for a single numeric series
/// - [`MarketCapSource`] - Market capitalization lookup
pub mod traits {
    pub use vantage_traits::*;
}

pub use vantage_traits::{
    MarketCapLookup, MarketCapSource, MarketCapTable, Metric, QuarterlyStatement, Result,
    StatementBook, StatementHistory, Symbol, VantageError,
};

// ============================================================================
// Forecasting
// ============================================================================

/// Trend forecasting.
///
/// The default [`TrendForecaster`] fits `value = a + b * t` over the quarter
/// index and evaluates it at the five quarters after the last observation.
///
/// ```text
/// t = n, n + 1, ..., n + 4
/// ```
pub mod trend {
    pub use vantage_trend::*;
}

pub use vantage_trend::{Forecast, Forecaster, TrendForecaster};

// ============================================================================
// Valuation
// ============================================================================

/// Forward valuation.
///
/// ```text
/// P/E_k = market_cap / (net_income_k * 4)
/// P/R_k = market_cap / (revenue_k * 4)
/// ```
///
/// Tickers are ranked by their last forward P/R, highest first.
pub mod valuation {
    pub use vantage_valuation::*;
}

pub use vantage_valuation::{
    DivisionPolicy, Multiple, RankedReport, ReportFormat, ValuationConfig, ValuationEngine,
    ValuationResult,
};

// ============================================================================
// Data Providers
// ============================================================================

/// Financial Modeling Prep (FMP) API client.
///
/// Set the `FMP_API_KEY` environment variable or add it to a `.env` file.
pub mod fmp {
    pub use vantage_fmp::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use vantage::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Forecaster, MarketCapSource, Metric, RankedReport, Result, StatementBook,
        StatementHistory, TrendForecaster, ValuationConfig, ValuationEngine, VantageError,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_re_exports() {
        fn _accept_source(_source: &dyn MarketCapSource) {}
        fn _accept_forecaster(_forecaster: &dyn Forecaster) {}
    }

    #[test]
    fn test_end_to_end_through_umbrella() {
        let history: StatementHistory = (0..4)
            .map(|i| QuarterlyStatement {
                revenue: 100.0 + 10.0 * f64::from(i),
                net_income: 10.0,
                ..Default::default()
            })
            .collect();
        let mut book = StatementBook::new();
        book.insert("NET".to_string(), history);
        let mut caps: BTreeMap<Symbol, f64> = BTreeMap::new();
        caps.insert("NET".to_string(), 1000.0);

        let report = ValuationEngine::new(ValuationConfig::default())
            .unwrap()
            .run(&book, &caps);
        assert_eq!(report.tickers(), vec!["NET"]);
        // Revenue forecast at t = 8 is 180.
        let last = report.get("NET").unwrap().last_price_to_revenue().unwrap();
        assert!((last.value().unwrap() - 1000.0 / 720.0).abs() < 1e-9);
    }
}
