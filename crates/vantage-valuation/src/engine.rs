//! Valuation engine.
//!
//! Runs the forecaster over every metric of every ticker, derives forward
//! multiples from the revenue and net income forecasts, and ranks the
//! results.

use crate::config::ValuationConfig;
use crate::multiple::forward_multiples;
use crate::ranking::rank;
use crate::report::RankedReport;
use crate::result::ValuationResult;
use std::collections::BTreeMap;
use vantage_traits::{
    MarketCapLookup, MarketCapSource, Metric, Result, StatementBook, StatementHistory, Symbol,
};
use vantage_trend::{Forecaster, TrendForecaster};

/// Produces valuation results and ranked reports.
///
/// The engine holds no per-run state; every ticker is valued from its own
/// history and market cap only.
#[derive(Debug, Clone)]
pub struct ValuationEngine<F = TrendForecaster> {
    config: ValuationConfig,
    forecaster: F,
}

impl ValuationEngine {
    /// Create an engine using the trend forecaster over `config.horizon` quarters.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: ValuationConfig) -> Result<Self> {
        let forecaster = TrendForecaster::new(config.horizon);
        Self::with_forecaster(config, forecaster)
    }
}

impl<F: Forecaster> ValuationEngine<F> {
    /// Create an engine with a custom forecaster.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_forecaster(config: ValuationConfig, forecaster: F) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, forecaster })
    }

    /// The engine configuration.
    #[must_use]
    pub const fn config(&self) -> &ValuationConfig {
        &self.config
    }

    /// Value one ticker.
    pub fn value_ticker<S>(
        &self,
        ticker: &str,
        history: &StatementHistory,
        source: &S,
    ) -> ValuationResult
    where
        S: MarketCapSource + ?Sized,
    {
        let forecasts: BTreeMap<Metric, _> = Metric::ALL
            .into_iter()
            .map(|metric| (metric, self.forecaster.forecast_metric(history, metric)))
            .collect();

        let market_cap = source.market_cap(ticker);
        if let MarketCapLookup::Unavailable(reason) = &market_cap {
            tracing::debug!(ticker, %reason, "market cap unavailable");
        }

        let net_income = forecasts
            .get(&Metric::NetIncome)
            .map(|f| f.values())
            .unwrap_or_default();
        let revenue = forecasts
            .get(&Metric::Revenue)
            .map(|f| f.values())
            .unwrap_or_default();

        let factor = self.config.annualization_factor;
        let policy = self.config.division;
        let price_to_earnings = forward_multiples(&market_cap, &net_income, factor, policy);
        let price_to_revenue = forward_multiples(&market_cap, &revenue, factor, policy);

        tracing::debug!(
            ticker,
            quarters = history.len(),
            pe = price_to_earnings.len(),
            pr = price_to_revenue.len(),
            "valued ticker"
        );

        ValuationResult::new(
            ticker.to_string(),
            market_cap,
            price_to_earnings,
            price_to_revenue,
            forecasts,
        )
    }

    /// Value every ticker in `histories`, keyed by ticker.
    pub fn value_all<S>(
        &self,
        histories: &StatementBook,
        source: &S,
    ) -> BTreeMap<Symbol, ValuationResult>
    where
        S: MarketCapSource + ?Sized,
    {
        histories
            .iter()
            .map(|(ticker, history)| (ticker.clone(), self.value_ticker(ticker, history, source)))
            .collect()
    }

    /// Value every ticker and rank the results.
    pub fn run<S>(&self, histories: &StatementBook, source: &S) -> RankedReport
    where
        S: MarketCapSource + ?Sized,
    {
        let results = self.value_all(histories, source);
        let report = rank(results);
        tracing::info!(
            tickers = report.len(),
            unavailable = report
                .entries()
                .iter()
                .filter(|e| !e.result.is_valuation_available())
                .count(),
            "valuation run complete"
        );
        report
    }
}
