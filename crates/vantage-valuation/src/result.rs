//! Per-ticker valuation results.

use crate::multiple::Multiple;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use vantage_traits::{MarketCapLookup, Metric, Symbol};
use vantage_trend::Forecast;

/// Forward multiples and metric forecasts for one ticker.
///
/// Built in one step by the engine once all seven forecasts and both
/// multiple sequences exist, and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    ticker: Symbol,
    market_cap: MarketCapLookup,
    price_to_earnings: Vec<Multiple>,
    price_to_revenue: Vec<Multiple>,
    forecasts: BTreeMap<Metric, Forecast>,
}

impl ValuationResult {
    pub(crate) const fn new(
        ticker: Symbol,
        market_cap: MarketCapLookup,
        price_to_earnings: Vec<Multiple>,
        price_to_revenue: Vec<Multiple>,
        forecasts: BTreeMap<Metric, Forecast>,
    ) -> Self {
        Self {
            ticker,
            market_cap,
            price_to_earnings,
            price_to_revenue,
            forecasts,
        }
    }

    /// Ticker symbol.
    #[must_use]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Market cap lookup outcome used for the multiples.
    #[must_use]
    pub const fn market_cap(&self) -> &MarketCapLookup {
        &self.market_cap
    }

    /// Whether a market cap was available for this ticker.
    #[must_use]
    pub const fn is_valuation_available(&self) -> bool {
        self.market_cap.is_known()
    }

    /// Forward price/earnings, aligned with the net income forecast values.
    #[must_use]
    pub fn price_to_earnings(&self) -> &[Multiple] {
        &self.price_to_earnings
    }

    /// Forward price/revenue, aligned with the revenue forecast values.
    #[must_use]
    pub fn price_to_revenue(&self) -> &[Multiple] {
        &self.price_to_revenue
    }

    /// The furthest forward price/revenue multiple.
    #[must_use]
    pub fn last_price_to_revenue(&self) -> Option<&Multiple> {
        self.price_to_revenue.last()
    }

    /// Forecast for one metric.
    #[must_use]
    pub fn forecast(&self, metric: Metric) -> Option<&Forecast> {
        self.forecasts.get(&metric)
    }

    /// Successful forecast values for one metric, empty if none.
    #[must_use]
    pub fn forecast_values(&self, metric: Metric) -> Vec<f64> {
        self.forecast(metric).map(Forecast::values).unwrap_or_default()
    }

    /// The five ratio forecasts in report order.
    pub fn ratio_forecasts(&self) -> impl Iterator<Item = (Metric, &Forecast)> {
        Metric::RATIOS
            .into_iter()
            .filter_map(|m| self.forecasts.get(&m).map(|f| (m, f)))
    }
}
