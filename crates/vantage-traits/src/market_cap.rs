//! Market capitalization seam.
//!
//! The valuation engine asks a [`MarketCapSource`] for one scalar per
//! ticker. Lookups never fail the run: a source that cannot answer returns
//! [`MarketCapLookup::Unavailable`] and the engine decides what that means
//! for the ticker's multiples.

use crate::Symbol;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Outcome of a market capitalization lookup for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum MarketCapLookup {
    /// A finite, non-negative market capitalization.
    Known(f64),
    /// No usable value; carries the reason.
    Unavailable(String),
}

impl MarketCapLookup {
    /// Build a lookup from a raw value, rejecting negative or non-finite input.
    #[must_use]
    pub fn from_value(value: f64) -> Self {
        if value.is_finite() && value >= 0.0 {
            Self::Known(value)
        } else {
            Self::Unavailable(format!("invalid market cap {value}"))
        }
    }

    /// The market cap, if known.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        match self {
            Self::Known(v) => Some(*v),
            Self::Unavailable(_) => None,
        }
    }

    /// The market cap, or zero when unavailable.
    #[must_use]
    pub fn or_zero(&self) -> f64 {
        self.value().unwrap_or(0.0)
    }

    /// Whether a value is known.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

/// Supplies the current market capitalization for a ticker.
pub trait MarketCapSource {
    /// Look up the market capitalization of `ticker`.
    fn market_cap(&self, ticker: &str) -> MarketCapLookup;
}

impl<T: MarketCapSource + ?Sized> MarketCapSource for &T {
    fn market_cap(&self, ticker: &str) -> MarketCapLookup {
        (**self).market_cap(ticker)
    }
}

impl<S: BuildHasher> MarketCapSource for HashMap<Symbol, f64, S> {
    fn market_cap(&self, ticker: &str) -> MarketCapLookup {
        self.get(ticker).map_or_else(
            || MarketCapLookup::Unavailable(format!("no market cap for {ticker}")),
            |v| MarketCapLookup::from_value(*v),
        )
    }
}

impl MarketCapSource for BTreeMap<Symbol, f64> {
    fn market_cap(&self, ticker: &str) -> MarketCapLookup {
        self.get(ticker).map_or_else(
            || MarketCapLookup::Unavailable(format!("no market cap for {ticker}")),
            |v| MarketCapLookup::from_value(*v),
        )
    }
}

/// Market caps resolved ahead of a run.
///
/// Remote lookups are asynchronous; the valuation core is not. Callers
/// resolve every ticker into a table first, recording failures as they go,
/// and hand the table to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketCapTable {
    entries: BTreeMap<Symbol, MarketCapLookup>,
}

impl MarketCapTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successfully fetched value.
    pub fn insert(&mut self, ticker: impl Into<Symbol>, value: f64) {
        self.entries
            .insert(ticker.into(), MarketCapLookup::from_value(value));
    }

    /// Record a failed lookup.
    pub fn record_failure(&mut self, ticker: impl Into<Symbol>, reason: impl Into<String>) {
        self.entries
            .insert(ticker.into(), MarketCapLookup::Unavailable(reason.into()));
    }

    /// The recorded outcome for `ticker`, if any.
    #[must_use]
    pub fn get(&self, ticker: &str) -> Option<&MarketCapLookup> {
        self.entries.get(ticker)
    }

    /// Number of recorded tickers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of tickers with a known value.
    #[must_use]
    pub fn known_count(&self) -> usize {
        self.entries.values().filter(|l| l.is_known()).count()
    }

    /// Iterate recorded outcomes in ticker order.
    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &MarketCapLookup)> {
        self.entries.iter()
    }
}

impl MarketCapSource for MarketCapTable {
    fn market_cap(&self, ticker: &str) -> MarketCapLookup {
        self.entries.get(ticker).cloned().unwrap_or_else(|| {
            MarketCapLookup::Unavailable(format!("no market cap resolved for {ticker}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_value_rejects_invalid() {
        assert_eq!(MarketCapLookup::from_value(5.0), MarketCapLookup::Known(5.0));
        assert_eq!(MarketCapLookup::from_value(0.0), MarketCapLookup::Known(0.0));
        assert!(!MarketCapLookup::from_value(-1.0).is_known());
        assert!(!MarketCapLookup::from_value(f64::NAN).is_known());
        assert!(!MarketCapLookup::from_value(f64::INFINITY).is_known());
    }

    #[test]
    fn test_or_zero() {
        assert_eq!(MarketCapLookup::Known(42.0).or_zero(), 42.0);
        assert_eq!(
            MarketCapLookup::Unavailable("timeout".to_string()).or_zero(),
            0.0
        );
    }

    #[test]
    fn test_hashmap_source() {
        let mut caps = HashMap::new();
        caps.insert("AAPL".to_string(), 3.0e12);
        assert_eq!(caps.market_cap("AAPL"), MarketCapLookup::Known(3.0e12));
        assert!(!caps.market_cap("MSFT").is_known());
    }

    #[test]
    fn test_table_records_failures() {
        let mut table = MarketCapTable::new();
        table.insert("AAPL", 3.0e12);
        table.record_failure("NET", "HTTP 500");

        assert_eq!(table.len(), 2);
        assert_eq!(table.known_count(), 1);
        assert_eq!(table.market_cap("AAPL").value(), Some(3.0e12));
        assert_eq!(
            table.market_cap("NET"),
            MarketCapLookup::Unavailable("HTTP 500".to_string())
        );
        assert!(!table.market_cap("ZZZ").is_known());
    }

    #[test]
    fn test_source_through_reference() {
        let mut caps = BTreeMap::new();
        caps.insert("NET".to_string(), 1.0e9);
        let source: &dyn MarketCapSource = &caps;
        assert_eq!((&source).market_cap("NET").value(), Some(1.0e9));
    }

    #[test]
    fn test_lookup_serde_shape() {
        let json = serde_json::to_string(&MarketCapLookup::Known(10.0)).unwrap();
        assert_eq!(json, r#"{"status":"known","value":10.0}"#);
    }
}
