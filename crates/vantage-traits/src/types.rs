//! Common types used throughout the vantage pipeline.
//!
//! This module defines the quarterly statement bundle, the ordered history a
//! ticker's forecasts are fitted on, and the symbol and date aliases.

use crate::Metric;
use derive_more::From;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A ticker symbol identifying one company, e.g. "AAPL".
pub type Symbol = String;

/// Statement histories keyed by ticker.
///
/// A `BTreeMap` keeps iteration in ticker order, so everything derived from
/// it is independent of insertion order.
pub type StatementBook = BTreeMap<Symbol, StatementHistory>;

/// One reporting period's metric bundle for one ticker.
///
/// Field names follow the Financial Modeling Prep wire format. Absolute
/// amounts are in the reporting currency as supplied; ratios are fractions
/// of revenue.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterlyStatement {
    /// Period end date, when the source supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<Date>,
    /// Total revenue.
    #[serde(default)]
    pub revenue: f64,
    /// Net income.
    #[serde(default)]
    pub net_income: f64,
    /// Gross profit / revenue.
    #[serde(default)]
    pub gross_profit_ratio: f64,
    /// EBITDA / revenue.
    #[serde(default, alias = "ebitdaratio")]
    pub ebitda_ratio: f64,
    /// Operating income / revenue.
    #[serde(default)]
    pub operating_income_ratio: f64,
    /// Income before tax / revenue.
    #[serde(default)]
    pub income_before_tax_ratio: f64,
    /// Net income / revenue.
    #[serde(default)]
    pub net_income_ratio: f64,
}

impl QuarterlyStatement {
    /// Read the field named by `metric`.
    #[must_use]
    pub const fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Revenue => self.revenue,
            Metric::NetIncome => self.net_income,
            Metric::GrossProfitRatio => self.gross_profit_ratio,
            Metric::EbitdaRatio => self.ebitda_ratio,
            Metric::OperatingIncomeRatio => self.operating_income_ratio,
            Metric::IncomeBeforeTaxRatio => self.income_before_tax_ratio,
            Metric::NetIncomeRatio => self.net_income_ratio,
        }
    }
}

/// Quarterly statements for one ticker, ordered oldest to newest.
///
/// Position `i` is quarter index `i` for trend fitting. The ordering is the
/// producer's responsibility; nothing here re-sorts or validates dates.
#[derive(Debug, Clone, PartialEq, Default, From, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatementHistory(Vec<QuarterlyStatement>);

impl StatementHistory {
    /// Create a history from statements already ordered oldest first.
    #[must_use]
    pub const fn new(statements: Vec<QuarterlyStatement>) -> Self {
        Self(statements)
    }

    /// Create a history from statements ordered newest first, as most
    /// statement APIs return them.
    #[must_use]
    pub fn from_newest_first(mut statements: Vec<QuarterlyStatement>) -> Self {
        statements.reverse();
        Self(statements)
    }

    /// Number of quarters in the history.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the history has no quarters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The statements, oldest first.
    #[must_use]
    pub fn statements(&self) -> &[QuarterlyStatement] {
        &self.0
    }

    /// The most recent statement.
    #[must_use]
    pub fn latest(&self) -> Option<&QuarterlyStatement> {
        self.0.last()
    }

    /// Project the history into the numeric series for one metric.
    #[must_use]
    pub fn select(&self, metric: Metric) -> Vec<f64> {
        self.0.iter().map(|s| s.get(metric)).collect()
    }

    /// Iterate the statements, oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, QuarterlyStatement> {
        self.0.iter()
    }
}

impl FromIterator<QuarterlyStatement> for StatementHistory {
    fn from_iter<I: IntoIterator<Item = QuarterlyStatement>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a StatementHistory {
    type Item = &'a QuarterlyStatement;
    type IntoIter = std::slice::Iter<'a, QuarterlyStatement>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statement(revenue: f64, net_income: f64) -> QuarterlyStatement {
        QuarterlyStatement {
            revenue,
            net_income,
            gross_profit_ratio: 0.4,
            ebitda_ratio: 0.3,
            operating_income_ratio: 0.2,
            income_before_tax_ratio: 0.18,
            net_income_ratio: net_income / revenue,
            ..Default::default()
        }
    }

    #[test]
    fn test_select_projects_in_order() {
        let history = StatementHistory::new(vec![statement(100.0, 10.0), statement(120.0, 15.0)]);
        assert_eq!(history.select(Metric::Revenue), vec![100.0, 120.0]);
        assert_eq!(history.select(Metric::NetIncome), vec![10.0, 15.0]);
        assert_eq!(history.select(Metric::EbitdaRatio), vec![0.3, 0.3]);
    }

    #[test]
    fn test_from_newest_first_reverses() {
        let history =
            StatementHistory::from_newest_first(vec![statement(300.0, 1.0), statement(100.0, 1.0)]);
        assert_eq!(history.select(Metric::Revenue), vec![100.0, 300.0]);
        assert_eq!(history.latest().map(|s| s.revenue), Some(300.0));
    }

    #[test]
    fn test_empty_history() {
        let history = StatementHistory::default();
        assert!(history.is_empty());
        assert!(history.select(Metric::Revenue).is_empty());
        assert!(history.latest().is_none());
    }

    #[test]
    fn test_get_covers_every_metric() {
        let s = statement(200.0, 20.0);
        let values: Vec<f64> = Metric::ALL.iter().map(|m| s.get(*m)).collect();
        assert_eq!(values, vec![200.0, 20.0, 0.4, 0.3, 0.2, 0.18, 0.1]);
    }

    #[test]
    fn test_statement_deserializes_wire_names() {
        let json = r#"{
            "date": "2024-03-31",
            "revenue": 1000.0,
            "netIncome": 50.0,
            "grossProfitRatio": 0.5,
            "ebitdaratio": 0.25,
            "operatingIncomeRatio": 0.2,
            "incomeBeforeTaxRatio": 0.07,
            "netIncomeRatio": 0.05
        }"#;
        let s: QuarterlyStatement = serde_json::from_str(json).unwrap();
        assert_eq!(s.date, Date::from_ymd_opt(2024, 3, 31));
        assert_eq!(s.ebitda_ratio, 0.25);
        assert_eq!(s.net_income_ratio, 0.05);
    }

    #[test]
    fn test_history_serializes_as_array() {
        let history = StatementHistory::new(vec![statement(100.0, 10.0)]);
        let json = serde_json::to_string(&history).unwrap();
        assert!(json.starts_with('['));
        let back: StatementHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(back, history);
    }
}
