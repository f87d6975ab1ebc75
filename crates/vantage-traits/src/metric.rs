//! Metric selectors.
//!
//! A [`Metric`] names one scalar field of a [`QuarterlyStatement`](crate::QuarterlyStatement).
//! The set is closed: the valuation engine iterates [`Metric::ALL`] and never
//! builds a selector from untrusted input, so the only fallible path is
//! [`FromStr`].

use crate::VantageError;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the seven tracked income-statement metrics.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Total revenue for the quarter.
    #[display("revenue")]
    Revenue,
    /// Net income for the quarter.
    #[display("net_income")]
    NetIncome,
    /// Gross profit divided by revenue.
    #[display("gross_profit_ratio")]
    GrossProfitRatio,
    /// EBITDA divided by revenue.
    #[display("ebitda_ratio")]
    EbitdaRatio,
    /// Operating income divided by revenue.
    #[display("operating_income_ratio")]
    OperatingIncomeRatio,
    /// Income before tax divided by revenue.
    #[display("income_before_tax_ratio")]
    IncomeBeforeTaxRatio,
    /// Net income divided by revenue.
    #[display("net_income_ratio")]
    NetIncomeRatio,
}

impl Metric {
    /// Every tracked metric, in report order.
    pub const ALL: [Self; 7] = [
        Self::Revenue,
        Self::NetIncome,
        Self::GrossProfitRatio,
        Self::EbitdaRatio,
        Self::OperatingIncomeRatio,
        Self::IncomeBeforeTaxRatio,
        Self::NetIncomeRatio,
    ];

    /// The profitability ratios reported alongside the forward multiples.
    pub const RATIOS: [Self; 5] = [
        Self::GrossProfitRatio,
        Self::EbitdaRatio,
        Self::OperatingIncomeRatio,
        Self::IncomeBeforeTaxRatio,
        Self::NetIncomeRatio,
    ];

    /// Human-readable label used in rendered reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::NetIncome => "net income",
            Self::GrossProfitRatio => "gross profit ratio",
            Self::EbitdaRatio => "EBITDA ratio",
            Self::OperatingIncomeRatio => "operating income ratio",
            Self::IncomeBeforeTaxRatio => "income before tax ratio",
            Self::NetIncomeRatio => "net income ratio",
        }
    }

    /// Whether this metric is one of the profitability ratios.
    #[must_use]
    pub const fn is_ratio(&self) -> bool {
        !matches!(self, Self::Revenue | Self::NetIncome)
    }
}

impl FromStr for Metric {
    type Err = VantageError;

    /// Parses snake_case (`gross_profit_ratio`), kebab-case and the
    /// PascalCase field names (`GrossProfitRatio`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "revenue" => Ok(Self::Revenue),
            "netincome" => Ok(Self::NetIncome),
            "grossprofitratio" => Ok(Self::GrossProfitRatio),
            "ebitdaratio" => Ok(Self::EbitdaRatio),
            "operatingincomeratio" => Ok(Self::OperatingIncomeRatio),
            "incomebeforetaxratio" => Ok(Self::IncomeBeforeTaxRatio),
            "netincomeratio" => Ok(Self::NetIncomeRatio),
            _ => Err(VantageError::InvalidMetric(s.to_string())),
        }
    }
}
