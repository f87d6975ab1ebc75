//! Data types for FMP API responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use vantage_traits::{QuarterlyStatement, StatementHistory};

/// Reporting period for financial statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    /// Annual reports (10-K filings).
    Annual,
    /// Quarterly reports (10-Q filings).
    #[default]
    Quarter,
}

impl Period {
    /// Get the API parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarter => "quarter",
        }
    }
}

/// Income statement data from FMP.
///
/// The ratio fields are only present on some API versions; when absent they
/// are derived from the absolute amounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatement {
    /// Period end date.
    #[serde(default)]
    pub date: String,
    /// Ticker symbol.
    #[serde(default)]
    pub symbol: String,
    /// Reporting period (FY, Q1..Q4).
    #[serde(default)]
    pub period: String,
    /// Total revenue.
    #[serde(default)]
    pub revenue: f64,
    /// Gross profit.
    #[serde(default)]
    pub gross_profit: f64,
    /// EBITDA.
    #[serde(default)]
    pub ebitda: f64,
    /// Operating income.
    #[serde(default)]
    pub operating_income: f64,
    /// Income before tax.
    #[serde(default)]
    pub income_before_tax: f64,
    /// Net income.
    #[serde(default)]
    pub net_income: f64,
    /// Gross profit / revenue, as reported.
    #[serde(default)]
    pub gross_profit_ratio: Option<f64>,
    /// EBITDA / revenue, as reported.
    #[serde(default, rename = "ebitdaratio")]
    pub ebitda_ratio: Option<f64>,
    /// Operating income / revenue, as reported.
    #[serde(default)]
    pub operating_income_ratio: Option<f64>,
    /// Income before tax / revenue, as reported.
    #[serde(default)]
    pub income_before_tax_ratio: Option<f64>,
    /// Net income / revenue, as reported.
    #[serde(default)]
    pub net_income_ratio: Option<f64>,
}

impl IncomeStatement {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Ratio of `amount` to revenue, zero when revenue is not positive.
    fn margin(&self, amount: f64) -> f64 {
        if self.revenue > 0.0 {
            amount / self.revenue
        } else {
            0.0
        }
    }

    /// Convert to the metric bundle used for forecasting.
    #[must_use]
    pub fn to_quarterly(&self) -> QuarterlyStatement {
        QuarterlyStatement {
            date: self.parsed_date(),
            revenue: self.revenue,
            net_income: self.net_income,
            gross_profit_ratio: self
                .gross_profit_ratio
                .unwrap_or_else(|| self.margin(self.gross_profit)),
            ebitda_ratio: self.ebitda_ratio.unwrap_or_else(|| self.margin(self.ebitda)),
            operating_income_ratio: self
                .operating_income_ratio
                .unwrap_or_else(|| self.margin(self.operating_income)),
            income_before_tax_ratio: self
                .income_before_tax_ratio
                .unwrap_or_else(|| self.margin(self.income_before_tax)),
            net_income_ratio: self
                .net_income_ratio
                .unwrap_or_else(|| self.margin(self.net_income)),
        }
    }
}

/// Order statements oldest first and convert them.
///
/// Statements are sorted by date when every date parses. Otherwise the API
/// order (newest first) is reversed.
#[must_use]
pub fn into_history(statements: Vec<IncomeStatement>) -> StatementHistory {
    let dated: Option<Vec<(NaiveDate, QuarterlyStatement)>> = statements
        .iter()
        .map(|s| s.parsed_date().map(|d| (d, s.to_quarterly())))
        .collect();

    match dated {
        Some(mut dated) => {
            dated.sort_by_key(|(date, _)| *date);
            dated.into_iter().map(|(_, s)| s).collect()
        }
        None => StatementHistory::from_newest_first(
            statements.iter().map(IncomeStatement::to_quarterly).collect(),
        ),
    }
}

/// Market capitalization data from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketCapitalization {
    /// Ticker symbol.
    #[serde(default)]
    pub symbol: String,
    /// Observation date.
    #[serde(default)]
    pub date: String,
    /// Market capitalization.
    #[serde(default)]
    pub market_cap: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_traits::Metric;

    const RESPONSE: &str = r#"[
        {
            "date": "2024-06-30",
            "symbol": "NET",
            "period": "Q2",
            "revenue": 401000000.0,
            "grossProfit": 312000000.0,
            "ebitda": 20000000.0,
            "operatingIncome": -38000000.0,
            "incomeBeforeTax": -10000000.0,
            "netIncome": -15000000.0,
            "grossProfitRatio": 0.778,
            "ebitdaratio": 0.05,
            "operatingIncomeRatio": -0.095,
            "incomeBeforeTaxRatio": -0.025,
            "netIncomeRatio": -0.037
        },
        {
            "date": "2024-03-31",
            "symbol": "NET",
            "period": "Q1",
            "revenue": 378000000.0,
            "grossProfit": 294000000.0,
            "netIncome": -35000000.0
        }
    ]"#;

    #[test]
    fn test_deserialize_income_statements() {
        let statements: Vec<IncomeStatement> = serde_json::from_str(RESPONSE).unwrap();
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0].ebitda_ratio, Some(0.05));
        assert_eq!(statements[1].gross_profit_ratio, None);
    }

    #[test]
    fn test_to_quarterly_prefers_reported_ratios() {
        let statements: Vec<IncomeStatement> = serde_json::from_str(RESPONSE).unwrap();
        let q = statements[0].to_quarterly();
        assert_eq!(q.gross_profit_ratio, 0.778);
        assert_eq!(q.net_income, -15_000_000.0);
        assert_eq!(q.date, NaiveDate::from_ymd_opt(2024, 6, 30));
    }

    #[test]
    fn test_to_quarterly_derives_missing_ratios() {
        let statements: Vec<IncomeStatement> = serde_json::from_str(RESPONSE).unwrap();
        let q = statements[1].to_quarterly();
        assert!((q.gross_profit_ratio - 294.0 / 378.0).abs() < 1e-12);
        assert_eq!(q.ebitda_ratio, 0.0);
    }

    #[test]
    fn test_into_history_orders_oldest_first() {
        let statements: Vec<IncomeStatement> = serde_json::from_str(RESPONSE).unwrap();
        let history = into_history(statements);
        assert_eq!(
            history.select(Metric::Revenue),
            vec![378_000_000.0, 401_000_000.0]
        );
    }

    #[test]
    fn test_into_history_reverses_without_dates() {
        let mut statements: Vec<IncomeStatement> = serde_json::from_str(RESPONSE).unwrap();
        statements[1].date = String::new();
        let history = into_history(statements);
        assert_eq!(
            history.select(Metric::Revenue),
            vec![378_000_000.0, 401_000_000.0]
        );
    }

    #[test]
    fn test_missing_date_falls_back_to_reversal() {
        let json = r#"[
            {"symbol": "NET", "revenue": 30.0},
            {"date": "2024-03-31", "symbol": "NET", "revenue": 20.0},
            {"symbol": "NET", "revenue": 10.0}
        ]"#;
        let statements: Vec<IncomeStatement> = serde_json::from_str(json).unwrap();
        assert_eq!(statements[0].date, "");

        let history = into_history(statements);
        assert_eq!(history.select(Metric::Revenue), vec![10.0, 20.0, 30.0]);
        assert_eq!(history.latest().unwrap().date, None);
    }

    #[test]
    fn test_zero_revenue_margin() {
        let s = IncomeStatement {
            date: "2024-01-01".to_string(),
            symbol: "X".to_string(),
            period: "Q1".to_string(),
            revenue: 0.0,
            gross_profit: 10.0,
            ebitda: 0.0,
            operating_income: 0.0,
            income_before_tax: 0.0,
            net_income: 5.0,
            gross_profit_ratio: None,
            ebitda_ratio: None,
            operating_income_ratio: None,
            income_before_tax_ratio: None,
            net_income_ratio: None,
        };
        assert_eq!(s.to_quarterly().gross_profit_ratio, 0.0);
    }

    #[test]
    fn test_deserialize_market_cap() {
        let json = r#"[{"symbol":"NET","date":"2024-07-01","marketCap":28000000000}]"#;
        let caps: Vec<MarketCapitalization> = serde_json::from_str(json).unwrap();
        assert_eq!(caps[0].market_cap, 28_000_000_000.0);
    }

    #[test]
    fn test_period_as_str() {
        assert_eq!(Period::Quarter.as_str(), "quarter");
        assert_eq!(Period::default(), Period::Quarter);
    }
}
