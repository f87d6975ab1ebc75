//! Ranked report and its renderings.

use crate::multiple::Multiple;
use crate::result::ValuationResult;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use vantage_traits::{MarketCapLookup, Result, VantageError};

/// Output format for a rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// Labeled lines, one block per ticker.
    #[default]
    Text,
    /// Pretty-printed JSON of every entry.
    Json,
    /// Long-format CSV: one row per ticker, series and offset.
    Csv,
}

impl ReportFormat {
    /// Conventional file extension.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = VantageError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(VantageError::Other(format!(
                "unknown report format '{other}' (expected text, json or csv)"
            ))),
        }
    }
}

/// One ranked ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1-based position in the ranking.
    pub rank: usize,
    /// The ticker's valuation.
    pub result: ValuationResult,
}

/// Valuation results in ranked order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RankedReport {
    entries: Vec<RankedEntry>,
}

impl RankedReport {
    /// Wrap results that are already in ranked order.
    pub(crate) fn new(ordered: Vec<ValuationResult>) -> Self {
        let entries = ordered
            .into_iter()
            .enumerate()
            .map(|(i, result)| RankedEntry { rank: i + 1, result })
            .collect();
        Self { entries }
    }

    /// Entries in ranked order.
    #[must_use]
    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    /// Number of tickers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the report has no tickers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The result for `ticker`.
    #[must_use]
    pub fn get(&self, ticker: &str) -> Option<&ValuationResult> {
        self.entries
            .iter()
            .map(|e| &e.result)
            .find(|r| r.ticker() == ticker)
    }

    /// Tickers in ranked order.
    #[must_use]
    pub fn tickers(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.result.ticker()).collect()
    }

    /// Render as labeled text, one block per ticker.
    #[must_use]
    pub fn render_text(&self) -> String {
        self.to_string()
    }

    /// Render as pretty-printed JSON.
    ///
    /// Non-finite multiples (possible under the raw division policy) are
    /// written as the strings `"inf"`, `"-inf"` and `"nan"`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Long-format frame with columns `rank`, `ticker`, `series`, `offset`, `value`.
    ///
    /// Series are `price_to_earnings`, `price_to_revenue` and the five ratio
    /// metrics. Undefined multiples have a null value.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be built.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let mut ranks: Vec<u32> = Vec::new();
        let mut tickers: Vec<String> = Vec::new();
        let mut series: Vec<String> = Vec::new();
        let mut offsets: Vec<u32> = Vec::new();
        let mut values: Vec<Option<f64>> = Vec::new();

        for entry in &self.entries {
            let r = &entry.result;
            let mut rows: Vec<(String, Vec<Option<f64>>)> = vec![
                (
                    "price_to_earnings".to_string(),
                    r.price_to_earnings().iter().map(Multiple::value).collect(),
                ),
                (
                    "price_to_revenue".to_string(),
                    r.price_to_revenue().iter().map(Multiple::value).collect(),
                ),
            ];
            rows.extend(r.ratio_forecasts().map(|(metric, forecast)| {
                (
                    metric.to_string(),
                    forecast.values().into_iter().map(Some).collect(),
                )
            }));

            for (name, row) in rows {
                for (offset, value) in row.into_iter().enumerate() {
                    ranks.push(entry.rank as u32);
                    tickers.push(r.ticker().to_string());
                    series.push(name.clone());
                    offsets.push(offset as u32);
                    values.push(value);
                }
            }
        }

        Ok(df!(
            "rank" => ranks,
            "ticker" => tickers,
            "series" => series,
            "offset" => offsets,
            "value" => values
        )?)
    }

    /// Render the long-format frame as CSV with a header row.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame cannot be built or written.
    pub fn to_csv(&self) -> Result<String> {
        let mut frame = self.to_frame()?;
        let mut buf: Vec<u8> = Vec::new();
        CsvWriter::new(&mut buf)
            .include_header(true)
            .finish(&mut frame)?;
        String::from_utf8(buf).map_err(|e| VantageError::Other(e.to_string()))
    }

    /// Render in the given format.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON or CSV rendering fails.
    pub fn render(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(self.render_text()),
            ReportFormat::Json => self.to_json(),
            ReportFormat::Csv => self.to_csv(),
        }
    }
}

impl Display for RankedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            let r = &entry.result;
            writeln!(f, "{}:", r.ticker())?;
            if let MarketCapLookup::Unavailable(reason) = r.market_cap() {
                writeln!(f, "valuation unavailable: {reason}")?;
            }
            writeln!(
                f,
                "forward quarterly P/E: {}",
                bracketed(r.price_to_earnings())
            )?;
            writeln!(
                f,
                "forward quarterly P/R: {}",
                bracketed(r.price_to_revenue())
            )?;
            for (metric, forecast) in r.ratio_forecasts() {
                let values: Vec<Ratio> = forecast.values().into_iter().map(Ratio).collect();
                writeln!(
                    f,
                    "forward quarterly {}: {}",
                    metric.label(),
                    bracketed(&values)
                )?;
            }
        }
        Ok(())
    }
}

/// Ratio forecast value, printed with four decimals.
struct Ratio(f64);

impl Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

fn bracketed<T: Display>(items: &[T]) -> String {
    let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}
