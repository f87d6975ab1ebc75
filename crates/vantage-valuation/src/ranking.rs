//! Ranking of valuation results.
//!
//! Tickers are ordered by their furthest forward price/revenue multiple,
//! highest first. A ticker without a usable last multiple (empty sequence,
//! undefined, or NaN) sorts after every ticker that has one. The sort is
//! stable over ticker order, so ties and unrankable tickers stay
//! alphabetical.

use crate::multiple::Multiple;
use crate::report::RankedReport;
use crate::result::ValuationResult;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use vantage_traits::Symbol;

/// The value a result is ranked by, if it has one.
#[must_use]
pub fn ranking_key(result: &ValuationResult) -> Option<f64> {
    result
        .last_price_to_revenue()
        .and_then(Multiple::value)
        .filter(|v| !v.is_nan())
}

/// Ranking order between two results.
#[must_use]
pub fn compare_entries(a: &ValuationResult, b: &ValuationResult) -> Ordering {
    match (ranking_key(a), ranking_key(b)) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Rank every result into a report.
#[must_use]
pub fn rank(results: BTreeMap<Symbol, ValuationResult>) -> RankedReport {
    let mut ordered: Vec<ValuationResult> = results.into_values().collect();
    ordered.sort_by(compare_entries);
    RankedReport::new(ordered)
}
