//! Pull command implementation.

use crate::store::{StatementSnapshot, Store};
use anyhow::{Result, bail};
use chrono::Utc;
use vantage_fmp::FmpClient;
use vantage_traits::{StatementBook, Symbol};

/// Counts reported after a pull.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PullSummary {
    pub(crate) tickers: usize,
    pub(crate) quarters: usize,
    /// Tickers stored with an empty history, in ticker order.
    pub(crate) empty: Vec<Symbol>,
}

impl PullSummary {
    pub(crate) fn of(histories: &StatementBook) -> Self {
        Self {
            tickers: histories.len(),
            quarters: histories.values().map(|h| h.len()).sum(),
            empty: histories
                .iter()
                .filter(|(_, h)| h.is_empty())
                .map(|(t, _)| t.clone())
                .collect(),
        }
    }
}

/// Fetch quarterly statements for every stored ticker and replace the snapshot.
///
/// Tickers whose request fails are stored with an empty history.
pub(crate) async fn pull(client: &FmpClient, store: &Store, limit: u32) -> Result<PullSummary> {
    let tickers = store.load_tickers()?;
    if tickers.is_empty() {
        bail!("no tickers stored (run `vantage tickers import <file>` first)");
    }

    println!(
        "Fetching up to {limit} quarters for {} ticker(s)...",
        tickers.len()
    );
    let histories = client.quarterly_histories(&tickers, Some(limit)).await;
    let summary = PullSummary::of(&histories);

    let snapshot = StatementSnapshot {
        pulled_at: Utc::now(),
        histories,
    };
    store.save_statements(&snapshot)?;

    tracing::info!(
        tickers = summary.tickers,
        quarters = summary.quarters,
        empty = summary.empty.len(),
        path = %store.statements_path().display(),
        "statement histories replaced"
    );
    println!(
        "Stored {} quarter(s) for {} ticker(s)",
        summary.quarters, summary.tickers
    );
    if !summary.empty.is_empty() {
        println!("No data for: {}", summary.empty.join(", "));
    }
    Ok(summary)
}
