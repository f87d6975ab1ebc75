//! Predict command implementation.

use crate::store::Store;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use vantage_fmp::FmpClient;
use vantage_traits::{MarketCapSource, StatementBook, Symbol};
use vantage_valuation::{RankedReport, ReportFormat, ValuationConfig, ValuationEngine};

/// Where and how to write the report.
#[derive(Debug, Clone)]
pub(crate) struct PredictOptions<'a> {
    /// Report file; `None` prints to stdout.
    pub(crate) output: Option<&'a Path>,
    pub(crate) format: ReportFormat,
    /// Use plain IEEE division instead of guarded multiples.
    pub(crate) raw_division: bool,
}

/// Value every stored ticker against current market caps and write the ranked report.
pub(crate) async fn predict(
    client: &FmpClient,
    store: &Store,
    options: &PredictOptions<'_>,
) -> Result<()> {
    let snapshot = store.load_statements()?;
    tracing::info!(
        tickers = snapshot.histories.len(),
        pulled_at = %snapshot.pulled_at,
        "loaded statement histories"
    );

    let tickers: Vec<Symbol> = snapshot.histories.keys().cloned().collect();
    let market_caps = client.market_caps(&tickers).await;
    tracing::info!(
        known = market_caps.known_count(),
        requested = tickers.len(),
        "resolved market caps"
    );

    let report = build_report(&snapshot.histories, &market_caps, options.raw_division)?;
    write_report(&report, options)?;

    println!("all done");
    Ok(())
}

/// Run the valuation engine with the policy chosen on the command line.
pub(crate) fn build_report<S>(
    histories: &StatementBook,
    market_caps: &S,
    raw_division: bool,
) -> Result<RankedReport>
where
    S: MarketCapSource + ?Sized,
{
    let config = if raw_division {
        ValuationConfig::raw()
    } else {
        ValuationConfig::default()
    };
    let engine = ValuationEngine::new(config)?;
    Ok(engine.run(histories, market_caps))
}

/// Render `report` and write it to the configured sink.
pub(crate) fn write_report(report: &RankedReport, options: &PredictOptions<'_>) -> Result<()> {
    let rendered = report.render(options.format)?;
    match options.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            tracing::info!(path = %path.display(), format = ?options.format, "report written");
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
