//! Forward valuation for vantage.
//!
//! This crate turns statement histories into a ranked report of forward
//! valuation multiples:
//! - Trend forecasts for each of the seven tracked metrics
//! - Forward price/earnings and price/revenue from forecast net income and
//!   revenue, annualized and divided into market capitalization
//! - Ranking by the furthest forward price/revenue multiple
//! - Text, JSON and CSV rendering
//!
//! # Example
//!
//! ```rust,ignore
//! use vantage_valuation::{ValuationConfig, ValuationEngine};
//!
//! let engine = ValuationEngine::new(ValuationConfig::default())?;
//! let report = engine.run(&histories, &market_caps);
//! std::fs::write("forward-valuations.txt", report.render_text())?;
//! ```

mod config;
mod engine;
mod multiple;
mod ranking;
mod report;
mod result;

// Re-export main types
pub use config::{ANNUALIZATION_FACTOR, DivisionPolicy, ValuationConfig};
pub use engine::ValuationEngine;
pub use multiple::{Multiple, UndefinedReason, forward_multiples};
pub use ranking::{compare_entries, rank, ranking_key};
pub use report::{RankedEntry, RankedReport, ReportFormat};
pub use result::ValuationResult;
