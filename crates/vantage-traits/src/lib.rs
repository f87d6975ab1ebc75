#![doc(issue_tracker_base_url = "https://github.com/factordynamics/vantage/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for the vantage forward valuation pipeline.
//!
//! This crate provides the data model shared by every other vantage crate:
//! quarterly income-statement bundles, ordered statement histories, the
//! metric selectors used to project a history into a numeric series, and the
//! market capitalization seam consumed by the valuation engine.

/// The version of the vantage-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod market_cap;
pub mod metric;
pub mod types;

pub use error::{Result, VantageError};
pub use market_cap::{MarketCapLookup, MarketCapSource, MarketCapTable};
pub use metric::Metric;
pub use types::{Date, QuarterlyStatement, StatementBook, StatementHistory, Symbol};
