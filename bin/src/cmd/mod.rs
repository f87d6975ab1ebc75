//! CLI subcommand modules.
//!
//! This module contains the implementations for all vantage CLI subcommands.

pub(crate) mod predict;
pub(crate) mod pull;
pub(crate) mod tickers;
