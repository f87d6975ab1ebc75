//! Trend extrapolation for quarterly metric series.
//!
//! This crate fits an ordinary least-squares line `value = a + b * t` to an
//! ordered series, where `t` is the zero-based quarter index, and evaluates
//! it at the quarters following the last observation.
//!
//! Failures never abort a caller's run. A series the line cannot be fitted
//! to produces a [`Forecast`] whose every offset carries the fit error, and a
//! single offset whose extrapolated value is not finite is recorded as a
//! failure for that offset only. [`Forecast::values`] is the truncated view
//! of the successful offsets.
//!
//! # Example
//!
//! ```rust
//! use vantage_trend::{Forecaster, TrendForecaster};
//!
//! let revenue = [10.0, 12.0, 14.0, 16.0];
//! let forecast = TrendForecaster::default().forecast(&revenue);
//! assert_eq!(forecast.values().len(), 5);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

mod fit;
mod forecast;

pub use fit::{FitError, MIN_INDEX_VARIANCE, TrendLine};
pub use forecast::{
    FORECAST_HORIZON, Forecast, ForecastFailure, Forecaster, Prediction, TrendForecaster,
};
