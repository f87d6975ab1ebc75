//! Per-offset forecasts built on a fitted trend line.

use crate::fit::{FitError, TrendLine};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use vantage_traits::{Metric, StatementHistory};

/// Number of quarters forecast past the last observation.
pub const FORECAST_HORIZON: usize = 5;

/// Why a single forecast offset has no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ForecastFailure {
    /// The series could not be fitted, so no offset has a value.
    #[error("trend fit failed: {0}")]
    Fit(#[from] FitError),

    /// The fitted line evaluated to NaN or infinity at this offset.
    #[error("extrapolated value is not finite")]
    NonFinitePrediction,
}

/// Outcome for one forecast offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Offset past the last observation, starting at 0.
    pub offset: usize,
    /// Quarter index the line was evaluated at (`observations + offset`).
    pub quarter: usize,
    /// The extrapolated value, or why there is none.
    pub outcome: Result<f64, ForecastFailure>,
}

impl Prediction {
    /// The value, if this offset succeeded.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        self.outcome.as_ref().ok().copied()
    }
}

/// Forecast for one series: one [`Prediction`] per offset in the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    line: Option<TrendLine>,
    observations: usize,
    predictions: Vec<Prediction>,
}

impl Forecast {
    /// Build a forecast from explicit per-offset outcomes.
    ///
    /// Offsets are numbered by position; `observations` sets the quarter
    /// index of offset 0.
    #[must_use]
    pub fn from_outcomes(
        observations: usize,
        outcomes: impl IntoIterator<Item = Result<f64, ForecastFailure>>,
    ) -> Self {
        let predictions = outcomes
            .into_iter()
            .enumerate()
            .map(|(offset, outcome)| Prediction {
                offset,
                quarter: observations + offset,
                outcome,
            })
            .collect();
        Self {
            line: None,
            observations,
            predictions,
        }
    }

    /// The successful values in offset order.
    ///
    /// Failed offsets are skipped, so the result may be shorter than the
    /// horizon, or empty.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.predictions.iter().filter_map(Prediction::value).collect()
    }

    /// Every offset's outcome, in offset order.
    #[must_use]
    pub fn predictions(&self) -> &[Prediction] {
        &self.predictions
    }

    /// The value at `offset`, if that offset succeeded.
    #[must_use]
    pub fn value_at(&self, offset: usize) -> Option<f64> {
        self.predictions.get(offset).and_then(Prediction::value)
    }

    /// The fitted line, when the series could be fitted.
    #[must_use]
    pub const fn line(&self) -> Option<&TrendLine> {
        self.line.as_ref()
    }

    /// Number of observations the forecast was built from.
    #[must_use]
    pub const fn observations(&self) -> usize {
        self.observations
    }

    /// Number of offsets requested.
    #[must_use]
    pub fn horizon(&self) -> usize {
        self.predictions.len()
    }

    /// Whether every offset has a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.predictions.iter().all(|p| p.outcome.is_ok())
    }

    /// Failed offsets and their reasons.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &ForecastFailure)> {
        self.predictions
            .iter()
            .filter_map(|p| p.outcome.as_ref().err().map(|e| (p.offset, e)))
    }
}

/// Produces forecasts from an ordered series.
pub trait Forecaster {
    /// Forecast the quarters following `values`, where `values[i]` is quarter `i`.
    fn forecast(&self, values: &[f64]) -> Forecast;

    /// Forecast one metric of a statement history.
    fn forecast_metric(&self, history: &StatementHistory, metric: Metric) -> Forecast {
        self.forecast(&history.select(metric))
    }
}

/// Least-squares trend extrapolation over a fixed horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendForecaster {
    horizon: usize,
}

impl TrendForecaster {
    /// Create a forecaster that predicts `horizon` quarters ahead.
    #[must_use]
    pub const fn new(horizon: usize) -> Self {
        Self { horizon }
    }

    /// Number of quarters predicted.
    #[must_use]
    pub const fn horizon(&self) -> usize {
        self.horizon
    }
}

impl Default for TrendForecaster {
    fn default() -> Self {
        Self::new(FORECAST_HORIZON)
    }
}

impl Forecaster for TrendForecaster {
    fn forecast(&self, values: &[f64]) -> Forecast {
        let n = values.len();
        let line = match TrendLine::fit(values) {
            Ok(line) => line,
            Err(e) => {
                tracing::debug!(observations = n, error = %e, "trend fit failed");
                return Forecast::from_outcomes(n, (0..self.horizon).map(|_| Err(e.into())));
            }
        };

        let mut forecast = Forecast::from_outcomes(
            n,
            (0..self.horizon).map(|offset| {
                let value = line.at((n + offset) as f64);
                if value.is_finite() {
                    Ok(value)
                } else {
                    Err(ForecastFailure::NonFinitePrediction)
                }
            }),
        );
        forecast.line = Some(line);
        forecast
    }
}
