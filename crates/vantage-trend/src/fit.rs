//! Ordinary least-squares line over the quarter index.

use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum sum of squared index deviations for a slope to be determined.
///
/// The index is `0..n`, so this only trips for fewer than two observations.
pub const MIN_INDEX_VARIANCE: f64 = 1e-12;

/// Reasons a trend line cannot be fitted to a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FitError {
    /// The series has no observations.
    #[error("no observations to fit")]
    Empty,

    /// Fewer than two observations leave the slope undetermined.
    #[error("{0} observation(s) cannot determine a slope")]
    TooFewObservations(usize),

    /// An observation is NaN or infinite.
    #[error("observation at quarter {0} is not finite")]
    NonFiniteObservation(usize),

    /// The fitted coefficients overflowed.
    #[error("fitted coefficients are not finite")]
    NonFiniteFit,
}

/// A fitted line `value = intercept + slope * t`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLine {
    intercept: f64,
    slope: f64,
    observations: usize,
}

impl TrendLine {
    /// Fit a line to `values`, where `values[i]` is observed at `t = i`.
    ///
    /// # Errors
    ///
    /// Returns an error if the series is empty, has a single observation,
    /// contains a non-finite value, or the coefficients overflow.
    pub fn fit(values: &[f64]) -> Result<Self, FitError> {
        let n = values.len();
        if n == 0 {
            return Err(FitError::Empty);
        }
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(FitError::NonFiniteObservation(i));
        }

        let y = ArrayView1::from(values);
        let t = Array1::range(0.0, n as f64, 1.0);

        let (Some(t_mean), Some(y_mean)) = (t.mean(), y.mean()) else {
            return Err(FitError::Empty);
        };

        let dt = &t - t_mean;
        let dy = &y - y_mean;
        let sxx = dt.dot(&dt);
        if sxx < MIN_INDEX_VARIANCE {
            return Err(FitError::TooFewObservations(n));
        }

        let slope = dt.dot(&dy) / sxx;
        let intercept = y_mean - slope * t_mean;
        if !slope.is_finite() || !intercept.is_finite() {
            return Err(FitError::NonFiniteFit);
        }

        Ok(Self {
            intercept,
            slope,
            observations: n,
        })
    }

    /// Evaluate the line at quarter index `t`.
    #[must_use]
    pub fn at(&self, t: f64) -> f64 {
        self.slope.mul_add(t, self.intercept)
    }

    /// Value at `t = 0`.
    #[must_use]
    pub const fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Change per quarter.
    #[must_use]
    pub const fn slope(&self) -> f64 {
        self.slope
    }

    /// Number of observations the line was fitted on.
    #[must_use]
    pub const fn observations(&self) -> usize {
        self.observations
    }
}
