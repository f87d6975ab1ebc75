//! Valuation configuration.

use serde::{Deserialize, Serialize};
use vantage_traits::{Result, VantageError};
use vantage_trend::FORECAST_HORIZON;

/// Quarters per year; one forecast quarter is multiplied by this to annualize.
pub const ANNUALIZATION_FACTOR: f64 = 4.0;

/// How forward multiples treat degenerate denominators and missing market caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DivisionPolicy {
    /// Zero or non-finite results become [`Multiple::Undefined`](crate::Multiple::Undefined),
    /// and a ticker without a market cap is marked unavailable.
    #[default]
    Guarded,
    /// Plain IEEE division with a missing market cap read as zero.
    ///
    /// Reproduces the historical output, infinities included, for
    /// regression comparisons.
    Raw,
}

/// Run-wide valuation settings, fixed when the engine is constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValuationConfig {
    /// Quarters to forecast past the last observation
    pub horizon: usize,
    /// Multiplier applied to one forecast quarter before dividing
    pub annualization_factor: f64,
    /// Treatment of degenerate divisions
    pub division: DivisionPolicy,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            horizon: FORECAST_HORIZON,
            annualization_factor: ANNUALIZATION_FACTOR,
            division: DivisionPolicy::Guarded,
        }
    }
}

impl ValuationConfig {
    /// Default settings with the raw division policy.
    #[must_use]
    pub fn raw() -> Self {
        Self {
            division: DivisionPolicy::Raw,
            ..Default::default()
        }
    }

    /// Check the settings.
    ///
    /// # Errors
    ///
    /// Returns [`VantageError::InvalidConfig`] for a zero horizon or a
    /// non-positive or non-finite annualization factor.
    pub fn validate(&self) -> Result<()> {
        if self.horizon == 0 {
            return Err(VantageError::InvalidConfig(
                "horizon must be at least one quarter".to_string(),
            ));
        }
        if !self.annualization_factor.is_finite() || self.annualization_factor <= 0.0 {
            return Err(VantageError::InvalidConfig(format!(
                "annualization factor must be positive, got {}",
                self.annualization_factor
            )));
        }
        Ok(())
    }
}
