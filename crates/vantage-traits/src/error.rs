//! Error types for the vantage pipeline.
//!
//! Per-offset forecast failures and per-ticker market cap failures are not
//! errors at this level: they are carried as data in the forecast and
//! valuation results. The variants here cover usage errors and the
//! conversions needed when a report is serialized.

use thiserror::Error;

/// The main error type for vantage operations.
#[derive(Debug, Error)]
pub enum VantageError {
    /// A metric selector name that is not one of the seven tracked metrics.
    #[error("Invalid metric selector: {0}")]
    InvalidMetric(String),

    /// A configuration value outside its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Error serializing or parsing JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for VantageError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for VantageError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for vantage operations.
pub type Result<T> = std::result::Result<T, VantageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VantageError::InvalidMetric("Ebit".to_string());
        assert_eq!(err.to_string(), "Invalid metric selector: Ebit");

        let err = VantageError::InvalidConfig("horizon must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: horizon must be positive"
        );
    }

    #[test]
    fn test_error_from_string() {
        let err: VantageError = "boom".into();
        assert!(matches!(err, VantageError::Other(ref s) if s == "boom"));
    }

    #[test]
    fn test_error_from_json() {
        let parse = serde_json::from_str::<Vec<f64>>("[1.0,");
        let err: VantageError = parse.unwrap_err().into();
        assert!(matches!(err, VantageError::Json(_)));
    }
}
