//! Forward valuation multiples.

use crate::config::DivisionPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use vantage_traits::MarketCapLookup;

/// Why a multiple has no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndefinedReason {
    /// The annualized forecast was zero.
    ZeroDenominator,
    /// The division produced NaN or infinity.
    NonFinite,
    /// The ticker's market cap could not be obtained.
    MarketCapUnavailable,
}

impl fmt::Display for UndefinedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ZeroDenominator => "zero denominator",
            Self::NonFinite => "non-finite",
            Self::MarketCapUnavailable => "market cap unavailable",
        };
        f.write_str(s)
    }
}

/// One forward multiple at one forecast offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Multiple {
    /// A computed ratio. Under [`DivisionPolicy::Raw`] this may be infinite or NaN.
    ///
    /// Non-finite ratios serialize as `"inf"`, `"-inf"` or `"nan"`.
    Defined(#[serde(with = "ratio")] f64),
    /// No meaningful ratio.
    Undefined(UndefinedReason),
}

impl Multiple {
    /// The ratio, if defined.
    #[must_use]
    pub const fn value(&self) -> Option<f64> {
        match self {
            Self::Defined(v) => Some(*v),
            Self::Undefined(_) => None,
        }
    }

    /// Whether a ratio was computed.
    #[must_use]
    pub const fn is_defined(&self) -> bool {
        matches!(self, Self::Defined(_))
    }
}

impl fmt::Display for Multiple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defined(v) => write!(f, "{v:.2}"),
            Self::Undefined(_) => f.write_str("n/a"),
        }
    }
}

/// Serde for ratios that may be non-finite, which JSON numbers cannot carry.
mod ratio {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub(super) fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("nan")
        } else if value.is_sign_positive() {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(v),
            Repr::Text(text) => match text.as_str() {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                "nan" => Ok(f64::NAN),
                other => Err(D::Error::custom(format!("not a ratio: {other}"))),
            },
        }
    }
}

/// Divide market cap by each annualized forecast value.
///
/// The output has one entry per input value, so it inherits any truncation
/// of the forecast.
#[must_use]
pub fn forward_multiples(
    market_cap: &MarketCapLookup,
    forecast: &[f64],
    annualization_factor: f64,
    policy: DivisionPolicy,
) -> Vec<Multiple> {
    match policy {
        DivisionPolicy::Raw => {
            let cap = market_cap.or_zero();
            forecast
                .iter()
                .map(|v| Multiple::Defined(cap / (v * annualization_factor)))
                .collect()
        }
        DivisionPolicy::Guarded => {
            let Some(cap) = market_cap.value() else {
                return vec![Multiple::Undefined(UndefinedReason::MarketCapUnavailable); forecast.len()];
            };
            forecast
                .iter()
                .map(|v| {
                    let denominator = v * annualization_factor;
                    if denominator == 0.0 {
                        return Multiple::Undefined(UndefinedReason::ZeroDenominator);
                    }
                    let ratio = cap / denominator;
                    if ratio.is_finite() {
                        Multiple::Defined(ratio)
                    } else {
                        Multiple::Undefined(UndefinedReason::NonFinite)
                    }
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_forward_pe_constant_net_income() {
        let cap = MarketCapLookup::Known(1_000_000.0);
        let multiples = forward_multiples(&cap, &[50_000.0; 5], 4.0, DivisionPolicy::Guarded);

        assert_eq!(multiples.len(), 5);
        for m in multiples {
            assert_relative_eq!(m.value().unwrap(), 5.0);
        }
    }

    #[test]
    fn test_truncated_forecast_truncates_multiples() {
        let cap = MarketCapLookup::Known(100.0);
        let multiples = forward_multiples(&cap, &[1.0, 2.0], 4.0, DivisionPolicy::Guarded);
        assert_eq!(multiples.len(), 2);
        assert!(forward_multiples(&cap, &[], 4.0, DivisionPolicy::Guarded).is_empty());
    }

    #[test]
    fn test_zero_denominator_guarded() {
        let cap = MarketCapLookup::Known(100.0);
        let multiples = forward_multiples(&cap, &[0.0, 5.0], 4.0, DivisionPolicy::Guarded);
        assert_eq!(
            multiples[0],
            Multiple::Undefined(UndefinedReason::ZeroDenominator)
        );
        assert_relative_eq!(multiples[1].value().unwrap(), 5.0);
    }

    #[test]
    fn test_zero_denominator_raw_propagates_infinity() {
        // Known edge case: the raw policy keeps the unguarded division.
        let cap = MarketCapLookup::Known(100.0);
        let multiples = forward_multiples(&cap, &[0.0, -0.0], 4.0, DivisionPolicy::Raw);
        assert_eq!(multiples[0].value(), Some(f64::INFINITY));
        assert_eq!(multiples[1].value(), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_missing_market_cap_guarded() {
        let cap = MarketCapLookup::Unavailable("HTTP 404".to_string());
        let multiples = forward_multiples(&cap, &[1.0, 2.0, 3.0], 4.0, DivisionPolicy::Guarded);
        assert_eq!(multiples.len(), 3);
        assert!(
            multiples
                .iter()
                .all(|m| *m == Multiple::Undefined(UndefinedReason::MarketCapUnavailable))
        );
    }

    #[test]
    fn test_missing_market_cap_raw_reads_zero() {
        let cap = MarketCapLookup::Unavailable("HTTP 404".to_string());
        let multiples = forward_multiples(&cap, &[10.0, 0.0], 4.0, DivisionPolicy::Raw);
        assert_eq!(multiples[0].value(), Some(0.0));
        assert!(multiples[1].value().unwrap().is_nan());
    }

    #[test]
    fn test_negative_earnings_give_negative_multiple() {
        let cap = MarketCapLookup::Known(400.0);
        let multiples = forward_multiples(&cap, &[-10.0], 4.0, DivisionPolicy::Guarded);
        assert_relative_eq!(multiples[0].value().unwrap(), -10.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Multiple::Defined(5.0).to_string(), "5.00");
        assert_eq!(
            Multiple::Undefined(UndefinedReason::NonFinite).to_string(),
            "n/a"
        );
        assert_eq!(Multiple::Defined(f64::INFINITY).to_string(), "inf");
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&vec![
            Multiple::Defined(2.5),
            Multiple::Undefined(UndefinedReason::ZeroDenominator),
        ])
        .unwrap();
        assert_eq!(json, r#"[2.5,"zero_denominator"]"#);
    }

    #[test]
    fn test_non_finite_ratios_survive_json() {
        let multiples = vec![
            Multiple::Defined(f64::INFINITY),
            Multiple::Defined(f64::NEG_INFINITY),
            Multiple::Defined(f64::NAN),
            Multiple::Defined(-1.5),
            Multiple::Undefined(UndefinedReason::MarketCapUnavailable),
        ];
        let json = serde_json::to_string(&multiples).unwrap();
        assert_eq!(
            json,
            r#"["inf","-inf","nan",-1.5,"market_cap_unavailable"]"#
        );

        let back: Vec<Multiple> = serde_json::from_str(&json).unwrap();
        assert_eq!(back[0], Multiple::Defined(f64::INFINITY));
        assert_eq!(back[1], Multiple::Defined(f64::NEG_INFINITY));
        assert!(back[2].value().unwrap().is_nan());
        assert_eq!(back[3], Multiple::Defined(-1.5));
        assert_eq!(back[4], multiples[4]);
    }

    #[test]
    fn test_unknown_text_is_rejected() {
        assert!(serde_json::from_str::<Multiple>(r#""infinite""#).is_err());
    }
}
