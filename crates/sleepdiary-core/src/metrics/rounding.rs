//! Rounding policy for efficiency percentages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How computed percentages are rounded before they are stored.
///
/// Both policies round ties away from zero, so a given input always produces
/// the same output regardless of platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingPolicy {
    /// Whole percentages: `91.304 -> 91`.
    #[serde(alias = "integer", alias = "int")]
    NearestInteger,
    /// Two digits after the decimal point: `91.304 -> 91.3`, `93.333 -> 93.33`.
    ///
    /// Keeps the sub-integer precision that multi-day averages need.
    #[default]
    #[serde(alias = "2sf")]
    TwoSigFigs,
}

impl RoundingPolicy {
    /// Round an already computed `value` according to this policy.
    ///
    /// Works on the binary float, so a decimal tie that is not exactly
    /// representable may round down. Use [`apply_ratio`](Self::apply_ratio)
    /// when the percentage comes from integer minutes. NaN and infinities are
    /// returned unchanged.
    pub fn apply(self, value: f64) -> f64 {
        if !value.is_finite() {
            return value;
        }
        match self {
            Self::NearestInteger => value.round(),
            Self::TwoSigFigs => (value * 100.0).round() / 100.0,
        }
    }

    /// Round the percentage `100 * numerator / denominator`.
    ///
    /// Divides in integers, so exact decimal ties such as `23 / 4000` (0.575%)
    /// round away from zero. A zero denominator gives `0.0`.
    pub fn apply_ratio(self, numerator: u64, denominator: u64) -> f64 {
        if denominator == 0 {
            return 0.0;
        }
        let scale: u128 = match self {
            Self::NearestInteger => 100,
            Self::TwoSigFigs => 10_000,
        };
        let n = u128::from(numerator);
        let d = u128::from(denominator);
        let steps = (2 * scale * n + d) / (2 * d);
        match self {
            Self::NearestInteger => steps as f64,
            Self::TwoSigFigs => steps as f64 / 100.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NearestInteger => "nearest-integer",
            Self::TwoSigFigs => "two-sig-figs",
        }
    }
}

impl fmt::Display for RoundingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoundingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "nearest-integer" | "integer" | "int" => Ok(Self::NearestInteger),
            "two-sig-figs" | "2sf" => Ok(Self::TwoSigFigs),
            other => Err(format!(
                "unknown rounding policy '{other}' (expected nearest-integer or two-sig-figs)"
            )),
        }
    }
}
