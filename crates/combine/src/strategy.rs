//! Composite risk strategies.

use std::fmt;
use std::str::FromStr;

use crate::error::CombineError;

/// How two per-record risks merge into one composite value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    /// `primary * secondary`.
    Product,
    /// Geometric mean `sqrt(primary * secondary)`.
    SqrtProduct,
    /// The primary risk when the secondary raw value is strictly above
    /// `threshold`, otherwise 0.
    ThresholdGated {
        /// Gate on the secondary raw value.
        threshold: f64,
    },
}

impl Strategy {
    /// Gate used by the `ltrh80` preset.
    pub const LTRH80: Self = Self::ThresholdGated { threshold: 80.0 };
    /// Gate used by the `ltrh90` preset.
    pub const LTRH90: Self = Self::ThresholdGated { threshold: 90.0 };
}

impl FromStr for Strategy {
    type Err = CombineError;

    /// Parses `product`, `sqrt` / `sqrt-product`, `ltrh80`, `ltrh90` or
    /// `threshold-gated:<value>` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || CombineError::UnknownStrategy {
            name: s.to_string(),
        };
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "product" => Ok(Self::Product),
            "sqrt" | "sqrt-product" => Ok(Self::SqrtProduct),
            "ltrh80" => Ok(Self::LTRH80),
            "ltrh90" => Ok(Self::LTRH90),
            other => {
                let value = other.strip_prefix("threshold-gated:").ok_or_else(unknown)?;
                let threshold: f64 = value.trim().parse().map_err(|_| unknown())?;
                if !threshold.is_finite() {
                    return Err(unknown());
                }
                Ok(Self::ThresholdGated { threshold })
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Product => f.write_str("product"),
            Self::SqrtProduct => f.write_str("sqrt-product"),
            Self::ThresholdGated { threshold } => write!(f, "threshold-gated:{threshold}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_presets() {
        assert_eq!("product".parse::<Strategy>().unwrap(), Strategy::Product);
        assert_eq!("sqrt".parse::<Strategy>().unwrap(), Strategy::SqrtProduct);
        assert_eq!("Sqrt-Product".parse::<Strategy>().unwrap(), Strategy::SqrtProduct);
        assert_eq!(
            "LTRH80".parse::<Strategy>().unwrap(),
            Strategy::ThresholdGated { threshold: 80.0 }
        );
        assert_eq!("ltrh90".parse::<Strategy>().unwrap(), Strategy::LTRH90);
    }

    #[test]
    fn parses_custom_threshold() {
        assert_eq!(
            "threshold-gated:87.5".parse::<Strategy>().unwrap(),
            Strategy::ThresholdGated { threshold: 87.5 }
        );
    }

    #[test]
    fn rejects_unknown_names() {
        for name in ["", "sum", "ltrh85", "threshold-gated:", "threshold-gated:nan"] {
            assert_eq!(
                name.parse::<Strategy>().unwrap_err(),
                CombineError::UnknownStrategy {
                    name: name.to_string()
                },
            );
        }
    }

    #[test]
    fn display_parses_back() {
        for s in [Strategy::Product, Strategy::SqrtProduct, Strategy::LTRH80] {
            assert_eq!(s.to_string().parse::<Strategy>().unwrap(), s);
        }
    }
}
