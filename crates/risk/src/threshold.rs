//! Binary threshold indicators.

use std::fmt;

use serde::Serialize;

use crate::error::RiskError;
use crate::transform::RiskTransform;

/// Comparison applied by a [`Threshold`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Comparison {
    /// `value >= threshold`
    AtLeast,
    /// `value > threshold`
    Above,
    /// `value <= threshold`
    AtMost,
    /// `value < threshold`
    Below,
}

impl Comparison {
    fn holds(self, value: f64, threshold: f64) -> bool {
        match self {
            Self::AtLeast => value >= threshold,
            Self::Above => value > threshold,
            Self::AtMost => value <= threshold,
            Self::Below => value < threshold,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AtLeast => ">=",
            Self::Above => ">",
            Self::AtMost => "<=",
            Self::Below => "<",
        })
    }
}

/// Scores 1 when the comparison holds and 0 otherwise (NaN scores 0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Threshold {
    threshold: f64,
    comparison: Comparison,
}

impl Threshold {
    /// Creates an indicator.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidParameter`] if `threshold` is not finite.
    pub fn new(threshold: f64, comparison: Comparison) -> Result<Self, RiskError> {
        if !threshold.is_finite() {
            return Err(RiskError::InvalidParameter {
                reason: format!("threshold must be finite, got {threshold}"),
            });
        }
        Ok(Self {
            threshold,
            comparison,
        })
    }

    /// Leaf wetness proxy: relative humidity at or above `threshold` percent.
    pub fn leaf_wetness(threshold: f64) -> Result<Self, RiskError> {
        Self::new(threshold, Comparison::AtLeast)
    }

    /// Dry hours: relative humidity at or below `threshold` percent.
    pub fn dryness(threshold: f64) -> Result<Self, RiskError> {
        Self::new(threshold, Comparison::AtMost)
    }

    /// Near-saturation hours: dew-point depression at or below `threshold` K.
    pub fn dew_point_depression(threshold: f64) -> Result<Self, RiskError> {
        Self::new(threshold, Comparison::AtMost)
    }

    /// The threshold value.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The comparison.
    pub fn comparison(&self) -> Comparison {
        self.comparison
    }
}

impl RiskTransform for Threshold {
    fn apply(&self, value: f64) -> f64 {
        if self.comparison.holds(value, self.threshold) {
            1.0
        } else {
            0.0
        }
    }

    fn label(&self) -> String {
        format!("{}{}", self.comparison, self.threshold)
    }
}
