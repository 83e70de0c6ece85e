//! Relative-humidity response.

use serde::Serialize;

use crate::error::RiskError;
use crate::transform::RiskTransform;

/// Exponential humidity response `base^(100 - min(rh, 100)) / base^0`,
/// normalised to the response of saturated air.
///
/// Saturated air scores 1 and every percentage point below saturation
/// multiplies the score by `base`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExponentialHumidity {
    base: f64,
}

impl ExponentialHumidity {
    /// Creates a response with the given per-percent decay base.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidParameter`] unless `0 < base <= 1`.
    pub fn new(base: f64) -> Result<Self, RiskError> {
        if !(base > 0.0 && base <= 1.0) {
            return Err(RiskError::InvalidParameter {
                reason: format!("humidity base must be in (0, 1], got {base}"),
            });
        }
        Ok(Self { base })
    }

    /// Per-percent decay base.
    pub fn base(&self) -> f64 {
        self.base
    }
}

impl Default for ExponentialHumidity {
    fn default() -> Self {
        Self { base: 0.85 }
    }
}

impl RiskTransform for ExponentialHumidity {
    fn apply(&self, rh: f64) -> f64 {
        if rh.is_nan() {
            return 0.0;
        }
        let saturated = self.base.powf(0.0);
        self.base.powf(100.0 - rh.min(100.0)) / saturated
    }

    fn label(&self) -> String {
        "exponential-humidity".to_string()
    }
}
