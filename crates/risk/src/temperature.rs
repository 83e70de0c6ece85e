//! Temperature response curves.

use serde::Serialize;

use crate::error::RiskError;
use crate::transform::RiskTransform;

/// Beta-shaped development response to air temperature (Fusarium head blight).
///
/// With `teq = (t - t_min) / (t_max - t_min)` the response is
/// `teq^b * (1 - teq)^c`, scaled so that its maximum, reached at
/// `teq = b / (b + c)`, equals 1. Temperatures at or outside
/// `[t_min, t_max]` score 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BetaTemperature {
    t_min: f64,
    t_max: f64,
    b: f64,
    c: f64,
    #[serde(skip)]
    scale: f64,
}

impl BetaTemperature {
    /// Creates a curve with explicit cardinal temperatures and shape exponents.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidParameter`] unless all parameters are
    /// finite, `t_min < t_max`, and `b`, `c` are positive.
    pub fn new(t_min: f64, t_max: f64, b: f64, c: f64) -> Result<Self, RiskError> {
        if ![t_min, t_max, b, c].iter().all(|v| v.is_finite()) {
            return Err(RiskError::InvalidParameter {
                reason: format!(
                    "beta temperature parameters must be finite, got t_min={t_min}, t_max={t_max}, b={b}, c={c}"
                ),
            });
        }
        if t_min >= t_max {
            return Err(RiskError::InvalidParameter {
                reason: format!("t_min ({t_min}) must be < t_max ({t_max})"),
            });
        }
        if b <= 0.0 || c <= 0.0 {
            return Err(RiskError::InvalidParameter {
                reason: format!("shape exponents must be > 0, got b={b}, c={c}"),
            });
        }
        Ok(Self {
            t_min,
            t_max,
            b,
            c,
            scale: beta_scale(b, c),
        })
    }

    /// Lower cardinal temperature.
    pub fn t_min(&self) -> f64 {
        self.t_min
    }

    /// Upper cardinal temperature.
    pub fn t_max(&self) -> f64 {
        self.t_max
    }

    /// Temperature at which the response peaks.
    pub fn optimum(&self) -> f64 {
        self.t_min + (self.t_max - self.t_min) * self.b / (self.b + self.c)
    }
}

impl Default for BetaTemperature {
    /// Fusarium parameters: 5 to 30 °C, `b = 17.2`, `c = 10.5`.
    fn default() -> Self {
        Self {
            t_min: 5.0,
            t_max: 30.0,
            b: 17.2,
            c: 10.5,
            scale: beta_scale(17.2, 10.5),
        }
    }
}

/// Reciprocal of the curve maximum, attained at `teq = b / (b + c)`.
fn beta_scale(b: f64, c: f64) -> f64 {
    let mode = b / (b + c);
    1.0 / (mode.powf(b) * (1.0 - mode).powf(c))
}

impl RiskTransform for BetaTemperature {
    fn apply(&self, t: f64) -> f64 {
        // NaN fails both comparisons and falls through to 0.
        if !(t > self.t_min && t < self.t_max) {
            return 0.0;
        }
        let teq = (t - self.t_min) / (self.t_max - self.t_min);
        (teq.powf(self.b) * (1.0 - teq).powf(self.c) * self.scale).min(1.0)
    }

    fn label(&self) -> String {
        "beta-temperature".to_string()
    }
}

/// Optimal-temperature indicator: 1 inside `[min, max]`, else 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureBand {
    min: f64,
    max: f64,
}

impl TemperatureBand {
    /// Creates a band.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidParameter`] if either bound is not finite
    /// or `min > max`.
    pub fn new(min: f64, max: f64) -> Result<Self, RiskError> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(RiskError::InvalidParameter {
                reason: format!("temperature band requires finite min <= max, got {min}..{max}"),
            });
        }
        Ok(Self { min, max })
    }

    /// Lower bound (inclusive).
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound (inclusive).
    pub fn max(&self) -> f64 {
        self.max
    }
}

impl RiskTransform for TemperatureBand {
    fn apply(&self, t: f64) -> f64 {
        if t >= self.min && t <= self.max { 1.0 } else { 0.0 }
    }

    fn label(&self) -> String {
        format!("optimal-temperature {}-{}", self.min, self.max)
    }
}
