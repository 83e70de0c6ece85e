//! Closed set of built-in transforms.

use serde::Serialize;

use crate::humidity::ExponentialHumidity;
use crate::temperature::{BetaTemperature, TemperatureBand};
use crate::threshold::Threshold;
use crate::transform::{Identity, RiskTransform};

/// Any of the built-in transforms, selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Transform {
    /// Beta-shaped temperature response.
    BetaTemperature(BetaTemperature),
    /// Exponential humidity response.
    ExponentialHumidity(ExponentialHumidity),
    /// Binary threshold indicator.
    Threshold(Threshold),
    /// Optimal temperature band indicator.
    TemperatureBand(TemperatureBand),
    /// Raw value pass-through.
    Identity,
}

impl RiskTransform for Transform {
    fn apply(&self, value: f64) -> f64 {
        match self {
            Self::BetaTemperature(t) => t.apply(value),
            Self::ExponentialHumidity(t) => t.apply(value),
            Self::Threshold(t) => t.apply(value),
            Self::TemperatureBand(t) => t.apply(value),
            Self::Identity => Identity.apply(value),
        }
    }

    fn label(&self) -> String {
        match self {
            Self::BetaTemperature(t) => t.label(),
            Self::ExponentialHumidity(t) => t.label(),
            Self::Threshold(t) => t.label(),
            Self::TemperatureBand(t) => t.label(),
            Self::Identity => Identity.label(),
        }
    }
}

impl From<BetaTemperature> for Transform {
    fn from(t: BetaTemperature) -> Self {
        Self::BetaTemperature(t)
    }
}

impl From<ExponentialHumidity> for Transform {
    fn from(t: ExponentialHumidity) -> Self {
        Self::ExponentialHumidity(t)
    }
}

impl From<Threshold> for Transform {
    fn from(t: Threshold) -> Self {
        Self::Threshold(t)
    }
}

impl From<TemperatureBand> for Transform {
    fn from(t: TemperatureBand) -> Self {
        Self::TemperatureBand(t)
    }
}
