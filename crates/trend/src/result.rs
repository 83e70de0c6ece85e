//! Per-station trend results.

use std::collections::BTreeMap;
use std::fmt;

use agrorisk_frame::{Coordinates, StationId};
use agrorisk_stats::LinearFit;
use serde::Serialize;

/// Verdict on the direction and significance of a station's trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TrendClass {
    /// Positive slope with `p < alpha`.
    #[serde(rename = "significant")]
    SignificantIncreasing,
    /// Negative slope with `p < alpha`.
    #[serde(rename = "significant but decreasing risk")]
    SignificantDecreasing,
    /// `p >= alpha`, or a zero slope.
    #[serde(rename = "non-significant")]
    NonSignificant,
    /// Too few years or a constant regressor; no fit is possible.
    #[serde(rename = "undetermined")]
    Undetermined,
}

impl TrendClass {
    /// Classifies a fit at significance level `alpha`.
    pub fn from_fit(fit: Option<&LinearFit>, alpha: f64) -> Self {
        let Some(fit) = fit else {
            return Self::Undetermined;
        };
        if fit.p_value < alpha && fit.slope > 0.0 {
            Self::SignificantIncreasing
        } else if fit.p_value < alpha && fit.slope < 0.0 {
            Self::SignificantDecreasing
        } else {
            Self::NonSignificant
        }
    }
}

impl fmt::Display for TrendClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SignificantIncreasing => "significant",
            Self::SignificantDecreasing => "significant but decreasing risk",
            Self::NonSignificant => "non-significant",
            Self::Undetermined => "undetermined",
        })
    }
}

/// Regression of one station's yearly risk against time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationTrend {
    /// Station identifier.
    pub station: StationId,
    /// Years with a defined yearly risk that entered the fit.
    pub n_years: usize,
    /// Slope per year; `None` when undetermined.
    pub slope: Option<f64>,
    /// Intercept at the baseline year; `None` when undetermined.
    pub intercept: Option<f64>,
    /// Pearson correlation; `None` when undetermined.
    pub r_value: Option<f64>,
    /// Two-sided p-value; `None` when undetermined.
    pub p_value: Option<f64>,
    /// Standard error of the slope; `None` when undetermined.
    pub std_err: Option<f64>,
    /// Verdict.
    pub class: TrendClass,
    /// Station location, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl StationTrend {
    pub(crate) fn new(station: StationId, n_years: usize, fit: Option<LinearFit>, alpha: f64) -> Self {
        Self {
            station,
            n_years,
            slope: fit.map(|f| f.slope),
            intercept: fit.map(|f| f.intercept),
            r_value: fit.map(|f| f.r_value),
            p_value: fit.map(|f| f.p_value),
            std_err: fit.map(|f| f.std_err),
            class: TrendClass::from_fit(fit.as_ref(), alpha),
            coordinates: None,
        }
    }
}

/// Attaches known coordinates to each trend; stations without an entry
/// are left unchanged.
pub fn attach_coordinates(
    trends: &mut [StationTrend],
    coordinates: &BTreeMap<StationId, Coordinates>,
) {
    for trend in trends {
        if let Some(c) = coordinates.get(&trend.station) {
            trend.coordinates = Some(c.clone());
        }
    }
}
