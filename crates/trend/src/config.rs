//! Trend fitting configuration.

use agrorisk_aggregate::YearBasis;
use agrorisk_calendar::SeasonalWindow;

use crate::error::TrendError;

/// Configuration for [`fit_station_trends`](crate::fit_station_trends).
#[derive(Debug, Clone, PartialEq)]
pub struct TrendConfig {
    window: SeasonalWindow,
    baseline_year: i32,
    alpha: f64,
    hours: Option<Vec<u8>>,
    year_basis: YearBasis,
}

impl TrendConfig {
    /// Creates a configuration for one seasonal window with `alpha = 0.05`,
    /// no year offset, all hours and calendar years.
    pub fn new(window: SeasonalWindow) -> Self {
        Self {
            window,
            baseline_year: 0,
            alpha: 0.05,
            hours: None,
            year_basis: YearBasis::Calendar,
        }
    }

    /// Set the year subtracted from the regressor, so the intercept refers
    /// to that year.
    pub fn with_baseline_year(mut self, year: i32) -> Self {
        self.baseline_year = year;
        self
    }

    /// Set the significance level.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Restrict both sources to these hours of day before selection.
    pub fn with_hours(mut self, hours: Vec<u8>) -> Self {
        self.hours = Some(hours);
        self
    }

    /// Set how records are grouped into years.
    pub fn with_year_basis(mut self, basis: YearBasis) -> Self {
        self.year_basis = basis;
        self
    }

    /// Returns the seasonal window.
    pub fn window(&self) -> &SeasonalWindow {
        &self.window
    }

    /// Returns the baseline year.
    pub fn baseline_year(&self) -> i32 {
        self.baseline_year
    }

    /// Returns the significance level.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns the hour subset, if any.
    pub fn hours(&self) -> Option<&[u8]> {
        self.hours.as_deref()
    }

    /// Returns the year basis.
    pub fn year_basis(&self) -> YearBasis {
        self.year_basis
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), TrendError> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(TrendError::InvalidConfig {
                reason: format!("alpha must be in (0, 1), got {}", self.alpha),
            });
        }
        if let Some(hours) = &self.hours {
            if hours.is_empty() {
                return Err(TrendError::InvalidConfig {
                    reason: "hour subset must not be empty".to_string(),
                });
            }
            if let Some(h) = hours.iter().find(|&&h| h > 23) {
                return Err(TrendError::InvalidConfig {
                    reason: format!("hour {h} out of range 0..=23"),
                });
            }
        }
        if let YearBasis::Season { start_month } = self.year_basis
            && !(1..=12).contains(&start_month)
        {
            return Err(TrendError::InvalidConfig {
                reason: format!("season start month {start_month} out of range 1..=12"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summer() -> SeasonalWindow {
        SeasonalWindow::parse("01.06", "31.08").unwrap()
    }

    #[test]
    fn defaults() {
        let c = TrendConfig::new(summer());
        assert_eq!(c.alpha(), 0.05);
        assert_eq!(c.baseline_year(), 0);
        assert_eq!(c.hours(), None);
        assert_eq!(c.year_basis(), YearBasis::Calendar);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_bad_alpha() {
        for alpha in [0.0, 1.0, -0.1, f64::NAN] {
            assert!(TrendConfig::new(summer()).with_alpha(alpha).validate().is_err());
        }
    }

    #[test]
    fn rejects_bad_hours() {
        assert!(TrendConfig::new(summer()).with_hours(vec![]).validate().is_err());
        assert!(TrendConfig::new(summer()).with_hours(vec![3, 24]).validate().is_err());
        assert!(TrendConfig::new(summer()).with_hours(vec![3, 21]).validate().is_ok());
    }

    #[test]
    fn rejects_bad_season_start() {
        let c = TrendConfig::new(summer()).with_year_basis(YearBasis::Season { start_month: 13 });
        assert!(c.validate().is_err());
    }
}
