//! Aggregation configuration.

use crate::error::AggregateError;

/// Inclusive range of years defining the historical baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferencePeriod {
    start: i32,
    end: i32,
}

impl ReferencePeriod {
    /// Creates a reference period.
    ///
    /// # Errors
    ///
    /// Returns [`AggregateError::InvalidReference`] if `start > end`.
    pub fn new(start: i32, end: i32) -> Result<Self, AggregateError> {
        if start > end {
            return Err(AggregateError::InvalidReference { start, end });
        }
        Ok(Self { start, end })
    }

    /// First year of the period.
    pub fn start(&self) -> i32 {
        self.start
    }

    /// Last year of the period.
    pub fn end(&self) -> i32 {
        self.end
    }

    /// Returns `true` if `year` lies in the period.
    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

impl Default for ReferencePeriod {
    fn default() -> Self {
        Self {
            start: 1950,
            end: 1979,
        }
    }
}

/// How records are attributed to an aggregation year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearBasis {
    /// The record's calendar year.
    #[default]
    Calendar,
    /// The season year of a window starting in `start_month`: months from
    /// `start_month` onwards count towards the following year.
    Season {
        /// Month the season starts in (1..=12).
        start_month: u8,
    },
}

/// Configuration for [`aggregate_yearly`](crate::aggregate_yearly).
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateConfig {
    reference: ReferencePeriod,
    moving_average: usize,
    year_basis: YearBasis,
    risk_column: String,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            reference: ReferencePeriod::default(),
            moving_average: 7,
            year_basis: YearBasis::Calendar,
            risk_column: "risk".to_string(),
        }
    }
}

impl AggregateConfig {
    /// Set the historical reference period.
    pub fn with_reference(mut self, reference: ReferencePeriod) -> Self {
        self.reference = reference;
        self
    }

    /// Set the moving-average window in years.
    pub fn with_moving_average(mut self, years: usize) -> Self {
        self.moving_average = years;
        self
    }

    /// Set how records map to aggregation years.
    pub fn with_year_basis(mut self, basis: YearBasis) -> Self {
        self.year_basis = basis;
        self
    }

    /// Set the name of the derived risk column.
    pub fn with_risk_column(mut self, name: impl Into<String>) -> Self {
        self.risk_column = name.into();
        self
    }

    /// Returns the reference period.
    pub fn reference(&self) -> ReferencePeriod {
        self.reference
    }

    /// Returns the moving-average window.
    pub fn moving_average(&self) -> usize {
        self.moving_average
    }

    /// Returns the year basis.
    pub fn year_basis(&self) -> YearBasis {
        self.year_basis
    }

    /// Returns the derived risk column name.
    pub fn risk_column(&self) -> &str {
        &self.risk_column
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), AggregateError> {
        if self.moving_average == 0 {
            return Err(AggregateError::InvalidWindow { window: 0 });
        }
        if let YearBasis::Season { start_month } = self.year_basis
            && !(1..=12).contains(&start_month)
        {
            return Err(AggregateError::InvalidConfig {
                reason: format!("season start month must be 1..=12, got {start_month}"),
            });
        }
        if self.risk_column.is_empty() {
            return Err(AggregateError::InvalidConfig {
                reason: "risk column name must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
