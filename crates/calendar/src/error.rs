//! Error types for the agrorisk-calendar crate.

/// Error type for all fallible operations in the agrorisk-calendar crate.
///
/// Every variant describes malformed window or date configuration. None of
/// them is raised for sparse data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[allow(clippy::enum_variant_names)]
pub enum CalendarError {
    /// Returned when a day value is outside the range 1..=31.
    #[error("invalid day: {day} (must be 1..=31)")]
    InvalidDay {
        /// The invalid day value that was provided.
        day: u8,
    },

    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u8,
    },

    /// Returned when a day number exceeds the length of its month in the
    /// 365-day no-leap calendar.
    #[error("invalid day: {day} for month {month} (max {max_day})")]
    DayOutOfMonth {
        /// The invalid day number that was provided.
        day: u8,
        /// The month for which the day is invalid.
        month: u8,
        /// The maximum valid day for the given month.
        max_day: u8,
    },

    /// Returned when a day-of-year value is outside the valid range 1..=365.
    #[error("invalid day of year: {doy} (must be 1..=365)")]
    InvalidDoy {
        /// The invalid day-of-year value that was provided.
        doy: u16,
    },

    /// Returned when a `dd.mm` boundary string cannot be parsed.
    #[error("cannot parse '{input}' as dd.mm")]
    Parse {
        /// The text that failed to parse.
        input: String,
    },
}
