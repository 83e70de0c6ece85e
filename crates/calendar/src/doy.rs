//! Day-of-year newtype for the 365-day no-leap calendar.
//!
//! Phenological observations report stage dates as a day of year. Converting
//! them with a non-leap base year gives the `dd.mm` boundaries used by
//! seasonal windows.

use crate::day_month::DayMonth;
use crate::error::CalendarError;

/// Day-of-year in the 365-day no-leap calendar (1..=365).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Doy(u16);

/// Number of days in each month (index 0 unused, index 1 = January, ..., index 12 = December).
pub(crate) const DAYS_PER_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Day-of-year on which each month starts (index 0 unused, index 1 = January starts at DOY 1, ...).
pub(crate) const MONTH_START_DOY: [u16; 13] =
    [0, 1, 32, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

impl Doy {
    /// Creates a new `Doy` from a day-of-year value.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDoy`] if `doy` is not in 1..=365.
    pub fn new(doy: u16) -> Result<Self, CalendarError> {
        if !(1..=365).contains(&doy) {
            return Err(CalendarError::InvalidDoy { doy });
        }
        Ok(Self(doy))
    }

    /// Creates a `Doy` from a 1-based day count that may run past the end
    /// of the year, as if counting forward from 1 January of a non-leap year.
    ///
    /// Day 366 lands on 1 January, day 400 on 4 February.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDoy`] if `day` is zero.
    pub fn from_day_count(day: u32) -> Result<Self, CalendarError> {
        if day == 0 {
            return Err(CalendarError::InvalidDoy { doy: 0 });
        }
        Ok(Self(((day - 1) % 365) as u16 + 1))
    }

    /// Creates a new `Doy` from a (month, day) pair.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12.
    /// Returns [`CalendarError::DayOutOfMonth`] if `day` is not valid for the given month.
    pub fn from_month_day(month: u8, day: u8) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        let max_day = DAYS_PER_MONTH[month as usize];
        if !(1..=max_day).contains(&day) {
            return Err(CalendarError::DayOutOfMonth {
                day,
                month,
                max_day,
            });
        }
        Ok(Self(MONTH_START_DOY[month as usize] + day as u16 - 1))
    }

    /// Returns the inner day-of-year value (1..=365).
    pub fn get(self) -> u16 {
        self.0
    }

    /// Returns the `(month, day)` pair for this day-of-year.
    pub fn month_day(self) -> (u8, u8) {
        let month = (1..=12u8)
            .rev()
            .find(|&m| MONTH_START_DOY[m as usize] <= self.0)
            .unwrap_or(1);
        let day = (self.0 - MONTH_START_DOY[month as usize] + 1) as u8;
        (month, day)
    }

    /// Returns this day-of-year as a window boundary.
    pub fn day_month(self) -> DayMonth {
        let (month, day) = self.month_day();
        DayMonth::from_valid(day, month)
    }
}
