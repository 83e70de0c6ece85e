//! Day/month boundary of a recurring annual interval.

use std::fmt;
use std::str::FromStr;

use crate::error::CalendarError;

/// A `(day, month)` pair without a year, e.g. `01.10` for 1 October.
///
/// Only range checks are applied (day 1..=31, month 1..=12). Combinations
/// such as 30 February are accepted; a window boundary on such a day simply
/// trims nothing beyond the month's real last day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayMonth {
    day: u8,
    month: u8,
}

impl DayMonth {
    /// Creates a new boundary from a day and a month.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDay`] if `day` is outside 1..=31 and
    /// [`CalendarError::InvalidMonth`] if `month` is outside 1..=12.
    pub fn new(day: u8, month: u8) -> Result<Self, CalendarError> {
        if !(1..=31).contains(&day) {
            return Err(CalendarError::InvalidDay { day });
        }
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        Ok(Self { day, month })
    }

    /// Callers guarantee `day` and `month` are in range.
    pub(crate) const fn from_valid(day: u8, month: u8) -> Self {
        Self { day, month }
    }

    /// Returns the day within the month (1..=31).
    pub fn day(self) -> u8 {
        self.day
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u8 {
        self.month
    }
}

impl FromStr for DayMonth {
    type Err = CalendarError;

    /// Parses `dd.mm` (leading zeros optional, surrounding whitespace ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = || CalendarError::Parse {
            input: s.to_string(),
        };
        let (day, month) = s.trim().split_once('.').ok_or_else(parse_err)?;
        let day: u8 = day.trim().parse().map_err(|_| parse_err())?;
        let month: u8 = month.trim().parse().map_err(|_| parse_err())?;
        Self::new(day, month)
    }
}

impl fmt::Display for DayMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:02}", self.day, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_valid_bounds() {
        assert!(DayMonth::new(1, 1).is_ok());
        assert!(DayMonth::new(31, 12).is_ok());
    }

    #[test]
    fn new_accepts_loose_calendar_days() {
        let dm = DayMonth::new(30, 2).unwrap();
        assert_eq!((dm.day(), dm.month()), (30, 2));
    }

    #[test]
    fn new_rejects_day_zero_and_32() {
        assert_eq!(
            DayMonth::new(0, 5).unwrap_err(),
            CalendarError::InvalidDay { day: 0 }
        );
        assert_eq!(
            DayMonth::new(32, 5).unwrap_err(),
            CalendarError::InvalidDay { day: 32 }
        );
    }

    #[test]
    fn new_rejects_month_out_of_range() {
        assert_eq!(
            DayMonth::new(1, 0).unwrap_err(),
            CalendarError::InvalidMonth { month: 0 }
        );
        assert_eq!(
            DayMonth::new(1, 13).unwrap_err(),
            CalendarError::InvalidMonth { month: 13 }
        );
    }

    #[test]
    fn parse_dd_mm() {
        let dm: DayMonth = "01.06".parse().unwrap();
        assert_eq!(dm, DayMonth::new(1, 6).unwrap());
        let dm: DayMonth = " 5.10 ".parse().unwrap();
        assert_eq!(dm, DayMonth::new(5, 10).unwrap());
    }

    #[test]
    fn parse_rejects_garbage() {
        for bad in ["", "0106", "aa.bb", "01.", ".06", "1.2.3"] {
            assert!(
                matches!(bad.parse::<DayMonth>(), Err(CalendarError::Parse { .. })),
                "expected parse error for {bad:?}"
            );
        }
    }

    #[test]
    fn parse_range_checks_after_parsing() {
        assert_eq!(
            "31.13".parse::<DayMonth>().unwrap_err(),
            CalendarError::InvalidMonth { month: 13 }
        );
    }

    #[test]
    fn display_zero_pads() {
        assert_eq!(DayMonth::new(1, 6).unwrap().to_string(), "01.06");
        assert_eq!(DayMonth::new(31, 12).unwrap().to_string(), "31.12");
    }
}
