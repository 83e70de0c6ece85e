//! Recurring annual windows between two day/month boundaries.

use std::fmt;

use crate::day_month::DayMonth;
use crate::error::CalendarError;

/// A recurring annual interval from `start` to `end`, both inclusive.
///
/// When the start month comes after the end month the window wraps across
/// the December/January boundary (e.g. `01.10`..`31.05`, sowing to harvest).
/// Day trimming is calendar based: in the start month days before
/// `start.day()` are excluded, in the end month days after `end.day()` are
/// excluded, and every interior month is kept whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeasonalWindow {
    start: DayMonth,
    end: DayMonth,
}

impl SeasonalWindow {
    /// Creates a window from two validated boundaries.
    pub fn new(start: DayMonth, end: DayMonth) -> Self {
        Self { start, end }
    }

    /// Parses a window from two `dd.mm` strings.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError`] if either boundary is malformed or out of range.
    pub fn parse(start: &str, end: &str) -> Result<Self, CalendarError> {
        Ok(Self::new(start.parse()?, end.parse()?))
    }

    /// Returns the start boundary.
    pub fn start(&self) -> DayMonth {
        self.start
    }

    /// Returns the end boundary.
    pub fn end(&self) -> DayMonth {
        self.end
    }

    /// Returns `true` when the window crosses the year boundary.
    pub fn wraps(&self) -> bool {
        self.start.month() > self.end.month()
    }

    /// Ordered list of months touched by the window.
    pub fn months(&self) -> Vec<u8> {
        let (s, e) = (self.start.month(), self.end.month());
        if s <= e {
            (s..=e).collect()
        } else {
            (s..=12).chain(1..=e).collect()
        }
    }

    /// Returns `true` if a record on `day`.`month` falls inside the window.
    pub fn contains(&self, month: u8, day: u8) -> bool {
        let (s, e) = (self.start.month(), self.end.month());
        let in_months = if s <= e {
            (s..=e).contains(&month)
        } else {
            month >= s || month <= e
        };
        if !in_months || !(1..=12).contains(&month) {
            return false;
        }
        if month == s && day < self.start.day() {
            return false;
        }
        if month == e && day > self.end.day() {
            return false;
        }
        true
    }
}

impl fmt::Display for SeasonalWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(start: &str, end: &str) -> SeasonalWindow {
        SeasonalWindow::parse(start, end).unwrap()
    }

    #[test]
    fn months_single() {
        assert_eq!(window("05.03", "20.03").months(), vec![3]);
    }

    #[test]
    fn months_contiguous() {
        assert_eq!(window("01.06", "31.08").months(), vec![6, 7, 8]);
    }

    #[test]
    fn months_wrapping() {
        assert_eq!(
            window("01.10", "31.05").months(),
            vec![10, 11, 12, 1, 2, 3, 4, 5]
        );
    }

    #[test]
    fn wraps_flag() {
        assert!(window("01.10", "31.05").wraps());
        assert!(!window("01.06", "31.08").wraps());
        assert!(!window("01.06", "30.06").wraps());
    }

    #[test]
    fn contains_trims_boundary_days() {
        let w = window("15.06", "10.08");
        assert!(!w.contains(6, 14));
        assert!(w.contains(6, 15));
        assert!(w.contains(7, 1));
        assert!(w.contains(7, 31));
        assert!(w.contains(8, 10));
        assert!(!w.contains(8, 11));
        assert!(!w.contains(9, 1));
    }

    #[test]
    fn contains_wrapping_trims_by_calendar_day() {
        let w = window("20.10", "05.05");
        assert!(!w.contains(10, 19));
        assert!(w.contains(10, 20));
        assert!(w.contains(12, 31));
        assert!(w.contains(1, 1));
        assert!(w.contains(5, 5));
        assert!(!w.contains(5, 6));
        assert!(!w.contains(7, 15));
    }

    #[test]
    fn contains_same_month_applies_both_trims() {
        let w = window("10.03", "20.03");
        assert!(!w.contains(3, 9));
        assert!(w.contains(3, 10));
        assert!(w.contains(3, 20));
        assert!(!w.contains(3, 21));
    }

    #[test]
    fn inverted_days_in_one_month_select_nothing() {
        let w = window("20.03", "10.03");
        assert!((1..=31).all(|d| !w.contains(3, d)));
    }

    #[test]
    fn contains_rejects_out_of_range_month() {
        let w = window("01.01", "31.12");
        assert!(!w.contains(0, 1));
        assert!(!w.contains(13, 1));
    }

    #[test]
    fn parse_propagates_boundary_errors() {
        assert_eq!(
            SeasonalWindow::parse("01.00", "31.05").unwrap_err(),
            CalendarError::InvalidMonth { month: 0 }
        );
        assert_eq!(
            SeasonalWindow::parse("01.10", "32.05").unwrap_err(),
            CalendarError::InvalidDay { day: 32 }
        );
    }
}
