//! Season-year attribution for windows that wrap the year boundary.

use crate::error::CalendarError;

/// Returns the season a record belongs to, labelled by the calendar year in
/// which the season ends.
///
/// For a window starting in `start_month` and wrapping into the next year,
/// records from `start_month` onward belong to the *next* year's season, so
/// October 2000 to May 2001 is season 2001. With `start_month = 1` this is
/// the calendar year.
///
/// # Errors
///
/// Returns [`CalendarError::InvalidMonth`] if `month` or `start_month` is
/// outside 1..=12.
///
/// # Examples
///
/// ```
/// use agrorisk_calendar::season_year;
///
/// assert_eq!(season_year(2000, 10, 10).unwrap(), 2001);
/// assert_eq!(season_year(2001, 5, 10).unwrap(), 2001);
/// assert_eq!(season_year(2000, 6, 1).unwrap(), 2000);
/// ```
pub fn season_year(year: i32, month: u8, start_month: u8) -> Result<i32, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth { month });
    }
    if !(1..=12).contains(&start_month) {
        return Err(CalendarError::InvalidMonth { month: start_month });
    }
    if start_month > 1 && month >= start_month {
        Ok(year + 1)
    } else {
        Ok(year)
    }
}
