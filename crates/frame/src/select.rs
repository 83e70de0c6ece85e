//! Seasonal window selection and record subsetting.

use std::collections::BTreeSet;

use agrorisk_calendar::SeasonalWindow;
use tracing::debug;

use crate::error::FrameError;
use crate::frame::StationFrame;
use crate::station::StationId;

impl StationFrame {
    /// Returns the records that fall inside a seasonal window.
    ///
    /// Records are kept when their month lies in the window's month set; in
    /// the start month days before the start day are dropped and in the end
    /// month days after the end day are dropped. The input is not modified.
    pub fn select_window(&self, window: &SeasonalWindow) -> StationFrame {
        let out = self.filter(|k| window.contains(k.month, k.day));
        debug!(
            window = %window,
            rows_in = self.len(),
            rows_out = out.len(),
            "selected seasonal window"
        );
        out
    }

    /// Returns the records of one station.
    pub fn filter_station(&self, station: &StationId) -> StationFrame {
        self.filter(|k| k.station == station)
    }

    /// Returns the records measured at one of `hours`.
    pub fn filter_hours(&self, hours: &[u8]) -> StationFrame {
        self.filter(|k| hours.contains(&k.hour))
    }

    /// Returns the records with `start <= year <= end`.
    pub fn filter_years(&self, start: i32, end: i32) -> StationFrame {
        self.filter(|k| (start..=end).contains(&k.year))
    }

    /// Distinct station identifiers in ascending order.
    pub fn station_ids(&self) -> Vec<StationId> {
        self.stations()
            .iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Distinct years in ascending order.
    pub fn distinct_years(&self) -> Vec<i32> {
        self.years()
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Selects the records between two `dd.mm` boundaries, inclusive.
///
/// # Errors
///
/// Returns [`FrameError::InvalidWindow`] if either boundary is malformed
/// or out of range.
///
/// # Example
///
/// ```
/// use agrorisk_frame::{StationFrame, StationId, select_window};
///
/// let s = StationId::new("1550").unwrap();
/// let frame = StationFrame::new(
///     vec![s.clone(), s.clone(), s],
///     vec![2001, 2001, 2001],
///     vec![5, 6, 9],
///     vec![31, 1, 1],
///     vec![12, 12, 12],
///     vec![("TT_TU".to_string(), vec![Some(14.0), Some(17.5), Some(12.0)])],
/// )
/// .unwrap();
///
/// let summer = select_window(&frame, "01.06", "31.08").unwrap();
/// assert_eq!(summer.len(), 1);
/// assert_eq!(summer.months(), &[6]);
/// ```
pub fn select_window(
    frame: &StationFrame,
    start: &str,
    end: &str,
) -> Result<StationFrame, FrameError> {
    let window = SeasonalWindow::parse(start, end)?;
    Ok(frame.select_window(&window))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sid(s: &str) -> StationId {
        StationId::new(s).unwrap()
    }

    fn two_stations() -> StationFrame {
        StationFrame::new(
            vec![sid("2"), sid("1"), sid("2"), sid("1")],
            vec![2000, 2000, 2001, 2002],
            vec![1, 1, 12, 12],
            vec![15, 15, 1, 31],
            vec![3, 6, 9, 21],
            vec![("v".to_string(), vec![Some(1.0), Some(2.0), Some(3.0), None])],
        )
        .unwrap()
    }

    #[test]
    fn station_ids_are_sorted_and_distinct() {
        assert_eq!(two_stations().station_ids(), vec![sid("1"), sid("2")]);
    }

    #[test]
    fn filter_station_keeps_order() {
        let f = two_stations().filter_station(&sid("2"));
        assert_eq!(f.years(), &[2000, 2001]);
    }

    #[test]
    fn filter_hours_subset() {
        let f = two_stations().filter_hours(&[3, 9, 15]);
        assert_eq!(f.hours(), &[3, 9]);
    }

    #[test]
    fn filter_years_inclusive() {
        let f = two_stations().filter_years(2001, 2002);
        assert_eq!(f.len(), 2);
        assert_eq!(two_stations().distinct_years(), vec![2000, 2001, 2002]);
    }

    #[test]
    fn wrapping_window_trims_both_ends() {
        let f = two_stations();
        let out = select_window(&f, "10.12", "15.01").unwrap();
        assert_eq!(out.months(), &[1, 1, 12]);
        assert_eq!(out.days(), &[15, 15, 31]);
    }

    #[test]
    fn malformed_boundary_is_invalid_window() {
        let err = select_window(&two_stations(), "32.01", "01.02").unwrap_err();
        assert!(matches!(err, FrameError::InvalidWindow(_)));
    }

    #[test]
    fn input_is_not_mutated() {
        let f = two_stations();
        let before = f.clone();
        let _ = select_window(&f, "01.06", "31.08").unwrap();
        assert_eq!(f, before);
    }
}
