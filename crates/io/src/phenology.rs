//! Phenological observation tables and stage dates.

use std::path::Path;

use agrorisk_calendar::{DayMonth, Doy};
use agrorisk_stats::quantile_type7;
use tracing::info;

use crate::error::IoError;

/// One phenological observation: a station saw a crop reach a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhenologyRecord {
    /// Observation year (`Referenzjahr`).
    pub year: i32,
    /// Phase identifier (`Phase_id`), e.g. 24 for harvest.
    pub phase: u16,
    /// Day of year the phase was entered (`Jultag`).
    pub day_of_year: u16,
}

/// Read a `;`-separated phenology table with `Referenzjahr`, `Phase_id` and
/// `Jultag` columns. Header names are trimmed; other columns are ignored.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`], [`IoError::MissingColumn`], or
/// [`IoError::Validation`] listing unparsable rows.
pub fn read_phenology(path: &Path) -> Result<Vec<PhenologyRecord>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| IoError::MissingColumn {
                name: name.to_string(),
                path: path.to_path_buf(),
            })
    };
    let (year_idx, phase_idx, day_idx) = (find("Referenzjahr")?, find("Phase_id")?, find("Jultag")?);

    let mut records = Vec::new();
    let mut errors = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let get = |i: usize| record.get(i).unwrap_or("").trim();
        let parsed = (
            get(year_idx).parse::<i32>(),
            get(phase_idx).parse::<u16>(),
            get(day_idx).parse::<u16>(),
        );
        match parsed {
            (Ok(year), Ok(phase), Ok(day_of_year)) => records.push(PhenologyRecord {
                year,
                phase,
                day_of_year,
            }),
            _ => errors.push(format!("line {}: malformed phenology row", row + 2)),
        }
    }
    if !errors.is_empty() {
        return Err(IoError::validation(errors));
    }
    info!(path = %path.display(), records = records.len(), "read phenology table");
    Ok(records)
}

/// The calendar date by which fraction `quantile` of observations had
/// reached `phase`.
///
/// The type-7 quantile of the day-of-year values is truncated to a whole
/// day and converted on a non-leap calendar; day 366 wraps to 1 January.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if `quantile` is outside `[0, 1]`,
/// [`IoError::NoData`] if no record has this phase, and
/// [`IoError::Calendar`] for a zero day of year.
pub fn stage_date_quantile(
    records: &[PhenologyRecord],
    phase: u16,
    quantile: f64,
) -> Result<DayMonth, IoError> {
    if !(0.0..=1.0).contains(&quantile) {
        return Err(IoError::Validation {
            count: 1,
            details: format!("quantile must be in [0, 1], got {quantile}"),
        });
    }
    let mut days: Vec<f64> = records
        .iter()
        .filter(|r| r.phase == phase)
        .map(|r| f64::from(r.day_of_year))
        .collect();
    if days.is_empty() {
        return Err(IoError::NoData {
            reason: format!("no observations for phase {phase}"),
        });
    }
    days.sort_by(f64::total_cmp);
    let day = quantile_type7(&days, quantile).trunc() as u32;
    Ok(Doy::from_day_count(day)?.day_month())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(phase: u16, day_of_year: u16) -> PhenologyRecord {
        PhenologyRecord {
            year: 2000,
            phase,
            day_of_year,
        }
    }

    #[test]
    fn median_harvest_date() {
        let records = [rec(24, 250), rec(24, 260), rec(24, 270), rec(10, 100)];
        let date = stage_date_quantile(&records, 24, 0.5).unwrap();
        assert_eq!(date.to_string(), "17.09");
    }

    #[test]
    fn quantile_is_truncated() {
        // 0.9 quantile of [250, 260] is 259.
        let records = [rec(24, 250), rec(24, 260)];
        assert_eq!(stage_date_quantile(&records, 24, 0.9).unwrap().to_string(), "16.09");
    }

    #[test]
    fn day_366_wraps_to_new_year() {
        let records = [rec(24, 366)];
        assert_eq!(stage_date_quantile(&records, 24, 1.0).unwrap().to_string(), "01.01");
    }

    #[test]
    fn missing_phase_is_no_data() {
        assert!(matches!(
            stage_date_quantile(&[rec(10, 100)], 24, 0.5),
            Err(IoError::NoData { .. })
        ));
    }

    #[test]
    fn quantile_out_of_range() {
        assert!(matches!(
            stage_date_quantile(&[rec(24, 100)], 24, 1.5),
            Err(IoError::Validation { .. })
        ));
    }
}
