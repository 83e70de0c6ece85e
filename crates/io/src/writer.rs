//! CSV export of risk series and trend tables.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use agrorisk_aggregate::LabeledSeries;
use agrorisk_trend::StationTrend;
use tracing::info;

use crate::error::IoError;

/// Write labelled series in wide format: a `year` column followed by one
/// column per series label. Years are the sorted union over all series;
/// missing values are written as empty cells.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if a series has mismatched lengths or
/// two series share a label, and [`IoError::Csv`] on write failure.
pub fn write_series_csv(path: &Path, series: &[LabeledSeries]) -> Result<(), IoError> {
    let mut errors = Vec::new();
    let mut labels = BTreeSet::new();
    for s in series {
        if s.years.len() != s.values.len() {
            errors.push(format!(
                "series '{}' has {} years but {} values",
                s.label,
                s.years.len(),
                s.values.len()
            ));
        }
        if !labels.insert(s.label.as_str()) {
            errors.push(format!("duplicate series label '{}'", s.label));
        }
    }
    if !errors.is_empty() {
        return Err(IoError::validation(errors));
    }

    let years: BTreeSet<i32> = series.iter().flat_map(|s| s.years.iter().copied()).collect();
    let lookup: Vec<BTreeMap<i32, Option<f64>>> = series
        .iter()
        .map(|s| s.years.iter().copied().zip(s.values.iter().copied()).collect())
        .collect();

    let mut writer = csv::Writer::from_path(path)?;
    let mut header = vec!["year".to_string()];
    header.extend(series.iter().map(|s| s.label.clone()));
    writer.write_record(&header)?;
    for year in &years {
        let mut row = vec![year.to_string()];
        row.extend(
            lookup
                .iter()
                .map(|m| format_cell(m.get(year).copied().flatten())),
        );
        writer.write_record(&row)?;
    }
    writer.flush().map_err(|e| IoError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    info!(path = %path.display(), series = series.len(), years = years.len(), "wrote series");
    Ok(())
}

/// Write one row per station trend.
///
/// # Errors
///
/// Returns [`IoError::Csv`] on write failure.
pub fn write_trends_csv(path: &Path, trends: &[StationTrend]) -> Result<(), IoError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "station id",
        "n_years",
        "r_value",
        "gradient",
        "intercept",
        "p_value",
        "std_err",
        "conclusion",
        "latitude",
        "longitude",
    ])?;
    for t in trends {
        let coords = t.coordinates.as_ref();
        writer.write_record([
            t.station.to_string(),
            t.n_years.to_string(),
            format_cell(t.r_value),
            format_cell(t.slope),
            format_cell(t.intercept),
            format_cell(t.p_value),
            format_cell(t.std_err),
            t.class.to_string(),
            format_cell(coords.map(|c| c.latitude)),
            format_cell(coords.map(|c| c.longitude)),
        ])?;
    }
    writer.flush().map_err(|e| IoError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    info!(path = %path.display(), stations = trends.len(), "wrote trends");
    Ok(())
}

fn format_cell(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}
