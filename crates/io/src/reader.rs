//! DWD station product reader.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use agrorisk_frame::{RecordKey, StationFrame, StationFrameBuilder, StationId};
use chrono::{Datelike, NaiveDate};
use tracing::{debug, info};

use crate::archive::ArchiveName;
use crate::error::IoError;

// ---------------------------------------------------------------------------
// CsvReaderConfig
// ---------------------------------------------------------------------------

/// Configuration for reading hourly station product files.
///
/// The [`Default`] matches the DWD open-data layout: `;`-separated, a
/// `STATIONS_ID` column, a `MESS_DATUM` timestamp in `YYYYMMDDHH` form,
/// `-999` as the missing-value sentinel, `QN_*` quality flags and a
/// trailing `eor` marker column.
#[derive(Debug, Clone)]
pub struct CsvReaderConfig {
    /// Field delimiter.
    delimiter: u8,
    /// Column holding the station identifier.
    station_column: String,
    /// Column holding the `YYYYMMDDHH` timestamp.
    timestamp_column: String,
    /// Value marking a missing observation.
    missing_sentinel: f64,
    /// Value columns to keep; `None` keeps every non-flag column.
    value_columns: Option<Vec<String>>,
    /// Inclusive year range to keep.
    years: Option<(i32, i32)>,
    /// Stations to keep; empty keeps all.
    stations: Vec<StationId>,
}

impl Default for CsvReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: b';',
            station_column: "STATIONS_ID".into(),
            timestamp_column: "MESS_DATUM".into(),
            missing_sentinel: -999.0,
            value_columns: None,
            years: None,
            stations: Vec::new(),
        }
    }
}

impl CsvReaderConfig {
    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the missing-value sentinel.
    pub fn with_missing_sentinel(mut self, sentinel: f64) -> Self {
        self.missing_sentinel = sentinel;
        self
    }

    /// Keep only these value columns.
    pub fn with_value_columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.value_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Keep only records with `start <= year <= end`.
    pub fn with_years(mut self, start: i32, end: i32) -> Self {
        self.years = Some((start, end));
        self
    }

    /// Keep only these stations.
    pub fn with_stations(mut self, stations: Vec<StationId>) -> Self {
        self.stations = stations;
        self
    }

    /// Returns the year range, if any.
    pub fn years(&self) -> Option<(i32, i32)> {
        self.years
    }

    /// Returns the station filter.
    pub fn stations(&self) -> &[StationId] {
        &self.stations
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] for a reversed year range or an empty
    /// value-column list.
    pub fn validate(&self) -> Result<(), IoError> {
        if let Some((start, end)) = self.years
            && start > end
        {
            return Err(IoError::Validation {
                count: 1,
                details: format!("year range {start}..={end} is reversed"),
            });
        }
        if let Some(cols) = &self.value_columns
            && cols.is_empty()
        {
            return Err(IoError::Validation {
                count: 1,
                details: "value column list must not be empty".to_string(),
            });
        }
        Ok(())
    }

    fn keeps_year(&self, year: i32) -> bool {
        self.years
            .is_none_or(|(start, end)| (start..=end).contains(&year))
    }

    fn keeps_station(&self, station: &StationId) -> bool {
        self.stations.is_empty() || self.stations.contains(station)
    }

    fn is_value_column(&self, name: &str) -> bool {
        match &self.value_columns {
            Some(cols) => cols.iter().any(|c| c == name),
            None => {
                name != self.station_column
                    && name != self.timestamp_column
                    && !name.eq_ignore_ascii_case("eor")
                    && !name.starts_with("QN")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// read_station_csv
// ---------------------------------------------------------------------------

/// Read one hourly product file into a [`StationFrame`].
///
/// Header names are trimmed, the station identifier is zero-padded, empty
/// fields and the missing sentinel become `None`, and records outside the
/// configured year range or station list are skipped.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist,
/// [`IoError::MissingColumn`] for an absent key or value column, and
/// [`IoError::Validation`] listing every unparsable timestamp or value.
pub fn read_station_csv(path: &Path, config: &CsvReaderConfig) -> Result<StationFrame, IoError> {
    config.validate()?;
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .trim(csv::Trim::All)
        .from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| IoError::MissingColumn {
                name: name.to_string(),
                path: path.to_path_buf(),
            })
    };
    let station_idx = find(config.station_column.as_str())?;
    let time_idx = find(config.timestamp_column.as_str())?;
    let (value_names, value_idx): (Vec<String>, Vec<usize>) = match &config.value_columns {
        Some(cols) => {
            let idx = cols.iter().map(|c| find(c.as_str())).collect::<Result<Vec<_>, _>>()?;
            (cols.clone(), idx)
        }
        None => headers
            .iter()
            .enumerate()
            .filter(|(_, h)| config.is_value_column(h))
            .map(|(i, h)| (h.clone(), i))
            .unzip(),
    };

    let mut builder = StationFrameBuilder::new(value_names);
    let mut errors = Vec::new();
    let mut values = vec![None; value_idx.len()];
    let mut skipped = 0usize;

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let line = row + 2;
        let field = |i: usize| record.get(i).unwrap_or("");

        let station = match StationId::new(field(station_idx)) {
            Ok(s) => s,
            Err(e) => {
                errors.push(format!("line {line}: {e}"));
                continue;
            }
        };
        let Some((date, hour)) = parse_timestamp(field(time_idx)) else {
            errors.push(format!(
                "line {line}: invalid timestamp '{}'",
                field(time_idx)
            ));
            continue;
        };
        if !config.keeps_year(date.year()) || !config.keeps_station(&station) {
            skipped += 1;
            continue;
        }

        let mut row_ok = true;
        for (slot, &i) in values.iter_mut().zip(&value_idx) {
            match parse_value(field(i), config.missing_sentinel) {
                Ok(v) => *slot = v,
                Err(raw) => {
                    errors.push(format!(
                        "line {line}: invalid value '{raw}' in column {}",
                        headers[i]
                    ));
                    row_ok = false;
                }
            }
        }
        if !row_ok {
            continue;
        }

        let key = RecordKey {
            station: &station,
            year: date.year(),
            month: date.month() as u8,
            day: date.day() as u8,
            hour,
        };
        builder.push(key, &values)?;
    }

    if !errors.is_empty() {
        return Err(IoError::validation(errors));
    }
    let frame = builder.build()?;
    info!(
        path = %path.display(),
        rows = frame.len(),
        skipped,
        "read station file"
    );
    Ok(frame)
}

/// Parses `YYYYMMDDHH` (trailing minutes such as `:00` are ignored).
fn parse_timestamp(raw: &str) -> Option<(NaiveDate, u8)> {
    let raw = raw.trim();
    if raw.len() < 10 || !raw.is_char_boundary(10) {
        return None;
    }
    let (date, rest) = raw.split_at(8);
    let hour: u8 = rest.get(..2)?.parse().ok()?;
    if hour > 23 {
        return None;
    }
    let date = NaiveDate::parse_from_str(date, "%Y%m%d").ok()?;
    Some((date, hour))
}

/// Parses one value; `Err` carries the offending text.
fn parse_value(raw: &str, sentinel: f64) -> Result<Option<f64>, &str> {
    if raw.is_empty() {
        return Ok(None);
    }
    let v: f64 = raw.parse().map_err(|_| raw)?;
    if (v - sentinel).abs() < 1e-9 || v.is_nan() {
        Ok(None)
    } else {
        Ok(Some(v))
    }
}

// ---------------------------------------------------------------------------
// read_station_dir
// ---------------------------------------------------------------------------

/// Read every `produkt_*` file in `dir` and concatenate the records.
///
/// Files whose name carries a period are skipped when it does not overlap
/// the configured year range, or when their station is not in the
/// configured list. Files are read in name order.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `dir` does not exist,
/// [`IoError::MissingStations`] if a requested station has no records,
/// and any error from [`read_station_csv`].
pub fn read_station_dir(dir: &Path, config: &CsvReaderConfig) -> Result<StationFrame, IoError> {
    config.validate()?;
    if !dir.is_dir() {
        return Err(IoError::FileNotFound {
            path: dir.to_path_buf(),
        });
    }
    let io_err = |e: std::io::Error| IoError::Io {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    };

    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(io_err)?
        .map(|entry| entry.map(|e| e.path()).map_err(io_err))
        .collect::<Result<_, _>>()?;
    paths.retain(|p| {
        p.is_file()
            && p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("produkt_"))
    });
    paths.sort();

    let mut frames = Vec::new();
    for path in paths {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if let Some(archive) = ArchiveName::parse(name) {
            if let Some((start, end)) = config.years()
                && !archive.overlaps(start, end)
            {
                debug!(file = name, "skipping file outside year range");
                continue;
            }
            if !config.keeps_station(&archive.station) {
                debug!(file = name, "skipping file for unrequested station");
                continue;
            }
        }
        frames.push(read_station_csv(&path, config)?);
    }

    let frame = StationFrame::concat(frames)?;
    let found: BTreeSet<StationId> = frame.station_ids().into_iter().collect();
    let missing: Vec<String> = config
        .stations()
        .iter()
        .filter(|s| !found.contains(*s))
        .map(ToString::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(IoError::MissingStations { stations: missing });
    }

    info!(
        dir = %dir.display(),
        rows = frame.len(),
        stations = found.len(),
        "read station directory"
    );
    Ok(frame)
}
