//! Columnar container for hourly station records.

use crate::error::FrameError;
use crate::station::StationId;
use crate::validate;

/// Identity of one record: station plus hourly timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey<'a> {
    /// Station the record was measured at.
    pub station: &'a StationId,
    /// Calendar year.
    pub year: i32,
    /// Month (1..=12).
    pub month: u8,
    /// Day within the month (1..=31).
    pub day: u8,
    /// Hour of day (0..=23).
    pub hour: u8,
}

/// Hourly measurement records for one or more stations, stored column-wise.
///
/// Every row is one `(station, year, month, day, hour)` observation; value
/// columns are named after the source variable (`TT_TU`, `RF_STD`, ...) and
/// hold `None` where the observation is missing. A frame is never modified
/// in place: selections and derived columns produce new frames, so the same
/// base table can be windowed repeatedly within one run.
#[derive(Debug, Clone, PartialEq)]
pub struct StationFrame {
    stations: Vec<StationId>,
    years: Vec<i32>,
    months: Vec<u8>,
    days: Vec<u8>,
    hours: Vec<u8>,
    columns: Vec<(String, Vec<Option<f64>>)>,
}

impl StationFrame {
    /// Creates a frame after validating its contents.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Validation`] if column lengths differ, a
    /// timestamp component is out of range, or a `(station, timestamp)` key
    /// occurs twice. Returns [`FrameError::DuplicateColumn`] if two value
    /// columns share a name.
    pub fn new(
        stations: Vec<StationId>,
        years: Vec<i32>,
        months: Vec<u8>,
        days: Vec<u8>,
        hours: Vec<u8>,
        columns: Vec<(String, Vec<Option<f64>>)>,
    ) -> Result<Self, FrameError> {
        for (i, (name, _)) in columns.iter().enumerate() {
            if columns[..i].iter().any(|(other, _)| other == name) {
                return Err(FrameError::DuplicateColumn { name: name.clone() });
            }
        }

        let n = stations.len();
        validate::validate_lengths(
            n,
            [
                ("year", years.len()),
                ("month", months.len()),
                ("day", days.len()),
                ("hour", hours.len()),
            ]
            .into_iter()
            .chain(columns.iter().map(|(name, v)| (name.as_str(), v.len()))),
        )
        .finish()?;
        validate::validate_timestamps(&months, &days, &hours).finish()?;

        let frame = Self {
            stations,
            years,
            months,
            days,
            hours,
            columns,
        };
        validate::validate_unique_keys(
            (0..n).map(|i| {
                let k = frame.key(i);
                (k.station.as_str(), k.year, k.month, k.day, k.hour)
            }),
        )
        .finish()?;
        Ok(frame)
    }

    /// Creates a frame with no rows and the given value columns.
    pub fn empty<S: Into<String>>(column_names: impl IntoIterator<Item = S>) -> Self {
        Self {
            stations: Vec::new(),
            years: Vec::new(),
            months: Vec::new(),
            days: Vec::new(),
            hours: Vec::new(),
            columns: column_names
                .into_iter()
                .map(|n| (n.into(), Vec::new()))
                .collect(),
        }
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Returns `true` if the frame holds no records.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Station of each record.
    pub fn stations(&self) -> &[StationId] {
        &self.stations
    }

    /// Year of each record.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Month of each record.
    pub fn months(&self) -> &[u8] {
        &self.months
    }

    /// Day of each record.
    pub fn days(&self) -> &[u8] {
        &self.days
    }

    /// Hour of each record.
    pub fn hours(&self) -> &[u8] {
        &self.hours
    }

    /// Names of the value columns in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Returns `true` if a value column with this name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    /// Values of a named column.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::MissingColumn`] if no such column exists.
    pub fn column(&self, name: &str) -> Result<&[Option<f64>], FrameError> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
            .ok_or_else(|| FrameError::MissingColumn {
                name: name.to_string(),
            })
    }

    /// Iterates over `(name, values)` for every value column.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[Option<f64>])> {
        self.columns.iter().map(|(n, v)| (n.as_str(), v.as_slice()))
    }

    /// Key of the record at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn key(&self, index: usize) -> RecordKey<'_> {
        RecordKey {
            station: &self.stations[index],
            year: self.years[index],
            month: self.months[index],
            day: self.days[index],
            hour: self.hours[index],
        }
    }

    /// Returns a copy of the frame with an extra value column.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::DuplicateColumn`] if the name is taken and
    /// [`FrameError::Validation`] if `values` has the wrong length.
    pub fn with_column(
        &self,
        name: impl Into<String>,
        values: Vec<Option<f64>>,
    ) -> Result<Self, FrameError> {
        let name = name.into();
        if self.has_column(&name) {
            return Err(FrameError::DuplicateColumn { name });
        }
        validate::validate_lengths(self.len(), [(name.as_str(), values.len())]).finish()?;
        let mut out = self.clone();
        out.columns.push((name, values));
        Ok(out)
    }

    /// Returns a copy with `name = minuend - subtrahend`, missing where
    /// either operand is missing.
    ///
    /// Used for the dew-point depression `TT - TD`.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::MissingColumn`] for an unknown operand and
    /// [`FrameError::DuplicateColumn`] if `name` already exists.
    pub fn with_difference(
        &self,
        name: impl Into<String>,
        minuend: &str,
        subtrahend: &str,
    ) -> Result<Self, FrameError> {
        let a = self.column(minuend)?;
        let b = self.column(subtrahend)?;
        let diff = a
            .iter()
            .zip(b)
            .map(|(a, b)| Some((*a)? - (*b)?))
            .collect();
        self.with_column(name, diff)
    }

    /// Returns the rows at `indices`, in that order.
    pub(crate) fn take(&self, indices: &[usize]) -> Self {
        Self {
            stations: indices.iter().map(|&i| self.stations[i].clone()).collect(),
            years: indices.iter().map(|&i| self.years[i]).collect(),
            months: indices.iter().map(|&i| self.months[i]).collect(),
            days: indices.iter().map(|&i| self.days[i]).collect(),
            hours: indices.iter().map(|&i| self.hours[i]).collect(),
            columns: self
                .columns
                .iter()
                .map(|(name, v)| (name.clone(), indices.iter().map(|&i| v[i]).collect()))
                .collect(),
        }
    }

    /// Returns a new frame with the records whose key satisfies `keep`.
    pub fn filter(&self, mut keep: impl FnMut(RecordKey<'_>) -> bool) -> Self {
        let indices: Vec<usize> = (0..self.len()).filter(|&i| keep(self.key(i))).collect();
        self.take(&indices)
    }

    /// Concatenates frames that share the same value columns.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Validation`] if the column sets differ or the
    /// combined frame contains duplicate keys.
    pub fn concat(frames: Vec<StationFrame>) -> Result<Self, FrameError> {
        let mut iter = frames.into_iter();
        let Some(first) = iter.next() else {
            return Ok(Self::empty(Vec::<String>::new()));
        };
        let names: Vec<String> = first.column_names().map(str::to_string).collect();
        let mut out = first;
        for frame in iter {
            let other: Vec<&str> = frame.column_names().collect();
            if other != names {
                return Err(FrameError::Validation {
                    count: 1,
                    details: format!("column mismatch: {names:?} vs {other:?}"),
                });
            }
            out.stations.extend(frame.stations);
            out.years.extend(frame.years);
            out.months.extend(frame.months);
            out.days.extend(frame.days);
            out.hours.extend(frame.hours);
            for ((_, dst), (_, src)) in out.columns.iter_mut().zip(frame.columns) {
                dst.extend(src);
            }
        }
        Self::new(
            out.stations,
            out.years,
            out.months,
            out.days,
            out.hours,
            out.columns,
        )
    }
}

/// Row-by-row construction of a [`StationFrame`].
#[derive(Debug, Clone)]
pub struct StationFrameBuilder {
    names: Vec<String>,
    stations: Vec<StationId>,
    years: Vec<i32>,
    months: Vec<u8>,
    days: Vec<u8>,
    hours: Vec<u8>,
    values: Vec<Vec<Option<f64>>>,
}

impl StationFrameBuilder {
    /// Starts a builder for the given value columns.
    pub fn new<S: Into<String>>(column_names: impl IntoIterator<Item = S>) -> Self {
        let names: Vec<String> = column_names.into_iter().map(Into::into).collect();
        let values = vec![Vec::new(); names.len()];
        Self {
            names,
            stations: Vec::new(),
            years: Vec::new(),
            months: Vec::new(),
            days: Vec::new(),
            hours: Vec::new(),
            values,
        }
    }

    /// Appends one record; `values` follows the column order given to [`new`](Self::new).
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Validation`] if `values` has the wrong length.
    pub fn push(
        &mut self,
        key: RecordKey<'_>,
        values: &[Option<f64>],
    ) -> Result<(), FrameError> {
        if values.len() != self.names.len() {
            return Err(FrameError::Validation {
                count: 1,
                details: format!(
                    "row has {} values for {} columns",
                    values.len(),
                    self.names.len()
                ),
            });
        }
        self.stations.push(key.station.clone());
        self.years.push(key.year);
        self.months.push(key.month);
        self.days.push(key.day);
        self.hours.push(key.hour);
        for (col, &v) in self.values.iter_mut().zip(values) {
            col.push(v);
        }
        Ok(())
    }

    /// Number of records pushed so far.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Returns `true` if no record has been pushed.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Validates and returns the frame.
    ///
    /// # Errors
    ///
    /// See [`StationFrame::new`].
    pub fn build(self) -> Result<StationFrame, FrameError> {
        StationFrame::new(
            self.stations,
            self.years,
            self.months,
            self.days,
            self.hours,
            self.names.into_iter().zip(self.values).collect(),
        )
    }
}
