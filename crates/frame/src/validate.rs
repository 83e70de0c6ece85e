//! Accumulated validation utilities.
//!
//! [`ValidationCollector`] gathers every problem found in a record set into
//! a single [`FrameError::Validation`] so a malformed input table is
//! reported in one pass.

use std::collections::HashSet;

use crate::error::FrameError;

/// Accumulates validation errors and converts them into a single
/// [`FrameError::Validation`].
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

/// Upper bound on messages kept verbatim; the count stays exact.
const MAX_DETAILS: usize = 20;

impl ValidationCollector {
    /// Create an empty collector.
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Consume the collector and return `Ok(())` if no errors were recorded,
    /// or `Err(FrameError::Validation { count, details })` otherwise.
    pub(crate) fn finish(self) -> Result<(), FrameError> {
        if self.errors.is_empty() {
            return Ok(());
        }
        let count = self.errors.len();
        let mut details = self.errors[..count.min(MAX_DETAILS)].join("; ");
        if count > MAX_DETAILS {
            details.push_str(&format!("; ... and {} more", count - MAX_DETAILS));
        }
        Err(FrameError::Validation { count, details })
    }
}

/// Check that every column has `expected` rows.
pub(crate) fn validate_lengths<'a>(
    expected: usize,
    lengths: impl IntoIterator<Item = (&'a str, usize)>,
) -> ValidationCollector {
    let mut c = ValidationCollector::new();
    for (name, len) in lengths {
        if len != expected {
            c.push(format!("{name} length {len} != row count {expected}"));
        }
    }
    c
}

/// Check month, day and hour ranges row by row.
pub(crate) fn validate_timestamps(months: &[u8], days: &[u8], hours: &[u8]) -> ValidationCollector {
    let mut c = ValidationCollector::new();
    for (i, ((&m, &d), &h)) in months.iter().zip(days).zip(hours).enumerate() {
        if !(1..=12).contains(&m) {
            c.push(format!("month {m} at row {i}"));
        }
        if !(1..=31).contains(&d) {
            c.push(format!("day {d} at row {i}"));
        }
        if h > 23 {
            c.push(format!("hour {h} at row {i}"));
        }
    }
    c
}

/// Check that `(station, year, month, day, hour)` is unique.
pub(crate) fn validate_unique_keys<'a>(
    keys: impl IntoIterator<Item = (&'a str, i32, u8, u8, u8)>,
) -> ValidationCollector {
    let mut c = ValidationCollector::new();
    let mut seen = HashSet::new();
    for (i, key) in keys.into_iter().enumerate() {
        if !seen.insert(key) {
            let (s, y, m, d, h) = key;
            c.push(format!(
                "duplicate record {s} {y:04}-{m:02}-{d:02} {h:02}h at row {i}"
            ));
        }
    }
    c
}
