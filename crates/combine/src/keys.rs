//! Join key selection.

use std::fmt;

use agrorisk_frame::{RecordKey, StationId};

/// One component of a record key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyField {
    /// Station identifier.
    Station,
    /// Calendar year.
    Year,
    /// Month.
    Month,
    /// Day of month.
    Day,
    /// Hour of day.
    Hour,
}

/// The key fields two sources are matched on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinKeys {
    fields: Vec<KeyField>,
}

impl JoinKeys {
    /// Creates a key set; duplicates are removed.
    pub fn new(fields: impl IntoIterator<Item = KeyField>) -> Self {
        let mut fields: Vec<KeyField> = fields.into_iter().collect();
        fields.sort();
        fields.dedup();
        Self { fields }
    }

    /// The selected fields in canonical order.
    pub fn fields(&self) -> &[KeyField] {
        &self.fields
    }

    /// Returns `true` if no field is selected.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn project<'a>(&self, key: RecordKey<'a>) -> JoinKey<'a> {
        let has = |f| self.fields.contains(&f);
        JoinKey {
            station: has(KeyField::Station).then_some(key.station),
            year: has(KeyField::Year).then_some(key.year),
            month: has(KeyField::Month).then_some(key.month),
            day: has(KeyField::Day).then_some(key.day),
            hour: has(KeyField::Hour).then_some(key.hour),
        }
    }
}

impl Default for JoinKeys {
    /// Station plus full hourly timestamp.
    fn default() -> Self {
        Self::new([
            KeyField::Station,
            KeyField::Year,
            KeyField::Month,
            KeyField::Day,
            KeyField::Hour,
        ])
    }
}

/// A record key restricted to the fields of a [`JoinKeys`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct JoinKey<'a> {
    station: Option<&'a StationId>,
    year: Option<i32>,
    month: Option<u8>,
    day: Option<u8>,
    hour: Option<u8>,
}

impl fmt::Display for JoinKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(s) = self.station {
            parts.push(format!("station={s}"));
        }
        if let Some(y) = self.year {
            parts.push(format!("year={y}"));
        }
        if let Some(m) = self.month {
            parts.push(format!("month={m}"));
        }
        if let Some(d) = self.day {
            parts.push(format!("day={d}"));
        }
        if let Some(h) = self.hour {
            parts.push(format!("hour={h}"));
        }
        f.write_str(&parts.join(" "))
    }
}
