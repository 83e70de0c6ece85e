//! Fixed-width weather-station identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::FrameError;

/// Width of a station identifier after zero padding.
pub const STATION_ID_WIDTH: usize = 5;

/// Station identifier, zero-padded to [`STATION_ID_WIDTH`] characters.
///
/// Archive files store the identifier as an integer (`1550`) while station
/// lists and file names use the padded form (`01550`). Both parse to the
/// same `StationId`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StationId(String);

impl StationId {
    /// Parses and pads an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InvalidStation`] if the trimmed text is empty,
    /// longer than [`STATION_ID_WIDTH`], or not made of ASCII alphanumerics.
    pub fn new(raw: &str) -> Result<Self, FrameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty()
            || trimmed.len() > STATION_ID_WIDTH
            || !trimmed.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(FrameError::InvalidStation {
                raw: raw.to_string(),
            });
        }
        Ok(Self(format!("{trimmed:0>STATION_ID_WIDTH$}")))
    }

    /// Returns the padded identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for StationId {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for StationId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Geographic location of a station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coordinates {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Station height above sea level in metres, when known.
    pub elevation: Option<f64>,
    /// Station name, when known.
    pub name: Option<String>,
}
