//! Station description lists.

use std::collections::BTreeMap;
use std::path::Path;

use agrorisk_frame::{Coordinates, StationId};
use tracing::{debug, info};

use crate::error::IoError;

/// Read a DWD station description list into a coordinate lookup.
///
/// The file is a fixed-width table with two header lines followed by rows
/// of `id from to height latitude longitude name... state [delivery]`.
/// Latin-1 and UTF-8 encodings are both accepted. Rows with fewer than six
/// fields are skipped.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist and
/// [`IoError::Validation`] listing every row with an unparsable
/// identifier, height or coordinate.
pub fn read_station_coordinates(path: &Path) -> Result<BTreeMap<StationId, Coordinates>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let bytes = std::fs::read(path).map_err(|e| IoError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let text = decode(&bytes);

    let mut out = BTreeMap::new();
    let mut errors = Vec::new();
    for (i, line) in text.lines().enumerate().skip(2) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 6 {
            if !line.trim().is_empty() {
                debug!(line = i + 1, "skipping short station row");
            }
            continue;
        }
        match parse_row(&tokens) {
            Ok((id, coords)) => {
                out.insert(id, coords);
            }
            Err(reason) => errors.push(format!("line {}: {reason}", i + 1)),
        }
    }
    if !errors.is_empty() {
        return Err(IoError::validation(errors));
    }
    info!(path = %path.display(), stations = out.len(), "read station list");
    Ok(out)
}

fn parse_row(tokens: &[&str]) -> Result<(StationId, Coordinates), String> {
    let id = StationId::new(tokens[0]).map_err(|e| e.to_string())?;
    let number = |i: usize, what: &str| {
        tokens[i]
            .parse::<f64>()
            .map_err(|_| format!("invalid {what} '{}'", tokens[i]))
    };
    let elevation = number(3, "height")?;
    let latitude = number(4, "latitude")?;
    let longitude = number(5, "longitude")?;
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(format!("coordinates out of range: {latitude}, {longitude}"));
    }
    // The last two fields are the federal state and the delivery flag.
    let name_end = if tokens.len() >= 9 { tokens.len() - 2 } else { tokens.len() };
    let name = (name_end > 6).then(|| tokens[6..name_end].join(" "));
    Ok((
        id,
        Coordinates {
            latitude,
            longitude,
            elevation: Some(elevation),
            name,
        },
    ))
}

/// UTF-8 if valid, otherwise Latin-1.
fn decode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}
