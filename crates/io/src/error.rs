//! Error types for agrorisk-io.

use std::path::PathBuf;

/// Upper bound on messages kept verbatim in a validation error.
const MAX_DETAILS: usize = 20;

/// Error type for all fallible operations in the agrorisk-io crate.
///
/// Covers missing files, CSV format problems, malformed timestamps and
/// values, and errors raised while assembling the parsed records.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file or directory does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error from the filesystem.
    #[error("i/o error on {}: {reason}", path.display())]
    Io {
        /// Path being accessed.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Wraps an error originating from the CSV library.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying CSV failure.
        reason: String,
    },

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when a required column is not present in a file.
    #[error("column '{name}' not found in {}", path.display())]
    MissingColumn {
        /// Name of the missing column.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when requested stations are absent from every file read.
    #[error("no data found for station(s): {}", stations.join(", "))]
    MissingStations {
        /// Identifiers that were not found.
        stations: Vec<String>,
    },

    /// Returned when a computation has no input records.
    #[error("no data: {reason}")]
    NoData {
        /// What was missing.
        reason: String,
    },

    /// Wraps an error originating from the agrorisk-frame crate.
    #[error("frame error: {reason}")]
    Frame {
        /// Description of the underlying frame failure.
        reason: String,
    },

    /// Wraps an error originating from the agrorisk-calendar crate.
    #[error("calendar error: {reason}")]
    Calendar {
        /// Description of the underlying calendar failure.
        reason: String,
    },
}

impl IoError {
    /// Collapses accumulated messages into one [`IoError::Validation`].
    pub(crate) fn validation(errors: Vec<String>) -> Self {
        let count = errors.len();
        let mut details = errors[..count.min(MAX_DETAILS)].join("; ");
        if count > MAX_DETAILS {
            details.push_str(&format!("; ... and {} more", count - MAX_DETAILS));
        }
        Self::Validation { count, details }
    }
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        IoError::Csv {
            reason: e.to_string(),
        }
    }
}

impl From<agrorisk_frame::FrameError> for IoError {
    fn from(e: agrorisk_frame::FrameError) -> Self {
        IoError::Frame {
            reason: e.to_string(),
        }
    }
}

impl From<agrorisk_calendar::CalendarError> for IoError {
    fn from(e: agrorisk_calendar::CalendarError) -> Self {
        IoError::Calendar {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/tmp/missing.txt"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.txt");
    }

    #[test]
    fn display_missing_column() {
        let err = IoError::MissingColumn {
            name: "MESS_DATUM".to_string(),
            path: PathBuf::from("/data/produkt.txt"),
        };
        assert_eq!(
            err.to_string(),
            "column 'MESS_DATUM' not found in /data/produkt.txt"
        );
    }

    #[test]
    fn display_missing_stations() {
        let err = IoError::MissingStations {
            stations: vec!["00044".to_string(), "01550".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "no data found for station(s): 00044, 01550"
        );
    }

    #[test]
    fn validation_truncates_details() {
        let errors: Vec<String> = (0..25).map(|i| format!("e{i}")).collect();
        match IoError::validation(errors) {
            IoError::Validation { count, details } => {
                assert_eq!(count, 25);
                assert!(details.ends_with("; ... and 5 more"));
                assert!(details.starts_with("e0; e1"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn from_calendar_error() {
        let cal_err = agrorisk_calendar::CalendarError::InvalidDoy { doy: 0 };
        let err: IoError = cal_err.into();
        assert!(matches!(err, IoError::Calendar { .. }));
        assert!(err.to_string().contains("calendar error"));
    }

    #[test]
    fn from_frame_error() {
        let err: IoError = agrorisk_frame::FrameError::InvalidStation {
            raw: "x-1".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "frame error: invalid station id 'x-1'");
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}
