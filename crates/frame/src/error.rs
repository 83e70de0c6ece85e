//! Error types for agrorisk-frame.

use agrorisk_calendar::CalendarError;

/// Error type for all fallible operations in the agrorisk-frame crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameError {
    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when a requested value column does not exist.
    #[error("column '{name}' not found")]
    MissingColumn {
        /// Name of the missing column.
        name: String,
    },

    /// Returned when a column would be added twice.
    #[error("column '{name}' already exists")]
    DuplicateColumn {
        /// Name of the duplicated column.
        name: String,
    },

    /// Returned when a station identifier is empty or too long.
    #[error("invalid station id '{raw}'")]
    InvalidStation {
        /// The raw identifier text.
        raw: String,
    },

    /// Returned when a seasonal window boundary is malformed.
    #[error("invalid window: {0}")]
    InvalidWindow(#[from] CalendarError),
}
