//! Error types for agrorisk-aggregate.

use agrorisk_frame::FrameError;

/// Error type for all fallible operations in the agrorisk-aggregate crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AggregateError {
    /// Returned when the value column is not present in the input.
    #[error("column '{name}' not found")]
    MissingColumn {
        /// Name of the requested column.
        name: String,
    },

    /// Returned when the moving-average window is zero.
    #[error("invalid moving-average window: {window} (must be >= 1)")]
    InvalidWindow {
        /// The rejected window length.
        window: usize,
    },

    /// Returned when the reference period is reversed.
    #[error("invalid reference period: {start}-{end} (start must be <= end)")]
    InvalidReference {
        /// First year of the period.
        start: i32,
        /// Last year of the period.
        end: i32,
    },

    /// Returned when a configuration value is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the record set rejects a derived column.
    #[error("frame error: {reason}")]
    Frame {
        /// Underlying frame error message.
        reason: String,
    },
}

impl From<FrameError> for AggregateError {
    fn from(e: FrameError) -> Self {
        match e {
            FrameError::MissingColumn { name } => Self::MissingColumn { name },
            other => Self::Frame {
                reason: other.to_string(),
            },
        }
    }
}
