//! Error types for agrorisk-combine.

use agrorisk_frame::FrameError;

/// Error type for all fallible operations in the agrorisk-combine crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CombineError {
    /// Returned when a strategy name is not recognised.
    #[error("unknown combination strategy: '{name}'")]
    UnknownStrategy {
        /// The rejected name.
        name: String,
    },

    /// Returned when the square-root strategy meets a negative product.
    #[error(
        "negative risk product {product} for station {station} at {year:04}-{month:02}-{day:02} {hour:02}h"
    )]
    Domain {
        /// Station of the offending record.
        station: String,
        /// Year of the offending record.
        year: i32,
        /// Month of the offending record.
        month: u8,
        /// Day of the offending record.
        day: u8,
        /// Hour of the offending record.
        hour: u8,
        /// The product of the two risks.
        product: f64,
    },

    /// Returned when the secondary source has two records for one join key.
    #[error("duplicate key in secondary source: {key}")]
    DuplicateKey {
        /// Rendered join key.
        key: String,
    },

    /// Returned when the join key set is empty.
    #[error("join keys must not be empty")]
    EmptyKeys,

    /// Returned when a frame operation fails.
    #[error("frame error: {reason}")]
    Frame {
        /// Underlying frame error message.
        reason: String,
    },
}

impl From<FrameError> for CombineError {
    fn from(e: FrameError) -> Self {
        Self::Frame {
            reason: e.to_string(),
        }
    }
}
