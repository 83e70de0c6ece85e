//! Error types for agrorisk-trend.

use agrorisk_aggregate::AggregateError;
use agrorisk_combine::CombineError;

/// Error type for all fallible operations in the agrorisk-trend crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrendError {
    /// Returned when a configuration value is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when yearly aggregation fails for a station.
    #[error("aggregation failed for station {station}: {reason}")]
    Aggregate {
        /// Station being processed.
        station: String,
        /// Underlying error message.
        reason: String,
    },

    /// Returned when combining the two sources fails for a station.
    #[error("combination failed for station {station}: {reason}")]
    Combine {
        /// Station being processed.
        station: String,
        /// Underlying error message.
        reason: String,
    },
}

impl TrendError {
    pub(crate) fn aggregate(station: &impl ToString, e: AggregateError) -> Self {
        Self::Aggregate {
            station: station.to_string(),
            reason: e.to_string(),
        }
    }

    pub(crate) fn combine(station: &impl ToString, e: CombineError) -> Self {
        Self::Combine {
            station: station.to_string(),
            reason: e.to_string(),
        }
    }
}
