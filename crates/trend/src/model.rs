//! Risk models evaluated per station.

use agrorisk_combine::{JoinKeys, Strategy};
use agrorisk_frame::StationFrame;
use agrorisk_risk::RiskTransform;

/// What yearly risk series a trend is fitted to.
#[derive(Clone, Copy)]
pub enum TrendModel<'a> {
    /// One column of the primary frame passed through one transform.
    Single {
        /// Value column.
        column: &'a str,
        /// Transform applied per record.
        transform: &'a dyn RiskTransform,
    },
    /// The composite of the primary frame and a second source.
    Combined {
        /// Value column of the primary frame.
        primary_column: &'a str,
        /// Transform of the primary values.
        primary_transform: &'a dyn RiskTransform,
        /// Second source, joined onto the primary frame.
        secondary: &'a StationFrame,
        /// Value column of the second source.
        secondary_column: &'a str,
        /// Transform of the secondary values.
        secondary_transform: &'a dyn RiskTransform,
        /// Join keys.
        keys: &'a JoinKeys,
        /// Composite strategy.
        strategy: Strategy,
    },
}

impl TrendModel<'_> {
    /// Short description for logs.
    pub fn describe(&self) -> String {
        match self {
            Self::Single { column, transform } => format!("{} of {column}", transform.label()),
            Self::Combined {
                primary_column,
                secondary_column,
                strategy,
                ..
            } => format!("{strategy} of {primary_column} and {secondary_column}"),
        }
    }
}
