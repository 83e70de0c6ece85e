//! Error types for agrorisk-risk.

/// Error type for transform construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RiskError {
    /// Returned when a transform parameter is out of its valid range.
    #[error("invalid transform parameter: {reason}")]
    InvalidParameter {
        /// Description of the offending parameter.
        reason: String,
    },
}
