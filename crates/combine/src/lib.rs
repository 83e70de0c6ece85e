//! # agrorisk-combine
//!
//! Merges two measurement sources (for example air temperature and
//! relative humidity) into one composite risk per record.
//!
//! The order of operations is fixed: join on the record key, transform
//! both sides, combine with a [`Strategy`]. Yearly aggregation of the
//! `combined_risk` column is left to the caller.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `keys` | `JoinKeys`, `KeyField` |
//! | `strategy` | `Strategy` and its name parser |
//! | `join` | `combine`, `Source` |
//! | `error` | Error types |

mod error;
mod join;
mod keys;
mod strategy;

pub use error::CombineError;
pub use join::{COMBINED_RISK, PRIMARY_RISK, SECONDARY_RISK, Source, combine};
pub use keys::{JoinKeys, KeyField};
pub use strategy::Strategy;
