//! # agrorisk-trend
//!
//! Fits a linear trend of yearly disease risk against time for every
//! station in a record set and classifies it as significantly increasing,
//! significantly decreasing, non-significant or undetermined.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `config` | `TrendConfig` |
//! | `model` | `TrendModel`: single-source or combined risk |
//! | `fit` | `fit_station_trends` |
//! | `result` | `StationTrend`, `TrendClass`, coordinate attachment |
//! | `error` | Error types |

mod config;
mod error;
mod fit;
mod model;
mod result;

pub use config::TrendConfig;
pub use error::TrendError;
pub use fit::fit_station_trends;
pub use model::TrendModel;
pub use result::{StationTrend, TrendClass, attach_coordinates};
