//! # agrorisk-frame
//!
//! Columnar record sets of hourly weather-station measurements.
//!
//! A [`StationFrame`] holds one row per `(station, year, month, day, hour)`
//! with any number of named `Option<f64>` value columns. Frames are
//! validated on construction and never modified afterwards; window
//! selection, subsetting and derived columns all return new frames.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `frame` | `StationFrame`, `StationFrameBuilder`, `RecordKey` |
//! | `select` | Seasonal window selection, station/hour/year subsets |
//! | `station` | Zero-padded station identifiers and coordinates |
//! | `validate` | Accumulated validation of record sets |
//! | `error` | Error types |

mod error;
mod frame;
mod select;
mod station;
mod validate;

pub use error::FrameError;
pub use frame::{RecordKey, StationFrame, StationFrameBuilder};
pub use select::select_window;
pub use station::{Coordinates, STATION_ID_WIDTH, StationId};
