//! # agrorisk-aggregate
//!
//! Reduces a windowed hourly record set to one value per year and derives
//! the statistics a risk dashboard shows: the yearly risk series, its
//! trailing moving average and the historical baseline.
//!
//! ## Quick Start
//!
//! ```
//! use agrorisk_aggregate::{AggregateConfig, ReferencePeriod, aggregate_yearly};
//! use agrorisk_frame::{StationFrame, StationId};
//! use agrorisk_risk::ExponentialHumidity;
//!
//! let s = StationId::new("1550").unwrap();
//! let frame = StationFrame::new(
//!     vec![s.clone(), s.clone(), s],
//!     vec![1990, 1991, 1992],
//!     vec![6, 6, 6],
//!     vec![1, 1, 1],
//!     vec![12, 12, 12],
//!     vec![("RF_STD".to_string(), vec![Some(100.0), Some(90.0), None])],
//! )
//! .unwrap();
//!
//! let config = AggregateConfig::default()
//!     .with_reference(ReferencePeriod::new(1990, 1991).unwrap())
//!     .with_moving_average(2);
//! let agg = aggregate_yearly(&frame, "RF_STD", &ExponentialHumidity::default(), &config).unwrap();
//!
//! assert_eq!(agg.years(), &[1990, 1991, 1992]);
//! assert_eq!(agg.risk()[2], None);
//! assert_eq!(agg.baseline().max, Some(1.0));
//! assert!(agg.rolling()[1].is_some());
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `config` | `AggregateConfig`, `ReferencePeriod`, `YearBasis` |
//! | `yearly` | `aggregate_yearly` |
//! | `result` | `YearlyAggregate`, `Baseline`, `LabeledSeries` |
//! | `error` | Error types |

mod config;
mod error;
mod result;
mod yearly;

pub use config::{AggregateConfig, ReferencePeriod, YearBasis};
pub use error::AggregateError;
pub use result::{Baseline, LabeledSeries, YearlyAggregate};
pub use yearly::aggregate_yearly;
