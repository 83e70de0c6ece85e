//! # agrorisk-risk
//!
//! Pure functions mapping a single weather measurement to a
//! disease-favourability score.
//!
//! ## Quick Start
//!
//! ```
//! use agrorisk_risk::{BetaTemperature, ExponentialHumidity, RiskTransform, Threshold};
//!
//! let temp = BetaTemperature::default();
//! assert_eq!(temp.apply(5.0), 0.0);
//! assert!((temp.apply(temp.optimum()) - 1.0).abs() < 1e-9);
//!
//! let rh = ExponentialHumidity::default();
//! assert_eq!(rh.apply(100.0), 1.0);
//!
//! let wet = Threshold::leaf_wetness(87.0).unwrap();
//! assert_eq!(wet.apply_column(&[Some(90.0), None]), vec![Some(1.0), None]);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `transform` | `RiskTransform` trait, closure impl, `Identity` |
//! | `temperature` | Beta temperature response, optimal temperature band |
//! | `humidity` | Exponential humidity response |
//! | `threshold` | Binary threshold indicators |
//! | `kind` | `Transform` enum over the built-ins |
//! | `error` | Error types |

mod error;
mod humidity;
mod kind;
mod temperature;
mod threshold;
mod transform;

pub use error::RiskError;
pub use humidity::ExponentialHumidity;
pub use kind::Transform;
pub use temperature::{BetaTemperature, TemperatureBand};
pub use threshold::{Comparison, Threshold};
pub use transform::{Identity, RiskTransform};
