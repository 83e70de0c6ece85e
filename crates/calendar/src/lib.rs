//! # agrorisk-calendar
//!
//! Calendar primitives for seasonal disease-risk analysis: `dd.mm`
//! boundaries, recurring annual windows that may wrap the year boundary,
//! season-year attribution and no-leap day-of-year conversion.
//!
//! ## Quick Start
//!
//! ```
//! use agrorisk_calendar::{DayMonth, Doy, SeasonalWindow, season_year};
//!
//! // Maize harvest to wheat flowering, crossing New Year.
//! let window = SeasonalWindow::parse("01.10", "31.05").unwrap();
//! assert_eq!(window.months(), vec![10, 11, 12, 1, 2, 3, 4, 5]);
//! assert!(window.contains(1, 15));
//! assert!(!window.contains(7, 1));
//!
//! // Phenology day-of-year to a window boundary.
//! let harvest: DayMonth = Doy::new(258).unwrap().day_month();
//! assert_eq!(harvest.to_string(), "15.09");
//!
//! assert_eq!(season_year(2000, 11, 10).unwrap(), 2001);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `day_month` | `dd.mm` boundary type |
//! | `window` | Recurring seasonal window and membership test |
//! | `season_year` | Season attribution for wrapping windows |
//! | `doy` | Day-of-year newtype |
//! | `error` | Error types |

mod day_month;
mod doy;
mod error;
mod season_year;
mod window;

pub use day_month::DayMonth;
pub use doy::Doy;
pub use error::CalendarError;
pub use season_year::season_year;
pub use window::SeasonalWindow;
