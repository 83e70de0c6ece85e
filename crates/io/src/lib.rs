//! # agrorisk-io
//!
//! Reads DWD open-data station products, station lists and phenology
//! tables into the workspace's in-memory types, and writes risk series and
//! trend tables as CSV.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `reader` | `CsvReaderConfig`, `read_station_csv`, `read_station_dir` |
//! | `archive` | `ArchiveName`: station and period from file names |
//! | `stations` | `read_station_coordinates` |
//! | `phenology` | `read_phenology`, `stage_date_quantile` |
//! | `writer` | `write_series_csv`, `write_trends_csv` |
//! | `error` | Error types |

mod archive;
mod error;
mod phenology;
mod reader;
mod stations;
mod writer;

pub use archive::ArchiveName;
pub use error::IoError;
pub use phenology::{PhenologyRecord, read_phenology, stage_date_quantile};
pub use reader::{CsvReaderConfig, read_station_csv, read_station_dir};
pub use stations::read_station_coordinates;
pub use writer::{write_series_csv, write_trends_csv};
