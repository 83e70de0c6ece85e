use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

/// Top-level Agrorisk configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgroriskConfig {
    /// Named station data sources, e.g. `temperature` and `moisture`.
    pub sources: BTreeMap<String, SourceToml>,

    /// Station description file used to attach coordinates to trends.
    #[serde(default)]
    pub stations: Option<PathBuf>,

    /// JSON report path for the `risk` command.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Record filters applied while reading.
    #[serde(default)]
    pub filter: FilterToml,

    /// Seasonal window settings.
    pub window: WindowToml,

    /// Aggregation settings.
    #[serde(default)]
    pub aggregate: AggregateToml,

    /// Trend settings.
    #[serde(default)]
    pub trend: TrendToml,

    /// Risk models.
    #[serde(default, rename = "model")]
    pub models: Vec<ModelToml>,
}

/// One station data source: a product file or a directory of them.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceToml {
    pub path: PathBuf,
    #[serde(default)]
    pub columns: Option<Vec<String>>,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default = "default_missing")]
    pub missing: f64,
    /// Derived difference columns, e.g. dew-point depression `TT - TD`.
    #[serde(default)]
    pub derive: Vec<DifferenceToml>,
}

fn default_delimiter() -> char {
    ';'
}
fn default_missing() -> f64 {
    -999.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DifferenceToml {
    pub name: String,
    pub minuend: String,
    pub subtrahend: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FilterToml {
    /// Inclusive `[first, last]` year range.
    #[serde(default)]
    pub years: Option<[i32; 2]>,
    /// Station identifiers; empty keeps every station.
    #[serde(default)]
    pub stations: Vec<String>,
}

/// The window end is either a fixed `dd.mm` or derived from a phenological
/// stage, never both.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowToml {
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub end_stage: Option<StageToml>,
    /// Hours of day to keep; all hours when absent.
    #[serde(default)]
    pub hours: Option<Vec<u8>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StageToml {
    pub phenology: PathBuf,
    pub stage: u16,
    #[serde(default = "default_quantile")]
    pub quantile: f64,
}

fn default_quantile() -> f64 {
    0.5
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AggregateToml {
    #[serde(default = "default_reference")]
    pub reference: [i32; 2],
    #[serde(default = "default_moving_average")]
    pub moving_average: usize,
    /// `calendar` or `season`.
    #[serde(default = "default_year_basis")]
    pub year_basis: String,
}

impl Default for AggregateToml {
    fn default() -> Self {
        Self {
            reference: default_reference(),
            moving_average: default_moving_average(),
            year_basis: default_year_basis(),
        }
    }
}

fn default_reference() -> [i32; 2] {
    [1950, 1979]
}
fn default_moving_average() -> usize {
    7
}
fn default_year_basis() -> String {
    "calendar".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrendToml {
    #[serde(default)]
    pub baseline_year: i32,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

impl Default for TrendToml {
    fn default() -> Self {
        Self {
            baseline_year: 0,
            alpha: default_alpha(),
        }
    }
}

fn default_alpha() -> f64 {
    0.05
}

/// A single-source model, or a combined one when `secondary` is set.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelToml {
    pub name: String,
    pub primary: SideToml,
    #[serde(default)]
    pub secondary: Option<SideToml>,
    #[serde(default)]
    pub strategy: Option<String>,
    /// Join key fields; station, year, month, day and hour when absent.
    #[serde(default)]
    pub keys: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SideToml {
    pub source: String,
    pub column: String,
    pub transform: TransformToml,
}

/// Transform by `kind` with the parameters that kind takes.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransformToml {
    pub kind: String,
    #[serde(default)]
    pub t_min: Option<f64>,
    #[serde(default)]
    pub t_max: Option<f64>,
    #[serde(default)]
    pub b: Option<f64>,
    #[serde(default)]
    pub c: Option<f64>,
    #[serde(default)]
    pub base: Option<f64>,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub comparison: Option<String>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}
