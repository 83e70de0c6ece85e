//! Aggregation outputs.

use serde::Serialize;

use crate::config::ReferencePeriod;

/// Summary of the yearly risk over the reference period.
///
/// Every field is `None` when no reference year has a defined risk value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Baseline {
    /// Mean of the yearly risk values.
    pub mean: Option<f64>,
    /// Smallest yearly risk value.
    pub min: Option<f64>,
    /// Largest yearly risk value.
    pub max: Option<f64>,
}

/// A named series aligned to a year index, ready for plotting or export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledSeries {
    /// Legend label.
    pub label: String,
    /// Year index.
    pub years: Vec<i32>,
    /// One value per year; `None` where undefined.
    pub values: Vec<Option<f64>>,
}

/// Per-year means of a windowed record set plus the derived risk statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyAggregate {
    pub(crate) years: Vec<i32>,
    pub(crate) columns: Vec<(String, Vec<Option<f64>>)>,
    pub(crate) risk_column: String,
    pub(crate) rolling: Vec<Option<f64>>,
    pub(crate) baseline: Baseline,
    pub(crate) reference: ReferencePeriod,
    pub(crate) moving_average: usize,
}

impl YearlyAggregate {
    /// Sorted years present in the input.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Yearly means of a named column, including the derived risk column.
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Names of all aggregated columns.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    /// Yearly mean risk.
    pub fn risk(&self) -> &[Option<f64>] {
        self.column(&self.risk_column).unwrap_or(&[])
    }

    /// Trailing moving average of the yearly risk.
    pub fn rolling(&self) -> &[Option<f64>] {
        &self.rolling
    }

    /// Historical baseline of the yearly risk.
    pub fn baseline(&self) -> Baseline {
        self.baseline
    }

    /// Reference period the baseline was computed over.
    pub fn reference(&self) -> ReferencePeriod {
        self.reference
    }

    /// Moving-average window in years.
    pub fn moving_average(&self) -> usize {
        self.moving_average
    }

    /// Yearly risk for one year, if that year is in the index.
    pub fn risk_for(&self, year: i32) -> Option<f64> {
        let i = self.years.binary_search(&year).ok()?;
        self.risk().get(i).copied().flatten()
    }

    /// The five dashboard series for a model called `name`: yearly risk,
    /// moving average and the historic mean/min/max as constant lines.
    pub fn labeled_series(&self, name: &str) -> Vec<LabeledSeries> {
        let (s, e) = (self.reference.start(), self.reference.end());
        let constant = |label: String, v: Option<f64>| LabeledSeries {
            label,
            years: self.years.clone(),
            values: vec![v; self.years.len()],
        };
        vec![
            LabeledSeries {
                label: format!("yearly {name}"),
                years: self.years.clone(),
                values: self.risk().to_vec(),
            },
            LabeledSeries {
                label: format!("{} years average", self.moving_average),
                years: self.years.clone(),
                values: self.rolling.clone(),
            },
            constant(
                format!("historic average {name} ({s}-{e})"),
                self.baseline.mean,
            ),
            constant(
                format!("historic minimum {name} ({s}-{e})"),
                self.baseline.min,
            ),
            constant(
                format!("historic maximum {name} ({s}-{e})"),
                self.baseline.max,
            ),
        ]
    }
}
