//! Yearly grouping of windowed records.

use std::collections::BTreeMap;

use agrorisk_calendar::season_year;
use agrorisk_frame::StationFrame;
use agrorisk_risk::RiskTransform;
use agrorisk_stats::{max_present, mean_present, min_present, trailing_mean};
use tracing::{debug, info};

use crate::config::{AggregateConfig, YearBasis};
use crate::error::AggregateError;
use crate::result::{Baseline, YearlyAggregate};

/// Transforms `value_column`, groups records by year and summarises the
/// resulting risk.
///
/// Steps:
/// 1. The transform is applied to every present value of `value_column`;
///    missing values stay missing. The result is added as the derived
///    risk column.
/// 2. Records are grouped by year (calendar or season year) and every
///    column is averaged over its present values. A year whose values are
///    all missing gets `None`.
/// 3. The baseline is the mean/min/max of the defined yearly risk values
///    inside the reference period.
/// 4. The rolling series is the trailing mean over `moving_average`
///    consecutive calendar years; it is `None` for the first years and
///    wherever the window touches a missing year or value.
///
/// The year index contains only years present in the input, in ascending
/// order.
///
/// # Errors
///
/// Returns [`AggregateError::MissingColumn`] if `value_column` is absent,
/// [`AggregateError::InvalidWindow`] for a zero moving average and
/// [`AggregateError::Frame`] if the risk column name is already taken.
#[tracing::instrument(skip(frame, transform, config), fields(rows = frame.len()))]
pub fn aggregate_yearly(
    frame: &StationFrame,
    value_column: &str,
    transform: &dyn RiskTransform,
    config: &AggregateConfig,
) -> Result<YearlyAggregate, AggregateError> {
    config.validate()?;

    let risk = transform.apply_column(frame.column(value_column)?);
    let derived = frame.with_column(config.risk_column(), risk)?;

    let mut groups: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for i in 0..derived.len() {
        let key = derived.key(i);
        let year = match config.year_basis() {
            YearBasis::Calendar => key.year,
            YearBasis::Season { start_month } => season_year(key.year, key.month, start_month)
                .map_err(|e| AggregateError::InvalidConfig {
                    reason: e.to_string(),
                })?,
        };
        groups.entry(year).or_default().push(i);
    }

    let years: Vec<i32> = groups.keys().copied().collect();
    let columns: Vec<(String, Vec<Option<f64>>)> = derived
        .columns()
        .map(|(name, values)| {
            let means = groups
                .values()
                .map(|rows| {
                    let picked: Vec<Option<f64>> = rows.iter().map(|&i| values[i]).collect();
                    mean_present(&picked)
                })
                .collect();
            (name.to_string(), means)
        })
        .collect();

    let yearly_risk = columns
        .iter()
        .find(|(n, _)| n == config.risk_column())
        .map(|(_, v)| v.clone())
        .unwrap_or_default();

    let reference = config.reference();
    let in_reference: Vec<Option<f64>> = years
        .iter()
        .zip(&yearly_risk)
        .filter(|(y, _)| reference.contains(**y))
        .map(|(_, v)| *v)
        .collect();
    let baseline = Baseline {
        mean: mean_present(&in_reference),
        min: min_present(&in_reference),
        max: max_present(&in_reference),
    };
    if baseline.mean.is_none() {
        debug!(
            start = reference.start(),
            end = reference.end(),
            "no defined risk values in reference period"
        );
    }

    let rolling = trailing_mean(&years, &yearly_risk, config.moving_average());

    info!(
        column = value_column,
        transform = %transform.label(),
        years = years.len(),
        "aggregated yearly risk"
    );

    Ok(YearlyAggregate {
        years,
        columns,
        risk_column: config.risk_column().to_string(),
        rolling,
        baseline,
        reference,
        moving_average: config.moving_average(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrorisk_frame::StationId;
    use agrorisk_risk::Identity;
    use approx::assert_relative_eq;

    fn frame(years: &[i32], months: &[u8], values: &[Option<f64>]) -> StationFrame {
        let n = years.len();
        let s = StationId::new("1").unwrap();
        StationFrame::new(
            vec![s; n],
            years.to_vec(),
            months.to_vec(),
            (1..=n as u8).collect(),
            vec![0; n],
            vec![("v".to_string(), values.to_vec())],
        )
        .unwrap()
    }

    #[test]
    fn missing_values_are_skipped_not_zeroed() {
        let f = frame(&[2000, 2000, 2000], &[1, 1, 1], &[Some(2.0), None, Some(4.0)]);
        let agg = aggregate_yearly(&f, "v", &Identity, &AggregateConfig::default()).unwrap();
        assert_eq!(agg.years(), &[2000]);
        assert_relative_eq!(agg.risk()[0].unwrap(), 3.0);
    }

    #[test]
    fn all_missing_year_is_none() {
        let f = frame(&[2000, 2001], &[1, 1], &[None, Some(1.0)]);
        let agg = aggregate_yearly(&f, "v", &Identity, &AggregateConfig::default()).unwrap();
        assert_eq!(agg.risk(), &[None, Some(1.0)]);
    }

    #[test]
    fn raw_columns_are_averaged_too() {
        let f = frame(&[2000, 2000], &[1, 2], &[Some(10.0), Some(20.0)]);
        let agg =
            aggregate_yearly(&f, "v", &|x: f64| x / 10.0, &AggregateConfig::default()).unwrap();
        assert_eq!(agg.column("v"), Some(&[Some(15.0)][..]));
        assert_eq!(agg.column("risk"), Some(&[Some(1.5)][..]));
        assert_eq!(agg.column_names().collect::<Vec<_>>(), vec!["v", "risk"]);
    }

    #[test]
    fn season_basis_moves_autumn_to_next_year() {
        let f = frame(
            &[2000, 2000, 2001],
            &[11, 12, 2],
            &[Some(1.0), Some(3.0), Some(5.0)],
        );
        let cfg = AggregateConfig::default().with_year_basis(YearBasis::Season { start_month: 10 });
        let agg = aggregate_yearly(&f, "v", &Identity, &cfg).unwrap();
        assert_eq!(agg.years(), &[2001]);
        assert_relative_eq!(agg.risk()[0].unwrap(), 3.0);
    }

    #[test]
    fn missing_column_is_reported() {
        let f = frame(&[2000], &[1], &[Some(1.0)]);
        let err = aggregate_yearly(&f, "TT_TU", &Identity, &AggregateConfig::default()).unwrap_err();
        assert_eq!(
            err,
            AggregateError::MissingColumn {
                name: "TT_TU".to_string()
            }
        );
    }

    #[test]
    fn risk_column_clash_is_reported() {
        let f = frame(&[2000], &[1], &[Some(1.0)]);
        let cfg = AggregateConfig::default().with_risk_column("v");
        assert!(matches!(
            aggregate_yearly(&f, "v", &Identity, &cfg),
            Err(AggregateError::Frame { .. })
        ));
    }

    #[test]
    fn empty_input_gives_empty_series() {
        let f = frame(&[], &[], &[]);
        let agg = aggregate_yearly(&f, "v", &Identity, &AggregateConfig::default()).unwrap();
        assert!(agg.years().is_empty());
        assert!(agg.rolling().is_empty());
        assert_eq!(agg.baseline(), Baseline::default());
    }
}
