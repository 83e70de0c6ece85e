//! Station-by-station trend fitting.

use std::collections::BTreeMap;

use agrorisk_aggregate::{AggregateConfig, YearlyAggregate, aggregate_yearly};
use agrorisk_combine::{COMBINED_RISK, Source, combine};
use agrorisk_frame::{StationFrame, StationId};
use agrorisk_risk::Identity;
use agrorisk_stats::linear_regression;
use tracing::{debug, info};

use crate::config::TrendConfig;
use crate::error::TrendError;
use crate::model::TrendModel;
use crate::result::StationTrend;

/// Fits one linear trend of yearly risk against time per station.
///
/// For every distinct station in `frame`, in ascending order:
/// 1. restrict the records (and the secondary source of a combined model)
///    to that station and, if configured, to the configured hours;
/// 2. select the seasonal window;
/// 3. transform, optionally combine, and average per year under the
///    configured year basis;
/// 4. regress the defined yearly values on `year - baseline_year`.
///
/// Stations with fewer than three defined years are reported as
/// [`TrendClass::Undetermined`](crate::TrendClass::Undetermined).
///
/// # Errors
///
/// Returns [`TrendError::InvalidConfig`] for an invalid configuration and
/// [`TrendError::Aggregate`] / [`TrendError::Combine`] if a station's data
/// cannot be processed (for example a missing column).
#[tracing::instrument(skip(frame, model, config), fields(rows = frame.len()))]
pub fn fit_station_trends(
    frame: &StationFrame,
    model: &TrendModel<'_>,
    config: &TrendConfig,
) -> Result<Vec<StationTrend>, TrendError> {
    config.validate()?;

    let mut arena: BTreeMap<StationId, StationTrend> = BTreeMap::new();
    for station in frame.station_ids() {
        let yearly = station_yearly(frame, &station, model, config)?;

        let (x, y): (Vec<f64>, Vec<f64>) = yearly
            .years()
            .iter()
            .zip(yearly.risk())
            .filter_map(|(&year, v)| v.map(|v| (f64::from(year - config.baseline_year()), v)))
            .unzip();
        let fit = linear_regression(&x, &y);
        let trend = StationTrend::new(station.clone(), y.len(), fit, config.alpha());
        debug!(
            station = %station,
            years = trend.n_years,
            class = %trend.class,
            "fitted station trend"
        );
        arena.insert(station, trend);
    }

    info!(
        stations = arena.len(),
        model = %model.describe(),
        "fitted station trends"
    );
    Ok(arena.into_values().collect())
}

fn station_yearly(
    frame: &StationFrame,
    station: &StationId,
    model: &TrendModel<'_>,
    config: &TrendConfig,
) -> Result<YearlyAggregate, TrendError> {
    let prepare = |f: &StationFrame| {
        let f = f.filter_station(station);
        let f = match config.hours() {
            Some(hours) => f.filter_hours(hours),
            None => f,
        };
        f.select_window(config.window())
    };
    let aggregate = AggregateConfig::default()
        .with_moving_average(1)
        .with_year_basis(config.year_basis());
    let primary = prepare(frame);

    match *model {
        TrendModel::Single { column, transform } => {
            aggregate_yearly(&primary, column, transform, &aggregate)
                .map_err(|e| TrendError::aggregate(station, e))
        }
        TrendModel::Combined {
            primary_column,
            primary_transform,
            secondary,
            secondary_column,
            secondary_transform,
            keys,
            strategy,
        } => {
            let secondary = prepare(secondary);
            let combined = combine(
                Source::new(&primary, primary_column, primary_transform),
                Source::new(&secondary, secondary_column, secondary_transform),
                keys,
                strategy,
            )
            .map_err(|e| TrendError::combine(station, e))?;
            aggregate_yearly(
                &combined,
                COMBINED_RISK,
                &Identity,
                &aggregate.with_risk_column("combined_risk_yearly"),
            )
            .map_err(|e| TrendError::aggregate(station, e))
        }
    }
}
