//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use agrorisk_aggregate::{AggregateConfig, ReferencePeriod, YearBasis};
use agrorisk_calendar::{DayMonth, SeasonalWindow};
use agrorisk_combine::{JoinKeys, KeyField, Strategy};
use agrorisk_frame::StationId;
use agrorisk_io::{CsvReaderConfig, read_phenology, stage_date_quantile};
use agrorisk_risk::{
    BetaTemperature, Comparison, ExponentialHumidity, TemperatureBand, Threshold, Transform,
};
use agrorisk_trend::TrendConfig;

use crate::config::*;

/// Parses a comparison operator, either symbolic (`>=`) or named (`at-least`).
pub fn parse_comparison(s: &str) -> Result<Comparison> {
    match s.trim().to_lowercase().as_str() {
        ">=" | "at-least" => Ok(Comparison::AtLeast),
        ">" | "above" => Ok(Comparison::Above),
        "<=" | "at-most" => Ok(Comparison::AtMost),
        "<" | "below" => Ok(Comparison::Below),
        other => bail!("unknown comparison: {other:?}"),
    }
}

/// Parses a join key field name.
pub fn parse_key_field(s: &str) -> Result<KeyField> {
    match s.trim().to_lowercase().as_str() {
        "station" | "stations_id" => Ok(KeyField::Station),
        "year" => Ok(KeyField::Year),
        "month" => Ok(KeyField::Month),
        "day" => Ok(KeyField::Day),
        "hour" => Ok(KeyField::Hour),
        other => bail!("unknown join key: {other:?}"),
    }
}

/// Parses a combination strategy name.
pub fn parse_strategy(s: &str) -> Result<Strategy> {
    s.parse::<Strategy>()
        .with_context(|| format!("invalid strategy {s:?}"))
}

fn require(value: Option<f64>, kind: &str, name: &str) -> Result<f64> {
    value.with_context(|| format!("transform {kind:?} requires `{name}`"))
}

/// Converts a TOML transform specification into a [`Transform`].
///
/// Parameters the kind does not take are rejected so a typo never falls
/// back to a default silently.
pub fn parse_transform(t: &TransformToml) -> Result<Transform> {
    let kind = t.kind.trim().to_lowercase();
    let given: Vec<&str> = [
        ("t_min", t.t_min.is_some()),
        ("t_max", t.t_max.is_some()),
        ("b", t.b.is_some()),
        ("c", t.c.is_some()),
        ("base", t.base.is_some()),
        ("threshold", t.threshold.is_some()),
        ("comparison", t.comparison.is_some()),
        ("min", t.min.is_some()),
        ("max", t.max.is_some()),
    ]
    .into_iter()
    .filter_map(|(name, set)| set.then_some(name))
    .collect();
    let allowed: &[&str] = match kind.as_str() {
        "beta-temperature" => &["t_min", "t_max", "b", "c"],
        "exponential-humidity" => &["base"],
        "threshold" => &["threshold", "comparison"],
        "leaf-wetness" | "dryness" | "dew-point-depression" => &["threshold"],
        "temperature-band" => &["min", "max"],
        "identity" => &[],
        other => bail!("unknown transform kind: {other:?}"),
    };
    if let Some(extra) = given.iter().find(|g| !allowed.contains(g)) {
        bail!("transform {kind:?} does not take `{extra}`");
    }

    let transform: Transform = match kind.as_str() {
        "beta-temperature" if given.is_empty() => BetaTemperature::default().into(),
        "beta-temperature" => BetaTemperature::new(
            require(t.t_min, &kind, "t_min")?,
            require(t.t_max, &kind, "t_max")?,
            require(t.b, &kind, "b")?,
            require(t.c, &kind, "c")?,
        )?
        .into(),
        "exponential-humidity" => match t.base {
            Some(base) => ExponentialHumidity::new(base)?.into(),
            None => ExponentialHumidity::default().into(),
        },
        "threshold" => {
            let comparison = match &t.comparison {
                Some(c) => parse_comparison(c)?,
                None => Comparison::AtLeast,
            };
            Threshold::new(require(t.threshold, &kind, "threshold")?, comparison)?.into()
        }
        "leaf-wetness" => Threshold::leaf_wetness(require(t.threshold, &kind, "threshold")?)?.into(),
        "dryness" => Threshold::dryness(require(t.threshold, &kind, "threshold")?)?.into(),
        "dew-point-depression" => {
            Threshold::dew_point_depression(require(t.threshold, &kind, "threshold")?)?.into()
        }
        "temperature-band" => TemperatureBand::new(
            require(t.min, &kind, "min")?,
            require(t.max, &kind, "max")?,
        )?
        .into(),
        _ => Transform::Identity,
    };
    Ok(transform)
}

/// Builds [`JoinKeys`]; all five record fields when `keys` is `None`.
pub fn build_join_keys(keys: Option<&[String]>) -> Result<JoinKeys> {
    let Some(keys) = keys else {
        return Ok(JoinKeys::default());
    };
    let fields = keys
        .iter()
        .map(|k| parse_key_field(k))
        .collect::<Result<Vec<_>>>()?;
    let keys = JoinKeys::new(fields);
    if keys.is_empty() {
        bail!("join keys must not be empty");
    }
    Ok(keys)
}

/// Builds a [`CsvReaderConfig`] for one source under the global filters.
pub fn build_reader_config(source: &SourceToml, filter: &FilterToml) -> Result<CsvReaderConfig> {
    if !source.delimiter.is_ascii() {
        bail!("delimiter must be an ASCII character, got {:?}", source.delimiter);
    }
    let mut cfg = CsvReaderConfig::default()
        .with_delimiter(source.delimiter as u8)
        .with_missing_sentinel(source.missing);
    if let Some(ref columns) = source.columns {
        cfg = cfg.with_value_columns(columns.iter().cloned());
    }
    if let Some([start, end]) = filter.years {
        cfg = cfg.with_years(start, end);
    }
    if !filter.stations.is_empty() {
        let stations = filter
            .stations
            .iter()
            .map(|s| StationId::new(s))
            .collect::<Result<Vec<_>, _>>()
            .context("invalid station in [filter].stations")?;
        cfg = cfg.with_stations(stations);
    }
    cfg.validate()?;
    Ok(cfg)
}

/// Builds the [`SeasonalWindow`]; a stage-derived end is read from the
/// phenology file.
pub fn build_window(window: &WindowToml) -> Result<SeasonalWindow> {
    let start: DayMonth = window
        .start
        .parse()
        .with_context(|| format!("invalid window start {:?}", window.start))?;
    let end = match (&window.end, &window.end_stage) {
        (Some(end), None) => end
            .parse()
            .with_context(|| format!("invalid window end {end:?}"))?,
        (None, Some(stage)) => {
            let records = read_phenology(&stage.phenology).with_context(|| {
                format!("failed to read phenology: {}", stage.phenology.display())
            })?;
            stage_date_quantile(&records, stage.stage, stage.quantile)?
        }
        (Some(_), Some(_)) => bail!("window must have exactly one of end or end_stage, got both"),
        (None, None) => bail!("window must have exactly one of end or end_stage, got neither"),
    };
    Ok(SeasonalWindow::new(start, end))
}

/// Parses the year basis; `season` starts at the window's start month and
/// needs a window that wraps the year boundary.
pub fn parse_year_basis(s: &str, window: &SeasonalWindow) -> Result<YearBasis> {
    match s.trim().to_lowercase().as_str() {
        "calendar" => Ok(YearBasis::Calendar),
        "season" if window.wraps() => Ok(YearBasis::Season {
            start_month: window.start().month(),
        }),
        "season" => bail!("season year basis needs a window that wraps the year, got {window}"),
        other => bail!("unknown year basis: {other:?}"),
    }
}

/// Builds an [`AggregateConfig`].
pub fn build_aggregate_config(
    aggregate: &AggregateToml,
    window: &SeasonalWindow,
) -> Result<AggregateConfig> {
    let [start, end] = aggregate.reference;
    let cfg = AggregateConfig::default()
        .with_reference(ReferencePeriod::new(start, end)?)
        .with_moving_average(aggregate.moving_average)
        .with_year_basis(parse_year_basis(&aggregate.year_basis, window)?);
    cfg.validate()?;
    Ok(cfg)
}

/// Builds a [`TrendConfig`] over `window`, grouping years the same way as
/// the aggregation settings.
pub fn build_trend_config(
    trend: &TrendToml,
    aggregate: &AggregateToml,
    window_toml: &WindowToml,
    window: SeasonalWindow,
) -> Result<TrendConfig> {
    let basis = parse_year_basis(&aggregate.year_basis, &window)?;
    let mut cfg = TrendConfig::new(window)
        .with_baseline_year(trend.baseline_year)
        .with_alpha(trend.alpha)
        .with_year_basis(basis);
    if let Some(ref hours) = window_toml.hours {
        cfg = cfg.with_hours(hours.clone());
    }
    cfg.validate()?;
    Ok(cfg)
}
