use agrorisk_aggregate::{
    AggregateConfig, AggregateError, Baseline, ReferencePeriod, aggregate_yearly,
};
use agrorisk_frame::{RecordKey, StationFrame, StationFrameBuilder, StationId};
use agrorisk_risk::{BetaTemperature, Identity, RiskTransform};
use approx::assert_relative_eq;

/// Four summer records per year with `value = year - 1960 + offset`.
fn series(years: &[i32]) -> StationFrame {
    let station = StationId::new("2947").unwrap();
    let mut b = StationFrameBuilder::new(["TT_TU"]);
    for &year in years {
        for (i, offset) in [-1.5, -0.5, 0.5, 1.5].into_iter().enumerate() {
            let key = RecordKey {
                station: &station,
                year,
                month: 7,
                day: 1 + i as u8,
                hour: 12,
            };
            b.push(key, &[Some(f64::from(year - 1960) + offset)]).unwrap();
        }
    }
    b.build().unwrap()
}

#[test]
fn gap_year_poisons_rolling_windows() {
    let frame = series(&[1960, 1961, 1963, 1964, 1965]);
    let cfg = AggregateConfig::default()
        .with_moving_average(2)
        .with_reference(ReferencePeriod::new(1960, 1965).unwrap());
    let agg = aggregate_yearly(&frame, "TT_TU", &Identity, &cfg).unwrap();

    assert_eq!(agg.years(), &[1960, 1961, 1963, 1964, 1965]);
    let rolling = agg.rolling();
    assert_eq!(rolling[0], None);
    assert_relative_eq!(rolling[1].unwrap(), 0.5);
    assert_eq!(rolling[2], None, "window 1962-1963 spans the gap");
    assert_relative_eq!(rolling[3].unwrap(), 3.5);
    assert_relative_eq!(rolling[4].unwrap(), 4.5);
}

#[test]
fn first_n_minus_one_years_are_undefined() {
    let frame = series(&(1960..1970).collect::<Vec<_>>());
    let cfg = AggregateConfig::default().with_moving_average(4);
    let agg = aggregate_yearly(&frame, "TT_TU", &Identity, &cfg).unwrap();
    assert!(agg.rolling()[..3].iter().all(Option::is_none));
    assert!(agg.rolling()[3..].iter().all(Option::is_some));
    assert_relative_eq!(agg.rolling()[3].unwrap(), 1.5);
}

#[test]
fn window_of_one_reproduces_yearly_series() {
    let frame = series(&[1970, 1971, 1975]);
    let cfg = AggregateConfig::default().with_moving_average(1);
    let agg = aggregate_yearly(&frame, "TT_TU", &Identity, &cfg).unwrap();
    assert_eq!(agg.rolling(), agg.risk());
}

#[test]
fn one_year_slice_matches_multi_year_aggregate() {
    let transform = BetaTemperature::default();
    let shifted = |x: f64| transform.apply(x + 5.0);
    let years: Vec<i32> = (1960..1980).collect();
    let frame = series(&years);
    let cfg = AggregateConfig::default();
    let all = aggregate_yearly(&frame, "TT_TU", &shifted, &cfg).unwrap();

    for year in [1960, 1969, 1979] {
        let slice = frame.filter_years(year, year);
        let one = aggregate_yearly(&slice, "TT_TU", &shifted, &cfg).unwrap();
        assert_eq!(one.years(), &[year]);
        assert_relative_eq!(
            one.risk()[0].unwrap(),
            all.risk_for(year).unwrap(),
            epsilon = 1e-15
        );
    }
}

#[test]
fn baseline_covers_reference_years_only() {
    let frame = series(&(1960..=1970).collect::<Vec<_>>());
    let cfg = AggregateConfig::default().with_reference(ReferencePeriod::new(1962, 1964).unwrap());
    let agg = aggregate_yearly(&frame, "TT_TU", &Identity, &cfg).unwrap();
    let b = agg.baseline();
    assert_relative_eq!(b.mean.unwrap(), 3.0);
    assert_relative_eq!(b.min.unwrap(), 2.0);
    assert_relative_eq!(b.max.unwrap(), 4.0);
}

#[test]
fn empty_reference_yields_undefined_baseline() {
    let frame = series(&[2000, 2001]);
    let cfg = AggregateConfig::default().with_reference(ReferencePeriod::new(1950, 1979).unwrap());
    let agg = aggregate_yearly(&frame, "TT_TU", &Identity, &cfg).unwrap();
    assert_eq!(agg.baseline(), Baseline::default());
}

#[test]
fn labeled_series_for_dashboard() {
    let frame = series(&[1960, 1961, 1962]);
    let cfg = AggregateConfig::default()
        .with_moving_average(2)
        .with_reference(ReferencePeriod::new(1960, 1961).unwrap());
    let agg = aggregate_yearly(&frame, "TT_TU", &Identity, &cfg).unwrap();
    let series = agg.labeled_series("temperature risk");

    let labels: Vec<&str> = series.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "yearly temperature risk",
            "2 years average",
            "historic average temperature risk (1960-1961)",
            "historic minimum temperature risk (1960-1961)",
            "historic maximum temperature risk (1960-1961)",
        ]
    );
    assert!(series.iter().all(|s| s.years == [1960, 1961, 1962]));
    assert_eq!(series[2].values, vec![Some(0.5); 3]);

    let json = serde_json::to_value(&series[1]).unwrap();
    assert_eq!(json["values"][0], serde_json::Value::Null);
}

#[test]
fn zero_window_is_an_error() {
    let frame = series(&[2000]);
    let cfg = AggregateConfig::default().with_moving_average(0);
    assert_eq!(
        aggregate_yearly(&frame, "TT_TU", &Identity, &cfg).unwrap_err(),
        AggregateError::InvalidWindow { window: 0 }
    );
}
