use agrorisk_combine::{
    COMBINED_RISK, CombineError, JoinKeys, KeyField, PRIMARY_RISK, SECONDARY_RISK, Source,
    Strategy, combine,
};
use agrorisk_frame::{StationFrame, StationId};
use agrorisk_risk::{BetaTemperature, ExponentialHumidity, Identity, RiskTransform};
use approx::assert_relative_eq;

fn sid(s: &str) -> StationId {
    StationId::new(s).unwrap()
}

fn frame(hours: &[u8], column: &str, values: &[Option<f64>]) -> StationFrame {
    let n = hours.len();
    StationFrame::new(
        vec![sid("1550"); n],
        vec![2003; n],
        vec![6; n],
        vec![15; n],
        hours.to_vec(),
        vec![(column.to_string(), values.to_vec())],
    )
    .unwrap()
}

fn temperature() -> StationFrame {
    frame(
        &[0, 1, 2, 3, 4],
        "TT_TU",
        &[Some(18.0), Some(20.0), None, Some(22.0), Some(25.0)],
    )
}

fn humidity() -> StationFrame {
    // Hour 1 missing entirely, hour 3 present but missing its value.
    frame(&[4, 0, 2, 3], "RF_STD", &[Some(95.0), Some(85.0), Some(100.0), None])
}

#[test]
fn left_join_keeps_every_primary_row_in_order() {
    let (t, h) = (temperature(), humidity());
    let out = combine(
        Source::new(&t, "TT_TU", &BetaTemperature::default()),
        Source::new(&h, "RF_STD", &ExponentialHumidity::default()),
        &JoinKeys::default(),
        Strategy::Product,
    )
    .unwrap();

    assert_eq!(out.len(), t.len());
    assert_eq!(out.hours(), t.hours());
    assert_eq!(
        out.column_names().collect::<Vec<_>>(),
        vec!["TT_TU", "RF_STD", PRIMARY_RISK, SECONDARY_RISK, COMBINED_RISK]
    );
    assert_eq!(
        out.column("RF_STD").unwrap(),
        &[Some(85.0), None, Some(100.0), None, Some(95.0)]
    );

    let matched = out
        .column("RF_STD")
        .unwrap()
        .iter()
        .filter(|v| v.is_some())
        .count();
    let defined = out
        .column(COMBINED_RISK)
        .unwrap()
        .iter()
        .filter(|v| v.is_some())
        .count();
    // Hour 2 matches but has no temperature.
    assert_eq!(matched, 3);
    assert_eq!(defined, 2);
    assert!(defined <= matched);
}

#[test]
fn product_multiplies_transformed_values() {
    let (t, h) = (temperature(), humidity());
    let beta = BetaTemperature::default();
    let rh = ExponentialHumidity::default();
    let out = combine(
        Source::new(&t, "TT_TU", &beta),
        Source::new(&h, "RF_STD", &rh),
        &JoinKeys::default(),
        Strategy::Product,
    )
    .unwrap();
    let combined = out.column(COMBINED_RISK).unwrap();
    assert_relative_eq!(combined[0].unwrap(), beta.apply(18.0) * rh.apply(85.0));
    assert_relative_eq!(combined[4].unwrap(), beta.apply(25.0) * rh.apply(95.0));
}

#[test]
fn sqrt_product_is_geometric_mean() {
    let (t, h) = (temperature(), humidity());
    let out = combine(
        Source::new(&t, "TT_TU", &|_: f64| 0.25),
        Source::new(&h, "RF_STD", &|_: f64| 1.0),
        &JoinKeys::default(),
        "sqrt".parse().unwrap(),
    )
    .unwrap();
    assert_relative_eq!(out.column(COMBINED_RISK).unwrap()[0].unwrap(), 0.5);
}

#[test]
fn sqrt_of_negative_product_is_domain_error() {
    let (t, h) = (temperature(), humidity());
    let err = combine(
        Source::new(&t, "TT_TU", &|x: f64| -x),
        Source::new(&h, "RF_STD", &Identity),
        &JoinKeys::default(),
        Strategy::SqrtProduct,
    )
    .unwrap_err();
    match err {
        CombineError::Domain {
            station,
            hour,
            product,
            ..
        } => {
            assert_eq!(station, "01550");
            assert_eq!(hour, 0);
            assert_relative_eq!(product, -18.0 * 85.0);
        }
        other => panic!("expected domain error, got {other:?}"),
    }
}

#[test]
fn threshold_gate_uses_raw_secondary_strictly() {
    let t = frame(&[0, 1, 2], "TT_TU", &[Some(20.0); 3]);
    let h = frame(&[0, 1, 2], "RF_STD", &[Some(80.0), Some(80.1), None]);
    let beta = BetaTemperature::default();
    let out = combine(
        Source::new(&t, "TT_TU", &beta),
        Source::new(&h, "RF_STD", &ExponentialHumidity::default()),
        &JoinKeys::default(),
        "ltrh80".parse().unwrap(),
    )
    .unwrap();
    let combined = out.column(COMBINED_RISK).unwrap();
    assert_eq!(combined[0], Some(0.0));
    assert_relative_eq!(combined[1].unwrap(), beta.apply(20.0));
    assert_eq!(combined[2], None, "missing secondary gives missing composite");
}

#[test]
fn duplicate_secondary_keys_are_rejected() {
    let t = temperature();
    let h = frame(&[0, 1], "RF_STD", &[Some(90.0), Some(91.0)]);
    let daily = JoinKeys::new([KeyField::Station, KeyField::Year, KeyField::Month, KeyField::Day]);
    let err = combine(
        Source::new(&t, "TT_TU", &Identity),
        Source::new(&h, "RF_STD", &Identity),
        &daily,
        Strategy::Product,
    )
    .unwrap_err();
    assert!(matches!(err, CombineError::DuplicateKey { .. }));
}

#[test]
fn coarser_keys_broadcast_secondary_values() {
    let t = temperature();
    let h = frame(&[12], "RF_STD", &[Some(90.0)]);
    let daily = JoinKeys::new([KeyField::Station, KeyField::Year, KeyField::Month, KeyField::Day]);
    let out = combine(
        Source::new(&t, "TT_TU", &Identity),
        Source::new(&h, "RF_STD", &Identity),
        &daily,
        Strategy::Product,
    )
    .unwrap();
    assert!(out.column("RF_STD").unwrap().iter().all(|v| *v == Some(90.0)));
}

#[test]
fn other_station_does_not_match() {
    let t = temperature();
    let h = StationFrame::new(
        vec![sid("2947")],
        vec![2003],
        vec![6],
        vec![15],
        vec![0],
        vec![("RF_STD".to_string(), vec![Some(99.0)])],
    )
    .unwrap();
    let out = combine(
        Source::new(&t, "TT_TU", &Identity),
        Source::new(&h, "RF_STD", &Identity),
        &JoinKeys::default(),
        Strategy::Product,
    )
    .unwrap();
    assert!(out.column(COMBINED_RISK).unwrap().iter().all(Option::is_none));
}

#[test]
fn empty_keys_are_rejected() {
    let t = temperature();
    let err = combine(
        Source::new(&t, "TT_TU", &Identity),
        Source::new(&t, "TT_TU", &Identity),
        &JoinKeys::new([]),
        Strategy::Product,
    )
    .unwrap_err();
    assert_eq!(err, CombineError::EmptyKeys);
}
