//! Left-outer join of two sources and composite risk computation.

use std::collections::HashMap;

use agrorisk_frame::StationFrame;
use agrorisk_risk::RiskTransform;
use tracing::{debug, info};

use crate::error::CombineError;
use crate::keys::JoinKeys;
use crate::strategy::Strategy;

/// Output column holding the transformed primary value.
pub const PRIMARY_RISK: &str = "primary_risk";
/// Output column holding the transformed secondary value.
pub const SECONDARY_RISK: &str = "secondary_risk";
/// Output column holding the composite risk.
pub const COMBINED_RISK: &str = "combined_risk";

/// One input of [`combine`]: a record set, the column to read and the
/// transform applied to it.
#[derive(Clone, Copy)]
pub struct Source<'a> {
    /// Records of this source.
    pub frame: &'a StationFrame,
    /// Value column to transform.
    pub column: &'a str,
    /// Transform applied to every present value.
    pub transform: &'a dyn RiskTransform,
}

impl<'a> Source<'a> {
    /// Bundles a source.
    pub fn new(
        frame: &'a StationFrame,
        column: &'a str,
        transform: &'a dyn RiskTransform,
    ) -> Self {
        Self {
            frame,
            column,
            transform,
        }
    }
}

/// Joins `secondary` onto `primary` and computes a composite risk per record.
///
/// The join is a left outer join on `keys` anchored on the primary source:
/// the output has exactly one row per primary record, in primary order.
/// Unmatched primary rows get a missing secondary value, missing secondary
/// risk and missing composite. Both sources are transformed before the
/// strategy is applied.
///
/// Output columns: the primary raw column, the secondary raw column,
/// `primary_risk`, `secondary_risk`, `combined_risk`.
///
/// # Errors
///
/// Returns [`CombineError::DuplicateKey`] if two secondary rows share a
/// join key, [`CombineError::Domain`] if [`Strategy::SqrtProduct`] meets a
/// negative product, and [`CombineError::Frame`] for a missing column or
/// clashing column names.
#[tracing::instrument(
    skip(primary, secondary, keys, strategy),
    fields(primary = primary.column, secondary = secondary.column, %strategy)
)]
pub fn combine(
    primary: Source<'_>,
    secondary: Source<'_>,
    keys: &JoinKeys,
    strategy: Strategy,
) -> Result<StationFrame, CombineError> {
    if keys.is_empty() {
        return Err(CombineError::EmptyKeys);
    }
    let primary_raw = primary.frame.column(primary.column)?;
    let secondary_values = secondary.frame.column(secondary.column)?;

    let mut index = HashMap::with_capacity(secondary.frame.len());
    for i in 0..secondary.frame.len() {
        let key = keys.project(secondary.frame.key(i));
        if index.insert(key, i).is_some() {
            return Err(CombineError::DuplicateKey {
                key: key.to_string(),
            });
        }
    }

    let n = primary.frame.len();
    let mut secondary_raw = Vec::with_capacity(n);
    let mut matched = 0usize;
    for i in 0..n {
        let hit = index.get(&keys.project(primary.frame.key(i))).copied();
        matched += usize::from(hit.is_some());
        secondary_raw.push(hit.and_then(|j| secondary_values[j]));
    }
    if matched < n {
        debug!(unmatched = n - matched, "primary rows without secondary match");
    }

    let primary_risk = primary.transform.apply_column(primary_raw);
    let secondary_risk = secondary.transform.apply_column(&secondary_raw);

    let mut combined = Vec::with_capacity(n);
    for i in 0..n {
        let value = match (primary_risk[i], secondary_risk[i], secondary_raw[i]) {
            (Some(p), Some(s), Some(raw)) => Some(composite(strategy, p, s, raw).map_err(
                |product| {
                    let k = primary.frame.key(i);
                    CombineError::Domain {
                        station: k.station.to_string(),
                        year: k.year,
                        month: k.month,
                        day: k.day,
                        hour: k.hour,
                        product,
                    }
                },
            )?),
            _ => None,
        };
        combined.push(value);
    }

    info!(rows = n, matched, "combined sources");

    let out = StationFrame::new(
        primary.frame.stations().to_vec(),
        primary.frame.years().to_vec(),
        primary.frame.months().to_vec(),
        primary.frame.days().to_vec(),
        primary.frame.hours().to_vec(),
        vec![
            (primary.column.to_string(), primary_raw.to_vec()),
            (secondary.column.to_string(), secondary_raw),
            (PRIMARY_RISK.to_string(), primary_risk),
            (SECONDARY_RISK.to_string(), secondary_risk),
            (COMBINED_RISK.to_string(), combined),
        ],
    )?;
    Ok(out)
}

/// Applies a strategy; `Err` carries the offending product.
fn composite(strategy: Strategy, p: f64, s: f64, secondary_raw: f64) -> Result<f64, f64> {
    match strategy {
        Strategy::Product => Ok(p * s),
        Strategy::SqrtProduct => {
            let product = p * s;
            if product >= 0.0 {
                Ok(product.sqrt())
            } else {
                Err(product)
            }
        }
        Strategy::ThresholdGated { threshold } => {
            Ok(if secondary_raw > threshold { p } else { 0.0 })
        }
    }
}
