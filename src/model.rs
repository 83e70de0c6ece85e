//! Resolved models and the station frames they read from.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use tracing::info;

use agrorisk_calendar::SeasonalWindow;
use agrorisk_combine::{JoinKeys, Strategy};
use agrorisk_frame::StationFrame;
use agrorisk_io::{read_station_csv, read_station_dir};
use agrorisk_risk::Transform;
use agrorisk_trend::TrendModel;

use crate::config::{AgroriskConfig, ModelToml, SideToml};
use crate::convert;

/// One column of a named source and the transform applied to it.
#[derive(Debug)]
pub struct Side {
    pub source: String,
    pub column: String,
    pub transform: Transform,
}

/// The second source of a combined model.
#[derive(Debug)]
pub struct Secondary {
    pub side: Side,
    pub keys: JoinKeys,
    pub strategy: Strategy,
}

/// A model with every name in it parsed.
#[derive(Debug)]
pub struct ModelSpec {
    pub name: String,
    pub primary: Side,
    pub secondary: Option<Secondary>,
}

impl ModelSpec {
    /// Borrow as a trend model; `frames` holds the prepared sources.
    pub fn trend_model<'a>(
        &'a self,
        frames: &'a BTreeMap<String, StationFrame>,
    ) -> Result<TrendModel<'a>> {
        let model = match &self.secondary {
            None => TrendModel::Single {
                column: &self.primary.column,
                transform: &self.primary.transform,
            },
            Some(sec) => TrendModel::Combined {
                primary_column: &self.primary.column,
                primary_transform: &self.primary.transform,
                secondary: frame(frames, &sec.side.source)?,
                secondary_column: &sec.side.column,
                secondary_transform: &sec.side.transform,
                keys: &sec.keys,
                strategy: sec.strategy,
            },
        };
        Ok(model)
    }
}

fn build_side(side: &SideToml, config: &AgroriskConfig) -> Result<Side> {
    if !config.sources.contains_key(&side.source) {
        bail!("unknown source {:?}", side.source);
    }
    Ok(Side {
        source: side.source.clone(),
        column: side.column.clone(),
        transform: convert::parse_transform(&side.transform)?,
    })
}

/// Resolves one `[[model]]` table.
pub fn build_model(model: &ModelToml, config: &AgroriskConfig) -> Result<ModelSpec> {
    let primary = build_side(&model.primary, config)
        .with_context(|| format!("model {:?}: invalid primary", model.name))?;
    let secondary = match (&model.secondary, &model.strategy) {
        (None, None) => None,
        (Some(side), Some(strategy)) => Some(Secondary {
            side: build_side(side, config)
                .with_context(|| format!("model {:?}: invalid secondary", model.name))?,
            keys: convert::build_join_keys(model.keys.as_deref())?,
            strategy: convert::parse_strategy(strategy)?,
        }),
        (Some(_), None) => bail!("model {:?}: secondary source needs a strategy", model.name),
        (None, Some(_)) => bail!("model {:?}: strategy given without a secondary", model.name),
    };
    Ok(ModelSpec {
        name: model.name.clone(),
        primary,
        secondary,
    })
}

/// Resolves every model; model names must be unique.
pub fn build_models(config: &AgroriskConfig) -> Result<Vec<ModelSpec>> {
    if config.models.is_empty() {
        bail!("no models configured: add at least one [[model]] table");
    }
    let mut specs: Vec<ModelSpec> = Vec::with_capacity(config.models.len());
    for m in &config.models {
        if specs.iter().any(|s| s.name == m.name) {
            bail!("duplicate model name {:?}", m.name);
        }
        specs.push(build_model(m, config)?);
    }
    Ok(specs)
}

/// Reads every source used by `models` and adds its derived columns.
pub fn load_sources(
    config: &AgroriskConfig,
    models: &[ModelSpec],
) -> Result<BTreeMap<String, StationFrame>> {
    let mut frames = BTreeMap::new();
    let used = models.iter().flat_map(|m| {
        std::iter::once(&m.primary.source).chain(m.secondary.as_ref().map(|s| &s.side.source))
    });
    for name in used {
        if frames.contains_key(name) {
            continue;
        }
        let source = config
            .sources
            .get(name)
            .with_context(|| format!("unknown source {name:?}"))?;
        let reader_cfg = convert::build_reader_config(source, &config.filter)?;
        let path = &source.path;
        info!(source = %name, path = %path.display(), "reading station data");
        let mut frame = if path.is_dir() {
            read_station_dir(path, &reader_cfg)
        } else {
            read_station_csv(path, &reader_cfg)
        }
        .with_context(|| format!("failed to read source {name:?}: {}", path.display()))?;
        for d in &source.derive {
            frame = frame
                .with_difference(d.name.as_str(), &d.minuend, &d.subtrahend)
                .with_context(|| format!("failed to derive {:?} in source {name:?}", d.name))?;
        }
        info!(source = %name, rows = frame.len(), stations = frame.station_ids().len(), "source loaded");
        frames.insert(name.clone(), frame);
    }
    Ok(frames)
}

/// Restricts every frame to `window` and, when given, to `hours`.
pub fn prepare_frames(
    frames: &BTreeMap<String, StationFrame>,
    window: &SeasonalWindow,
    hours: Option<&[u8]>,
) -> BTreeMap<String, StationFrame> {
    frames
        .iter()
        .map(|(name, frame)| {
            let frame = match hours {
                Some(h) => frame.filter_hours(h),
                None => frame.clone(),
            };
            (name.clone(), frame.select_window(window))
        })
        .collect()
}

/// Looks up a loaded source.
pub fn frame<'a>(frames: &'a BTreeMap<String, StationFrame>, name: &str) -> Result<&'a StationFrame> {
    frames
        .get(name)
        .with_context(|| format!("source {name:?} was not loaded"))
}

/// File-name form of a model name.
pub fn slug(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(models: &str) -> AgroriskConfig {
        let base = r#"
[sources.temperature]
path = "t"

[sources.moisture]
path = "m"

[window]
start = "20.07"
end = "15.09"
"#;
        toml::from_str(&format!("{base}\n{models}")).unwrap()
    }

    #[test]
    fn builds_single_and_combined() {
        let cfg = config(
            r#"
[[model]]
name = "leaf wetness 90"
primary = { source = "moisture", column = "RF_TU", transform = { kind = "leaf-wetness", threshold = 90.0 } }

[[model]]
name = "ltrh"
primary = { source = "temperature", column = "TT_TU", transform = { kind = "beta-temperature" } }
secondary = { source = "moisture", column = "RF_TU", transform = { kind = "identity" } }
strategy = "ltrh90"
keys = ["station", "year", "month", "day"]
"#,
        );
        let specs = build_models(&cfg).unwrap();
        assert_eq!(specs.len(), 2);
        assert!(specs[0].secondary.is_none());
        let sec = specs[1].secondary.as_ref().unwrap();
        assert_eq!(sec.strategy, Strategy::LTRH90);
        assert_eq!(sec.keys.fields().len(), 4);
    }

    #[test]
    fn rejects_inconsistent_models() {
        let unknown_source = config(
            r#"
[[model]]
name = "x"
primary = { source = "wind", column = "FF", transform = { kind = "identity" } }
"#,
        );
        assert!(build_models(&unknown_source).is_err());

        let missing_strategy = config(
            r#"
[[model]]
name = "x"
primary = { source = "temperature", column = "TT_TU", transform = { kind = "identity" } }
secondary = { source = "moisture", column = "RF_TU", transform = { kind = "identity" } }
"#,
        );
        assert!(build_models(&missing_strategy).is_err());

        let duplicate = config(
            r#"
[[model]]
name = "x"
primary = { source = "temperature", column = "TT_TU", transform = { kind = "identity" } }

[[model]]
name = "x"
primary = { source = "moisture", column = "RF_TU", transform = { kind = "identity" } }
"#,
        );
        assert!(build_models(&duplicate).is_err());
        assert!(build_models(&config("")).is_err());
    }

    #[test]
    fn slugs() {
        assert_eq!(slug("Moist Temperature (LTRH80)"), "moist_temperature__ltrh80_");
    }
}
