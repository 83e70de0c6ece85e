//! Trend command: per-station linear trends of the yearly risk.

use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use agrorisk_io::{read_station_coordinates, write_trends_csv};
use agrorisk_trend::{TrendClass, attach_coordinates, fit_station_trends};

use crate::cli::TrendArgs;
use crate::config::AgroriskConfig;
use crate::convert;
use crate::model;

/// Run the per-station trend pipeline.
pub fn run(args: TrendArgs) -> Result<()> {
    let _cmd = info_span!("trend").entered();
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: AgroriskConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;

    let window = convert::build_window(&config.window)?;
    let trend_cfg =
        convert::build_trend_config(&config.trend, &config.aggregate, &config.window, window)?;
    let mut specs = model::build_models(&config)?;
    if let Some(ref name) = args.model {
        specs.retain(|s| &s.name == name);
        if specs.is_empty() {
            bail!("no model named {name:?} in {}", args.config.display());
        }
    }
    let frames = model::load_sources(&config, &specs)?;

    let coordinates = match config.stations {
        Some(ref path) => read_station_coordinates(path)
            .with_context(|| format!("failed to read station list: {}", path.display()))?,
        None => BTreeMap::new(),
    };

    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!("failed to create directory: {}", args.output_dir.display())
    })?;

    for spec in &specs {
        let primary = model::frame(&frames, &spec.primary.source)?;
        let trend_model = spec.trend_model(&frames)?;
        let mut trends = fit_station_trends(primary, &trend_model, &trend_cfg)
            .with_context(|| format!("model {:?}: trend fitting failed", spec.name))?;
        attach_coordinates(&mut trends, &coordinates);

        let count = |class: TrendClass| trends.iter().filter(|t| t.class == class).count();
        info!(
            model = %spec.name,
            stations = trends.len(),
            increasing = count(TrendClass::SignificantIncreasing),
            decreasing = count(TrendClass::SignificantDecreasing),
            non_significant = count(TrendClass::NonSignificant),
            undetermined = count(TrendClass::Undetermined),
            "trends fitted"
        );

        let path = args
            .output_dir
            .join(format!("{}_trends.csv", model::slug(&spec.name)));
        write_trends_csv(&path, &trends)
            .with_context(|| format!("failed to write trends: {}", path.display()))?;
        info!(path = %path.display(), "trends written");
    }
    Ok(())
}
