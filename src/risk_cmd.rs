//! Risk command: yearly risk series and historic baseline per model.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span};

use agrorisk_aggregate::{
    AggregateConfig, Baseline, LabeledSeries, YearlyAggregate, aggregate_yearly,
};
use agrorisk_combine::{COMBINED_RISK, Source, combine};
use agrorisk_frame::StationFrame;
use agrorisk_io::write_series_csv;
use agrorisk_risk::{Identity, RiskTransform};

use crate::cli::RiskArgs;
use crate::config::AgroriskConfig;
use crate::convert;
use crate::model::{self, ModelSpec};

/// JSON report written by the `risk` command.
#[derive(Debug, Serialize)]
pub struct RiskReport {
    pub window: String,
    pub reference: [i32; 2],
    pub moving_average: usize,
    pub models: Vec<ModelReport>,
}

/// Results of one model.
#[derive(Debug, Serialize)]
pub struct ModelReport {
    pub name: String,
    pub transform: String,
    pub years: usize,
    pub baseline: Baseline,
    pub series: Vec<LabeledSeries>,
}

/// Run the risk pipeline.
pub fn run(args: RiskArgs) -> Result<()> {
    let _cmd = info_span!("risk").entered();
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: AgroriskConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;

    let output = args.output.as_ref().or(config.output.as_ref()).ok_or_else(|| {
        anyhow::anyhow!("no output path: set output in config or use --output")
    })?;

    let window = convert::build_window(&config.window)?;
    let agg_cfg = convert::build_aggregate_config(&config.aggregate, &window)?;
    let specs = model::build_models(&config)?;
    let frames = model::load_sources(&config, &specs)?;
    let windowed = model::prepare_frames(&frames, &window, config.window.hours.as_deref());
    info!(%window, models = specs.len(), "sources windowed");

    let mut reports = Vec::with_capacity(specs.len());
    for spec in &specs {
        let yearly = run_model(spec, &windowed, &agg_cfg)?;
        info!(
            model = %spec.name,
            years = yearly.years().len(),
            mean = ?yearly.baseline().mean,
            "model aggregated"
        );
        let series = yearly.labeled_series(&spec.name);
        if let Some(ref dir) = args.csv_dir {
            write_model_csv(dir, &spec.name, &series)?;
        }
        reports.push(ModelReport {
            name: spec.name.clone(),
            transform: describe(spec),
            years: yearly.years().len(),
            baseline: yearly.baseline(),
            series,
        });
    }

    let reference = agg_cfg.reference();
    let report = RiskReport {
        window: window.to_string(),
        reference: [reference.start(), reference.end()],
        moving_average: agg_cfg.moving_average(),
        models: reports,
    };
    let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
    std::fs::write(output, json)
        .with_context(|| format!("failed to write report: {}", output.display()))?;
    info!(path = %output.display(), "report written");
    Ok(())
}

/// Yearly aggregate of one model over windowed frames.
pub fn run_model(
    spec: &ModelSpec,
    frames: &BTreeMap<String, StationFrame>,
    agg_cfg: &AggregateConfig,
) -> Result<YearlyAggregate> {
    let primary = model::frame(frames, &spec.primary.source)?;
    let yearly = match &spec.secondary {
        None => aggregate_yearly(primary, &spec.primary.column, &spec.primary.transform, agg_cfg),
        Some(sec) => {
            let secondary = model::frame(frames, &sec.side.source)?;
            let joined = combine(
                Source::new(primary, &spec.primary.column, &spec.primary.transform),
                Source::new(secondary, &sec.side.column, &sec.side.transform),
                &sec.keys,
                sec.strategy,
            )
            .with_context(|| format!("model {:?}: combination failed", spec.name))?;
            aggregate_yearly(&joined, COMBINED_RISK, &Identity, agg_cfg)
        }
    };
    yearly.with_context(|| format!("model {:?}: aggregation failed", spec.name))
}

fn describe(spec: &ModelSpec) -> String {
    let primary = format!("{} of {}", spec.primary.transform.label(), spec.primary.column);
    match &spec.secondary {
        None => primary,
        Some(sec) => format!(
            "{} of {primary} and {} of {}",
            sec.strategy,
            sec.side.transform.label(),
            sec.side.column
        ),
    }
}

fn write_model_csv(dir: &Path, name: &str, series: &[LabeledSeries]) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory: {}", dir.display()))?;
    let path = dir.join(format!("{}.csv", model::slug(name)));
    write_series_csv(&path, series)
        .with_context(|| format!("failed to write series: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const TEMPERATURE: &str = "\
STATIONS_ID;MESS_DATUM;QN_9;TT_TU;RF_TU;eor
44;2000070112;3;10.0;80.0;eor
44;2000070212;3;20.0;95.0;eor
44;2001070112;3;18.0;92.0;eor
44;2002070112;3;20.0;70.0;eor
44;2002080112;3;99.0;99.0;eor
";

    #[test]
    fn writes_report_and_series() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("produkt_tu_stunde_20000101_20021231_00044.txt");
        fs::write(&data, TEMPERATURE).unwrap();
        let config = dir.path().join("agrorisk.toml");
        fs::write(
            &config,
            format!(
                r#"
[sources.station]
path = "{}"

[window]
start = "01.07"
end = "31.07"

[aggregate]
reference = [2000, 2001]
moving_average = 2

[[model]]
name = "temperature"
primary = {{ source = "station", column = "TT_TU", transform = {{ kind = "identity" }} }}

[[model]]
name = "wet temperature"
primary = {{ source = "station", column = "TT_TU", transform = {{ kind = "identity" }} }}
secondary = {{ source = "station", column = "RF_TU", transform = {{ kind = "identity" }} }}
strategy = "ltrh90"
"#,
                data.display()
            ),
        )
        .unwrap();

        let output = dir.path().join("report.json");
        let csv_dir = dir.path().join("series");
        run(RiskArgs {
            config,
            output: Some(output.clone()),
            csv_dir: Some(csv_dir.clone()),
        })
        .unwrap();

        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(report["window"], "01.07-31.07");
        assert_eq!(report["reference"], serde_json::json!([2000, 2001]));

        let single = &report["models"][0];
        assert_eq!(single["years"], 3);
        assert_eq!(single["series"][0]["values"], serde_json::json!([15.0, 18.0, 20.0]));
        assert_eq!(single["series"][1]["values"], serde_json::json!([null, 16.5, 19.0]));
        assert_eq!(single["baseline"]["mean"], 16.5);
        assert_eq!(single["baseline"]["max"], 18.0);

        // Gated on humidity above 90 %: only 2000-07-02 and 2001-07-01 pass.
        let gated = &report["models"][1];
        assert_eq!(gated["series"][0]["values"], serde_json::json!([10.0, 18.0, 0.0]));

        assert!(csv_dir.join("temperature.csv").exists());
        assert!(csv_dir.join("wet_temperature.csv").exists());
    }
}
