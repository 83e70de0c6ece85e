use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Agrorisk seasonal disease-risk indices.
#[derive(Parser)]
#[command(
    name = "agrorisk",
    version,
    about = "Seasonal disease-risk indices from weather-station records"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Yearly risk, moving average and historic baseline per model.
    Risk(RiskArgs),
    /// Per-station linear trends of the yearly risk.
    Trend(TrendArgs),
    /// Day and month a phenological stage is reached at a quantile.
    StageDate(StageDateArgs),
}

/// Arguments for the `risk` subcommand.
#[derive(clap::Args)]
pub struct RiskArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "agrorisk.toml")]
    pub config: PathBuf,

    /// Override the JSON report path from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for one wide CSV of labelled series per model.
    #[arg(long = "csv-dir")]
    pub csv_dir: Option<PathBuf>,
}

/// Arguments for the `trend` subcommand.
#[derive(clap::Args)]
pub struct TrendArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "agrorisk.toml")]
    pub config: PathBuf,

    /// Directory for the per-model trend tables.
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Only fit the named model.
    #[arg(short, long)]
    pub model: Option<String>,
}

/// Arguments for the `stage-date` subcommand.
#[derive(clap::Args)]
pub struct StageDateArgs {
    /// Phenology observation file (`;`-separated).
    #[arg(short, long)]
    pub phenology: PathBuf,

    /// Phase identifier, e.g. 24 for harvest.
    #[arg(short, long)]
    pub stage: u16,

    /// Quantile of the day-of-year distribution.
    #[arg(short, long, default_value_t = 0.5)]
    pub quantile: f64,
}
