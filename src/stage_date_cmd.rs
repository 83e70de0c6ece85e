//! Stage-date command: when a phenological stage is reached.

use anyhow::{Context, Result};
use tracing::info;

use agrorisk_io::{read_phenology, stage_date_quantile};

use crate::cli::StageDateArgs;

/// Print the `dd.mm` date at which `args.stage` is reached at the requested
/// quantile of the observed days of year.
pub fn run(args: StageDateArgs) -> Result<()> {
    let records = read_phenology(&args.phenology)
        .with_context(|| format!("failed to read phenology: {}", args.phenology.display()))?;
    info!(records = records.len(), stage = args.stage, "phenology loaded");
    let date = stage_date_quantile(&records, args.stage, args.quantile)
        .with_context(|| format!("no stage date for phase {}", args.stage))?;
    println!("{date}");
    Ok(())
}
