use std::path::PathBuf;

use anyhow::Result;
use burnscar_core::consts::DEFAULT_BLOCK_SIZE;
use burnscar_core::pipeline::{cleanup_sidecars, run_annual_stage, AnnualConfig, StackPlan};
use clap::Args;

use super::StackArgs;
use crate::progress::BarReporter;
use crate::summary::{print_annual_summary, print_run_header};

#[derive(Args)]
pub struct AnnualArgs {
    #[command(flatten)]
    pub stack: StackArgs,

    /// Directory with <scene>_burn_probability.img rasters
    #[arg(long)]
    pub bp_dir: PathBuf,

    /// Directory with <scene>_burn_class.img rasters
    #[arg(long)]
    pub bc_dir: PathBuf,

    /// Output directory for the annual products
    #[arg(short, long)]
    pub output: PathBuf,

    #[command(flatten)]
    pub annual: AnnualFlags,
}

/// Annual aggregation flags, also accepted by `run`.
#[derive(Args)]
pub struct AnnualFlags {
    /// Block edge length in pixels
    #[arg(long, default_value_t = DEFAULT_BLOCK_SIZE)]
    pub block_size: usize,

    /// Write a PNG quicklook next to each product
    #[arg(long)]
    pub quicklooks: bool,

    /// Bounding-extents CSV; scenes are placed on this grid first
    #[arg(long)]
    pub extent: Option<PathBuf>,
}

impl AnnualFlags {
    pub fn config(&self) -> AnnualConfig {
        AnnualConfig {
            block_size: self.block_size,
            quicklooks: self.quicklooks,
            extent_file: self.extent.clone(),
        }
    }
}

pub fn run(args: &AnnualArgs) -> Result<()> {
    let mut config = args.stack.base_config();
    config.bp_dir = args.bp_dir.clone();
    config.bc_dir = args.bc_dir.clone();
    config.output_dir = args.output.clone();
    config.annual = args.annual.config();

    let plan = StackPlan::load(&config)?;
    print_run_header("Annual Burn Summaries", &config, &plan);

    let reporter = BarReporter::new()?;
    let report = run_annual_stage(&config, &plan, &reporter)?;
    reporter.finish();
    cleanup_sidecars(&config.output_dir)?;

    print_annual_summary("Annual Products", &report);
    Ok(())
}
