use std::path::PathBuf;

use anyhow::Result;
use burnscar_core::consts::{
    DEFAULT_FLOOD_FILL_PROB_THRESH, DEFAULT_SEED_PROB_THRESH, DEFAULT_SEED_SIZE_THRESH,
};
use burnscar_core::pipeline::{run_threshold_stage, StackPlan};
use burnscar_core::threshold::ThresholdParams;
use clap::Args;

use super::StackArgs;
use crate::progress::BarReporter;
use crate::summary::{print_run_header, print_threshold_summary};

#[derive(Args)]
pub struct ThresholdArgs {
    #[command(flatten)]
    pub stack: StackArgs,

    /// Directory with <scene>_burn_probability.img rasters
    #[arg(long)]
    pub bp_dir: PathBuf,

    /// Output directory for <scene>_burn_class.img rasters
    #[arg(long)]
    pub bc_dir: PathBuf,

    #[command(flatten)]
    pub params: ThresholdFlags,
}

/// Threshold tuning flags, also accepted by `run`.
#[derive(Args)]
pub struct ThresholdFlags {
    /// Seed probability threshold (percent)
    #[arg(long, default_value_t = DEFAULT_SEED_PROB_THRESH)]
    pub seed_prob: f32,

    /// Minimum seed patch size (pixels)
    #[arg(long, default_value_t = DEFAULT_SEED_SIZE_THRESH)]
    pub seed_size: usize,

    /// Flood fill probability threshold (percent)
    #[arg(long, default_value_t = DEFAULT_FLOOD_FILL_PROB_THRESH)]
    pub fill_prob: f32,
}

impl ThresholdFlags {
    pub fn params(&self) -> ThresholdParams {
        ThresholdParams {
            seed_prob_thresh: self.seed_prob,
            seed_size_thresh: self.seed_size,
            flood_fill_prob_thresh: self.fill_prob,
        }
    }
}

pub fn run(args: &ThresholdArgs) -> Result<()> {
    let mut config = args.stack.base_config();
    config.bp_dir = args.bp_dir.clone();
    config.bc_dir = args.bc_dir.clone();
    config.threshold = args.params.params();

    let plan = StackPlan::load(&config)?;
    print_run_header("Burn Threshold", &config, &plan);

    let reporter = BarReporter::new()?;
    let report = run_threshold_stage(&config, &plan, &reporter)?;
    reporter.finish();

    print_threshold_summary(&report);
    Ok(())
}
