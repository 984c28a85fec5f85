use std::path::PathBuf;

use anyhow::Result;
use burnscar_core::consts::DEFAULT_MASK_LAYER;
use burnscar_core::pipeline::{cleanup_sidecars, run_composite_stage, CompositeConfig, StackPlan};
use clap::Args;

use super::StackArgs;
use crate::progress::BarReporter;
use crate::summary::{print_annual_summary, print_run_header};

#[derive(Args)]
pub struct CompositeArgs {
    #[command(flatten)]
    pub stack: StackArgs,

    /// Directory with per-scene QA masks (<scene>_<mask-layer>.img)
    #[arg(long)]
    pub mask_dir: PathBuf,

    /// Directory with per-scene spectral indices (<scene>_<index>.img)
    #[arg(long)]
    pub index_dir: PathBuf,

    /// Index layer to summarize; repeat for several
    #[arg(short, long = "index", required = true)]
    pub indices: Vec<String>,

    /// Mask layer name
    #[arg(long, default_value = DEFAULT_MASK_LAYER)]
    pub mask_layer: String,

    /// Output directory for the seasonal summaries
    #[arg(short, long)]
    pub output: PathBuf,
}

pub fn run(args: &CompositeArgs) -> Result<()> {
    let mut config = args.stack.base_config();
    config.composite = Some(CompositeConfig {
        mask_dir: args.mask_dir.clone(),
        index_dir: args.index_dir.clone(),
        indices: args.indices.clone(),
        output_dir: args.output.clone(),
        mask_layer: args.mask_layer.clone(),
    });

    let plan = StackPlan::load(&config)?;
    print_run_header("Seasonal Summaries", &config, &plan);

    let reporter = BarReporter::new()?;
    let report = run_composite_stage(&config, &plan, &reporter)?;
    reporter.finish();
    cleanup_sidecars(&args.output)?;

    print_annual_summary("Seasonal Products", &report);
    Ok(())
}
