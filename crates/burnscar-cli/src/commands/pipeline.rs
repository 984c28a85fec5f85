use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use burnscar_core::pipeline::{run_pipeline_reported, PipelineConfig};
use clap::Args;
use tracing::info;

use super::annual::AnnualFlags;
use super::threshold::ThresholdFlags;
use crate::progress::BarReporter;
use crate::summary::{print_pipeline_config, print_pipeline_report};

#[derive(Args)]
pub struct RunArgs {
    /// Stack CSV listing the scenes (ignored with --config)
    pub stack_file: Option<PathBuf>,

    /// Pipeline config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory with <scene>_burn_probability.img rasters
    #[arg(long)]
    pub bp_dir: Option<PathBuf>,

    /// Directory for <scene>_burn_class.img rasters
    #[arg(long)]
    pub bc_dir: Option<PathBuf>,

    /// Output directory for the annual products
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// First year to process (default: first stack year + 1)
    #[arg(short = 'b', long)]
    pub start_year: Option<i32>,

    /// Last year to process (default: last stack year)
    #[arg(short = 'e', long)]
    pub end_year: Option<i32>,

    /// Number of parallel workers (default: available cores)
    #[arg(short = 'j', long)]
    pub workers: Option<usize>,

    #[command(flatten)]
    pub threshold: ThresholdFlags,

    #[command(flatten)]
    pub annual: AnnualFlags,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let config = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        let config: PipelineConfig = toml::from_str(&contents).context("Invalid pipeline config")?;
        info!(path = %config_path.display(), "Loaded pipeline config");
        config
    } else {
        build_config_from_args(args)?
    };

    print_pipeline_config(&config);

    let reporter = Arc::new(BarReporter::new()?);
    let report = run_pipeline_reported(&config, reporter.clone())?;
    reporter.finish();

    print_pipeline_report(&report);
    Ok(())
}

fn build_config_from_args(args: &RunArgs) -> Result<PipelineConfig> {
    let (Some(stack_file), Some(bp_dir), Some(bc_dir), Some(output)) = (
        args.stack_file.as_ref(),
        args.bp_dir.as_ref(),
        args.bc_dir.as_ref(),
        args.output.as_ref(),
    ) else {
        bail!("without --config, run needs STACK_FILE, --bp-dir, --bc-dir and --output");
    };

    let mut config = PipelineConfig {
        stack_file: stack_file.clone(),
        bp_dir: bp_dir.clone(),
        bc_dir: bc_dir.clone(),
        output_dir: output.clone(),
        start_year: args.start_year,
        end_year: args.end_year,
        threshold: args.threshold.params(),
        annual: args.annual.config(),
        ..Default::default()
    };
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    Ok(config)
}
