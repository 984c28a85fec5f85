pub mod annual;
pub mod composite;
pub mod config;
pub mod info;
pub mod pipeline;
pub mod threshold;

use std::path::PathBuf;

use burnscar_core::pipeline::PipelineConfig;
use clap::Args;

/// Stack selection flags shared by every processing command.
#[derive(Args)]
pub struct StackArgs {
    /// Stack CSV listing the scenes (file, year, julian, ...)
    pub stack_file: PathBuf,

    /// First year to process (default: first stack year + 1)
    #[arg(short = 'b', long)]
    pub start_year: Option<i32>,

    /// Last year to process (default: last stack year)
    #[arg(short = 'e', long)]
    pub end_year: Option<i32>,

    /// Number of parallel workers (default: available cores)
    #[arg(short = 'j', long)]
    pub workers: Option<usize>,
}

impl StackArgs {
    /// Default config with the stack selection applied.
    pub fn base_config(&self) -> PipelineConfig {
        let mut config = PipelineConfig {
            stack_file: self.stack_file.clone(),
            start_year: self.start_year,
            end_year: self.end_year,
            ..Default::default()
        };
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        config
    }
}
