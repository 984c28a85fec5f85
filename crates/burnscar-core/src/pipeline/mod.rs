pub mod config;
mod annual_stage;
mod composite_stage;
mod orchestrator;
mod threshold_stage;
mod types;
pub mod worker;

pub use annual_stage::{aggregate_year_to_disk, run_annual_stage, OutputGrid, YearTask};
pub use composite_stage::{composite_year, run_composite_stage, CompositeTask};
pub use config::{AnnualConfig, CompositeConfig, PipelineConfig, YearRange};
pub use orchestrator::{cleanup_sidecars, run_pipeline, run_pipeline_reported, StackPlan};
pub use threshold_stage::{run_threshold_stage, threshold_scene};
pub use types::{
    AnnualReport, NoOpReporter, PipelineReport, PipelineStage, ProgressReporter, SceneReport,
    ThresholdReport, YearReport,
};
pub use worker::{run_units, WorkUnit};
