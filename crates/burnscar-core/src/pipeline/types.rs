use std::path::PathBuf;

use super::config::YearRange;

/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    LoadingStack,
    Thresholding,
    Aggregating,
    Compositing,
    Cleanup,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LoadingStack => write!(f, "Loading stack"),
            Self::Thresholding => write!(f, "Thresholding scenes"),
            Self::Aggregating => write!(f, "Aggregating years"),
            Self::Compositing => write!(f, "Compositing seasons"),
            Self::Cleanup => write!(f, "Cleaning up"),
        }
    }
}

/// Thread-safe progress reporting for the pipeline.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new pipeline stage has started. `total_items` is the number of
    /// work units in this stage (scenes or years), if known.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// Work units completed so far within the current stage.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `run_pipeline` delegates.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}

/// Outcome of thresholding one scene.
#[derive(Clone, Debug)]
pub struct SceneReport {
    pub classification: PathBuf,
    pub regions: usize,
    pub burned_pixels: usize,
}

/// Outcome of the thresholding stage.
#[derive(Clone, Debug, Default)]
pub struct ThresholdReport {
    pub scenes: Vec<SceneReport>,
}

impl ThresholdReport {
    pub fn total_regions(&self) -> usize {
        self.scenes.iter().map(|s| s.regions).sum()
    }
}

/// Outcome of aggregating one year.
#[derive(Clone, Debug)]
pub struct YearReport {
    pub year: i32,
    pub scenes: usize,
    pub outputs: Vec<PathBuf>,
}

/// Outcome of the annual or composite stage.
#[derive(Clone, Debug, Default)]
pub struct AnnualReport {
    pub years: Vec<YearReport>,
}

impl AnnualReport {
    pub fn output_count(&self) -> usize {
        self.years.iter().map(|y| y.outputs.len()).sum()
    }
}

/// Summary of a full `run_pipeline` invocation.
#[derive(Clone, Debug)]
pub struct PipelineReport {
    pub years: YearRange,
    pub threshold: ThresholdReport,
    pub annual: AnnualReport,
    pub composite: Option<AnnualReport>,
    pub sidecars_removed: usize,
}
