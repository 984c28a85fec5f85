use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::consts::AUX_XML_SUFFIX;
use crate::error::{BurnScarError, Result};
use crate::io::{EnviReader, StackEntry, TemporalStack};
use crate::raster::GeoTransform;

use super::annual_stage::run_annual_stage;
use super::composite_stage::run_composite_stage;
use super::config::{PipelineConfig, YearRange};
use super::threshold_stage::run_threshold_stage;
use super::types::{NoOpReporter, PipelineReport, PipelineStage, ProgressReporter};

/// The loaded stack and the years selected from it.
#[derive(Clone, Debug)]
pub struct StackPlan {
    pub stack: TemporalStack,
    pub years: YearRange,
}

impl StackPlan {
    /// Validate `config`, load its stack file and resolve the year range.
    pub fn load(config: &PipelineConfig) -> Result<Self> {
        config.validate()?;
        let stack = TemporalStack::load(&config.stack_file)?;
        let years = config.resolve_years(&stack)?;
        info!(
            entries = stack.entries.len(),
            years = %years,
            "Loaded temporal stack"
        );
        Ok(Self { stack, years })
    }

    /// Scenes acquired within the selected years, in stack order.
    pub fn scenes(&self) -> Vec<&StackEntry> {
        self.stack.in_years(self.years.start, self.years.end)
    }

    /// Scene whose grid every output of the run is written on: the first
    /// selected scene, else the first scene of the stack.
    pub fn reference_scene(&self) -> Option<&StackEntry> {
        self.scenes()
            .first()
            .copied()
            .or_else(|| self.stack.entries.first())
    }
}

/// Largest difference between geotransform terms still taken as the same grid.
const TRANSFORM_TOLERANCE: f64 = 1e-6;

/// Fail with a configuration error listing every path that does not exist.
pub(super) fn require_inputs(paths: impl IntoIterator<Item = PathBuf>) -> Result<()> {
    let missing: Vec<String> = paths
        .into_iter()
        .filter(|p| !p.is_file())
        .map(|p| p.display().to_string())
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(BurnScarError::Config(format!(
        "{} input raster(s) missing: {}",
        missing.len(),
        missing.join(", ")
    )))
}

pub(super) fn require_dir(dir: &Path, what: &str) -> Result<()> {
    if !dir.is_dir() {
        return Err(BurnScarError::Config(format!(
            "{what} directory does not exist: {}",
            dir.display()
        )));
    }
    Ok(())
}

pub(super) fn check_shape(actual: (usize, usize), expected: (usize, usize), what: &str) -> Result<()> {
    if actual != expected {
        return Err(BurnScarError::ShapeMismatch {
            what: what.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

/// Fail unless `reader` lies exactly on the output grid.
pub(super) fn check_grid(
    reader: &EnviReader,
    shape: (usize, usize),
    transform: &GeoTransform,
) -> Result<()> {
    let what = reader.path().display().to_string();
    check_shape(reader.shape(), shape, &what)?;

    let expected = transform.to_array();
    let actual = reader.geo_transform().to_array();
    let aligned = expected
        .iter()
        .zip(&actual)
        .all(|(e, a)| (e - a).abs() <= TRANSFORM_TOLERANCE);
    if !aligned {
        return Err(BurnScarError::GeoTransformMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Remove `*.aux.xml` sidecars from `dir`. Returns the number removed.
pub fn cleanup_sidecars(dir: &Path) -> Result<usize> {
    if !dir.is_dir() {
        return Ok(0);
    }
    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_sidecar = path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().ends_with(AUX_XML_SUFFIX));
        if is_sidecar && path.is_file() {
            fs::remove_file(&path)?;
            debug!(path = %path.display(), "Removed sidecar");
            removed += 1;
        }
    }
    Ok(removed)
}

/// Run thresholding, annual aggregation and (when configured) seasonal
/// compositing with a thread-safe progress reporter.
pub fn run_pipeline_reported(
    config: &PipelineConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<PipelineReport> {
    reporter.begin_stage(PipelineStage::LoadingStack, None);
    let plan = StackPlan::load(config)?;
    reporter.finish_stage();

    let threshold = run_threshold_stage(config, &plan, reporter.as_ref())?;
    let annual = run_annual_stage(config, &plan, reporter.as_ref())?;
    let composite = match config.composite {
        Some(_) => Some(run_composite_stage(config, &plan, reporter.as_ref())?),
        None => None,
    };

    reporter.begin_stage(PipelineStage::Cleanup, None);
    let mut dirs = vec![config.bc_dir.clone(), config.output_dir.clone()];
    if let Some(c) = &config.composite {
        dirs.push(c.output_dir.clone());
    }
    dirs.dedup();
    let mut sidecars_removed = 0;
    for dir in &dirs {
        sidecars_removed += cleanup_sidecars(dir)?;
    }
    reporter.finish_stage();

    info!(
        scenes = threshold.scenes.len(),
        years = annual.years.len(),
        sidecars_removed,
        "Pipeline complete"
    );

    Ok(PipelineReport {
        years: plan.years,
        threshold,
        annual,
        composite,
        sidecars_removed,
    })
}

/// Run the full pipeline without progress reporting.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineReport> {
    run_pipeline_reported(config, Arc::new(NoOpReporter))
}
