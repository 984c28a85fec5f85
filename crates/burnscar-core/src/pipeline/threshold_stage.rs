use std::fs;

use tracing::info;

use crate::error::Result;
use crate::io::region_table::write_region_table;
use crate::io::{write_raster, EnviDataType, EnviReader, StackEntry};
use crate::threshold::threshold_raster;

use super::config::PipelineConfig;
use super::orchestrator::{require_dir, require_inputs, StackPlan};
use super::types::{PipelineStage, ProgressReporter, SceneReport, ThresholdReport};
use super::worker::{run_units, WorkUnit};

/// Threshold every scene of the selected years: one unit of work per scene,
/// each writing `<stem>_burn_class.img` and its region table into `bc_dir`.
pub fn run_threshold_stage(
    config: &PipelineConfig,
    plan: &StackPlan,
    reporter: &dyn ProgressReporter,
) -> Result<ThresholdReport> {
    require_dir(&config.bp_dir, "burn probability")?;
    let scenes = plan.scenes();
    require_inputs(scenes.iter().map(|e| e.burn_probability_path(&config.bp_dir)))?;
    fs::create_dir_all(&config.bc_dir)?;

    info!(
        scenes = scenes.len(),
        years = %plan.years,
        params = %config.threshold,
        "Processing burn probabilities"
    );

    let units: Vec<WorkUnit<StackEntry>> = scenes
        .into_iter()
        .map(|e| {
            let name = e.burn_probability_path(&config.bp_dir).display().to_string();
            WorkUnit::new(name, e.clone())
        })
        .collect();

    let scenes = run_units(
        PipelineStage::Thresholding,
        units,
        config.workers,
        reporter,
        |unit| threshold_scene(&unit.task, config),
    )?;

    Ok(ThresholdReport { scenes })
}

/// Threshold one scene's burn probability raster and persist the result.
pub fn threshold_scene(
    entry: &StackEntry,
    config: &PipelineConfig,
) -> Result<SceneReport> {
    let bp_path = entry.burn_probability_path(&config.bp_dir);
    let probability = EnviReader::open(&bp_path)?.read_raster::<f32>(0)?;
    let scene = threshold_raster(&probability, &config.threshold)?;

    let classification = entry.burn_class_path(&config.bc_dir);
    write_raster(&classification, &scene.classification, EnviDataType::Int32)?;
    write_region_table(&entry.region_table_path(&config.bc_dir), &scene.regions)?;

    info!(
        scene = %entry.stem(),
        regions = scene.regions.len(),
        output = %classification.display(),
        "Scene thresholded"
    );

    Ok(SceneReport {
        classification,
        regions: scene.regions.len(),
        burned_pixels: scene.regions.total_area(),
    })
}
