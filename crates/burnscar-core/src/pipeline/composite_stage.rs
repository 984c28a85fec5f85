use std::fs;
use std::path::Path;

use ndarray::{Array2, ArrayView2};
use tracing::{debug, info};

use crate::composite::{
    annual_max_path, annual_maximum, good_count_path, seasonal_index_path, seasonal_summary,
    Season,
};
use crate::error::{BurnScarError, Result};
use crate::io::{write_raster, EnviDataType, EnviReader, StackEntry};
use crate::raster::{GeoReference, Raster, Sample};

use super::config::{CompositeConfig, PipelineConfig};
use super::orchestrator::{check_grid, require_inputs, StackPlan};
use super::types::{AnnualReport, PipelineStage, ProgressReporter, YearReport};
use super::worker::{run_units, WorkUnit};

/// Scenes feeding one year's composites.
#[derive(Clone, Debug)]
pub struct CompositeTask {
    pub year: i32,
    pub seasons: Vec<(Season, Vec<StackEntry>)>,
    pub year_entries: Vec<StackEntry>,
}

impl CompositeTask {
    fn all_entries(&self) -> impl Iterator<Item = &StackEntry> {
        self.seasons
            .iter()
            .flat_map(|(_, entries)| entries.iter())
            .chain(self.year_entries.iter())
    }
}

/// Build the seasonal summaries and annual maxima of every configured index
/// for each selected year.
pub fn run_composite_stage(
    config: &PipelineConfig,
    plan: &StackPlan,
    reporter: &dyn ProgressReporter,
) -> Result<AnnualReport> {
    let Some(composite) = &config.composite else {
        return Err(BurnScarError::Config(
            "no [composite] section in the pipeline config".into(),
        ));
    };
    if composite.indices.is_empty() {
        return Err(BurnScarError::Config(
            "composite needs at least one index layer".into(),
        ));
    }

    let all: Vec<&StackEntry> = plan.stack.entries.iter().collect();
    let tasks: Vec<CompositeTask> = plan
        .years
        .years()
        .map(|year| CompositeTask {
            year,
            seasons: Season::ALL
                .iter()
                .map(|season| {
                    let entries = season.select(year, &all).into_iter().cloned().collect();
                    (*season, entries)
                })
                .collect(),
            year_entries: plan.stack.for_year(year).into_iter().cloned().collect(),
        })
        .collect();

    let Some(reference) = tasks
        .iter()
        .flat_map(|t| t.all_entries())
        .next()
        .or_else(|| plan.reference_scene())
    else {
        return Err(BurnScarError::Config("the temporal stack has no scenes".into()));
    };
    let reference = reference.layer_path(&composite.index_dir, &composite.indices[0]);
    require_inputs(
        tasks
            .iter()
            .flat_map(|t| t.all_entries())
            .flat_map(|e| {
                std::iter::once(e.layer_path(&composite.mask_dir, &composite.mask_layer)).chain(
                    composite
                        .indices
                        .iter()
                        .map(|index| e.layer_path(&composite.index_dir, index)),
                )
            })
            .chain(std::iter::once(reference.clone())),
    )?;

    let reader = EnviReader::open(&reference)?;
    let georef = reader.georef()?;
    let shape = reader.shape();
    fs::create_dir_all(&composite.output_dir)?;

    info!(
        years = %plan.years,
        indices = %composite.indices.join(","),
        "Generating seasonal summaries"
    );

    let units = tasks
        .into_iter()
        .map(|task| WorkUnit::new(task.year.to_string(), task))
        .collect();

    let years = run_units(
        PipelineStage::Compositing,
        units,
        config.workers,
        reporter,
        |unit| composite_year(&unit.task, composite, &georef, shape),
    )?;

    Ok(AnnualReport { years })
}

/// Write every seasonal and annual composite of one year.
pub fn composite_year(
    task: &CompositeTask,
    composite: &CompositeConfig,
    georef: &GeoReference,
    shape: (usize, usize),
) -> Result<YearReport> {
    let year = task.year;
    let mut outputs = Vec::new();

    for (season, entries) in &task.seasons {
        debug!(year, %season, scenes = entries.len(), "Summarizing season");
        let masks = read_layers::<i32>(
            entries,
            &composite.mask_dir,
            &composite.mask_layer,
            shape,
            georef,
        )?;
        for (i, index) in composite.indices.iter().enumerate() {
            let values = read_layers::<f32>(entries, &composite.index_dir, index, shape, georef)?;
            let summary = seasonal_summary(&views(&masks), &views(&values), shape, georef.nodata)?;
            if i == 0 {
                let path = good_count_path(&composite.output_dir, year, *season);
                write_output(&path, summary.good_count, georef, EnviDataType::Int16)?;
                outputs.push(path);
            }
            let path = seasonal_index_path(&composite.output_dir, year, *season, index);
            write_output(&path, summary.mean, georef, EnviDataType::Float32)?;
            outputs.push(path);
        }
    }

    let masks = read_layers::<i32>(
        &task.year_entries,
        &composite.mask_dir,
        &composite.mask_layer,
        shape,
        georef,
    )?;
    for index in &composite.indices {
        let values =
            read_layers::<f32>(&task.year_entries, &composite.index_dir, index, shape, georef)?;
        let maximum = annual_maximum(&views(&masks), &views(&values), shape, georef.nodata)?;
        let path = annual_max_path(&composite.output_dir, year, index);
        write_output(&path, maximum, georef, EnviDataType::Float32)?;
        outputs.push(path);
    }

    info!(year, outputs = outputs.len(), "Seasonal summaries written");
    Ok(YearReport {
        year,
        scenes: task.year_entries.len(),
        outputs,
    })
}

fn read_layers<T: Sample>(
    entries: &[StackEntry],
    dir: &Path,
    layer: &str,
    shape: (usize, usize),
    georef: &GeoReference,
) -> Result<Vec<Array2<T>>> {
    entries
        .iter()
        .map(|e| {
            let reader = EnviReader::open(&e.layer_path(dir, layer))?;
            check_grid(&reader, shape, &georef.transform)?;
            reader.read_band::<T>(0)
        })
        .collect()
}

fn views<T>(layers: &[Array2<T>]) -> Vec<ArrayView2<'_, T>> {
    layers.iter().map(|a| a.view()).collect()
}

fn write_output<T: Sample>(
    path: &Path,
    data: Array2<T>,
    georef: &GeoReference,
    data_type: EnviDataType,
) -> Result<()> {
    write_raster(path, &Raster::new(data, georef.clone()), data_type)
}
