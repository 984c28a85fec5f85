use std::fs;
use std::path::{Path, PathBuf};

use ndarray::{s, Array2};
use tracing::{info, warn};

use crate::annual::{aggregate_block, blocks, AnnualProduct, Block, SceneLayers};
use crate::error::{BurnScarError, Result};
use crate::io::extent::{place_on_extent, BoundingExtent};
use crate::io::quicklook::save_quicklook;
use crate::io::{EnviDataType, EnviReader, EnviWriter, StackEntry};
use crate::raster::{GeoReference, GeoTransform};

use super::config::PipelineConfig;
use super::orchestrator::{check_grid, check_shape, require_dir, require_inputs, StackPlan};
use super::types::{AnnualReport, PipelineStage, ProgressReporter, YearReport};
use super::worker::{run_units, WorkUnit};

/// Common output grid of a stack, read once from its reference scene and
/// shared read-only by every worker.
#[derive(Clone, Debug)]
pub struct OutputGrid {
    pub georef: GeoReference,
    pub rows: usize,
    pub cols: usize,
    /// Set when scenes are placed on a bounding extent before use.
    pub extent: Option<BoundingExtent>,
}

impl OutputGrid {
    /// Grid of `reference`, or of `extent` at the reference's pixel size.
    pub fn from_reference(reference: &Path, extent: Option<BoundingExtent>) -> Result<Self> {
        let reader = EnviReader::open(reference)?;
        let mut georef = reader.georef()?;
        let (mut rows, mut cols) = reader.shape();

        if let Some(extent) = &extent {
            let gt = georef.transform;
            if !gt.is_north_up() {
                return Err(BurnScarError::UnsupportedGeoTransform(
                    "only north-up rasters can be placed on a common extent".into(),
                ));
            }
            (rows, cols) = extent.grid_shape(gt.pixel_width, gt.pixel_height);
            georef.transform =
                GeoTransform::north_up(extent.west, extent.north, gt.pixel_width, gt.pixel_height);
        }

        Ok(Self {
            georef,
            rows,
            cols,
            extent,
        })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }
}

/// One year's scenes, sorted by julian day.
#[derive(Clone, Debug)]
pub struct YearTask {
    pub year: i32,
    pub entries: Vec<StackEntry>,
}

/// Aggregate each selected year into the four annual products. Years are the
/// units of work; a year without scenes yields all-nodata products.
pub fn run_annual_stage(
    config: &PipelineConfig,
    plan: &StackPlan,
    reporter: &dyn ProgressReporter,
) -> Result<AnnualReport> {
    require_dir(&config.bp_dir, "burn probability")?;
    require_dir(&config.bc_dir, "burn classification")?;
    let Some(reference) = plan.reference_scene() else {
        return Err(BurnScarError::Config("the temporal stack has no scenes".into()));
    };
    let reference = reference.burn_probability_path(&config.bp_dir);
    require_inputs(
        plan.scenes()
            .iter()
            .flat_map(|e| {
                [
                    e.burn_probability_path(&config.bp_dir),
                    e.burn_class_path(&config.bc_dir),
                ]
            })
            .chain(std::iter::once(reference.clone())),
    )?;

    let extent = match &config.annual.extent_file {
        Some(path) => Some(BoundingExtent::load(path)?),
        None => None,
    };
    let grid = OutputGrid::from_reference(&reference, extent)?;
    fs::create_dir_all(&config.output_dir)?;

    info!(
        years = %plan.years,
        rows = grid.rows,
        cols = grid.cols,
        resized = grid.extent.is_some(),
        "Processing annual burn summaries"
    );

    let units: Vec<WorkUnit<YearTask>> = plan
        .years
        .years()
        .map(|year| {
            let entries = plan.stack.for_year(year).into_iter().cloned().collect();
            WorkUnit::new(year.to_string(), YearTask { year, entries })
        })
        .collect();

    let years = run_units(
        PipelineStage::Aggregating,
        units,
        config.workers,
        reporter,
        |unit| aggregate_year_to_disk(&unit.task, config, &grid),
    )?;

    Ok(AnnualReport { years })
}

/// Stream one year's scenes block by block into its four Int16 products.
pub fn aggregate_year_to_disk(
    task: &YearTask,
    config: &PipelineConfig,
    grid: &OutputGrid,
) -> Result<YearReport> {
    let year = task.year;
    if task.entries.is_empty() {
        warn!(year, "No scenes for year, writing nodata products");
    }

    let sources = task
        .entries
        .iter()
        .map(|e| SceneSource::open(e, config, grid))
        .collect::<Result<Vec<_>>>()?;

    let outputs: Vec<PathBuf> = AnnualProduct::ALL
        .iter()
        .map(|p| p.path(&config.output_dir, year))
        .collect();
    let mut writers = outputs
        .iter()
        .map(|path| {
            EnviWriter::create(path, grid.rows, grid.cols, 1, EnviDataType::Int16, &grid.georef)
        })
        .collect::<Result<Vec<_>>>()?;

    for block in blocks(grid.rows, grid.cols, config.annual.block_size) {
        let layers = sources
            .iter()
            .map(|s| s.read(block))
            .collect::<Result<Vec<_>>>()?;
        let scenes: Vec<SceneLayers<'_>> = task
            .entries
            .iter()
            .zip(&layers)
            .map(|(entry, (probability, classification))| SceneLayers {
                julian: entry.julian,
                probability: probability.view(),
                classification: classification.view(),
            })
            .collect();

        let summary = aggregate_block(&scenes, (block.rows, block.cols), grid.georef.nodata)?;
        for (writer, product) in writers.iter_mut().zip(AnnualProduct::ALL) {
            writer.write_block(0, summary.product(product).view(), block.col, block.row)?;
        }
    }
    for writer in writers {
        writer.finalize()?;
    }

    if config.annual.quicklooks {
        for path in &outputs {
            let data = EnviReader::open(path)?.read_band::<i16>(0)?;
            save_quicklook(&data, grid.georef.nodata, &path.with_extension("png"))?;
        }
    }

    info!(year, scenes = task.entries.len(), "Annual products written");
    Ok(YearReport {
        year,
        scenes: task.entries.len(),
        outputs,
    })
}

/// A scene's probability and classification layers on the output grid.
enum SceneSource {
    /// Read block by block straight from the rasters on disk.
    Mapped {
        probability: EnviReader,
        classification: EnviReader,
    },
    /// Held in memory after placement on the bounding extent.
    Placed {
        probability: Array2<f32>,
        classification: Array2<i32>,
    },
}

impl SceneSource {
    fn open(entry: &StackEntry, config: &PipelineConfig, grid: &OutputGrid) -> Result<Self> {
        let probability = EnviReader::open(&entry.burn_probability_path(&config.bp_dir))?;
        let classification = EnviReader::open(&entry.burn_class_path(&config.bc_dir))?;

        match &grid.extent {
            Some(extent) => {
                let probability = place_on_extent(&probability.read_raster::<f32>(0)?, extent)?.data;
                let classification =
                    place_on_extent(&classification.read_raster::<i32>(0)?, extent)?.data;
                let placed = format!("scene {} placed on extent", entry.stem());
                check_shape(probability.dim(), grid.shape(), &placed)?;
                check_shape(classification.dim(), grid.shape(), &placed)?;
                Ok(Self::Placed {
                    probability,
                    classification,
                })
            }
            None => {
                for reader in [&probability, &classification] {
                    check_grid(reader, grid.shape(), &grid.georef.transform)?;
                }
                Ok(Self::Mapped {
                    probability,
                    classification,
                })
            }
        }
    }

    fn read(&self, block: Block) -> Result<(Array2<f32>, Array2<i32>)> {
        match self {
            Self::Mapped {
                probability,
                classification,
            } => Ok((
                probability.read_block(0, block.col, block.row, block.cols, block.rows)?,
                classification.read_block(0, block.col, block.row, block.cols, block.rows)?,
            )),
            Self::Placed {
                probability,
                classification,
            } => {
                let rows = block.row..block.row + block.rows;
                let cols = block.col..block.col + block.cols;
                Ok((
                    probability.slice(s![rows.clone(), cols.clone()]).to_owned(),
                    classification.slice(s![rows, cols]).to_owned(),
                ))
            }
        }
    }
}
