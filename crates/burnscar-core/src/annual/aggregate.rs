use ndarray::ArrayView2;
use tracing::debug;

use crate::consts::NEVER_BURNED;
use crate::error::{BurnScarError, Result};

use super::products::AnnualSummary;

/// One scene's burn layers, already on the common grid.
#[derive(Clone, Copy, Debug)]
pub struct SceneLayers<'a> {
    /// Acquisition day of year.
    pub julian: u32,
    pub probability: ArrayView2<'a, f32>,
    pub classification: ArrayView2<'a, i32>,
}

/// A rectangular window of the output grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block {
    pub row: usize,
    pub col: usize,
    pub rows: usize,
    pub cols: usize,
}

/// Tile a `rows x cols` grid into square blocks of at most `block_size`,
/// row-major. Edge blocks are clipped to the grid.
pub fn blocks(rows: usize, cols: usize, block_size: usize) -> Vec<Block> {
    let step = block_size.max(1);
    let mut out = Vec::new();
    for row in (0..rows).step_by(step) {
        for col in (0..cols).step_by(step) {
            out.push(Block {
                row,
                col,
                rows: step.min(rows - row),
                cols: step.min(cols - col),
            });
        }
    }
    out
}

/// Reduce a year's scenes into the four annual products for one block.
///
/// Every pixel is reduced independently over the scene axis. Scenes are
/// visited in ascending julian order (stable), so `burned_area` is the day
/// of the chronologically first burn. A pixel whose maximum probability is
/// still the nodata sentinel (nodata in every scene) is nodata in all four
/// products. With no scenes at all every product is entirely nodata.
pub fn aggregate_block(
    scenes: &[SceneLayers<'_>],
    shape: (usize, usize),
    nodata: f64,
) -> Result<AnnualSummary> {
    let nodata_i16 = nodata as i16;
    let (rows, cols) = shape;
    if scenes.is_empty() {
        return Ok(AnnualSummary::filled(rows, cols, nodata_i16));
    }

    for (i, scene) in scenes.iter().enumerate() {
        check_shape(
            || format!("probability of scene {i} (julian {})", scene.julian),
            shape,
            scene.probability.dim(),
        )?;
        check_shape(
            || format!("classification of scene {i} (julian {})", scene.julian),
            shape,
            scene.classification.dim(),
        )?;
    }

    let mut order: Vec<usize> = (0..scenes.len()).collect();
    order.sort_by_key(|&i| scenes[i].julian);

    let nodata_f32 = nodata as f32;
    let mut summary = AnnualSummary::filled(rows, cols, nodata_i16);

    for row in 0..rows {
        for col in 0..cols {
            let mut max_prob = f32::NEG_INFINITY;
            let mut burn_count: i16 = 0;
            let mut good_looks: i16 = 0;
            let mut first_burn: Option<u32> = None;

            for &i in &order {
                let scene = &scenes[i];
                let p = scene.probability[[row, col]];
                if p > max_prob {
                    max_prob = p;
                }
                let class = scene.classification[[row, col]];
                if class >= 1 {
                    burn_count += 1;
                    first_burn.get_or_insert(scene.julian);
                }
                if class >= 0 {
                    good_looks += 1;
                }
            }

            if max_prob == nodata_f32 || max_prob == f32::NEG_INFINITY {
                continue;
            }

            summary.max_burn_prob[[row, col]] = max_prob as i16;
            summary.burn_count[[row, col]] = burn_count;
            summary.good_looks_count[[row, col]] = good_looks;
            summary.burned_area[[row, col]] = match first_burn {
                Some(julian) => julian as i16,
                None => NEVER_BURNED,
            };
        }
    }

    Ok(summary)
}

/// Whole-raster annual reduction for `year`.
pub fn aggregate_year(
    year: i32,
    scenes: &[SceneLayers<'_>],
    shape: (usize, usize),
    nodata: f64,
) -> Result<AnnualSummary> {
    debug!(year, scenes = scenes.len(), "Aggregating annual burn products");
    aggregate_block(scenes, shape, nodata)
}

fn check_shape(
    what: impl FnOnce() -> String,
    expected: (usize, usize),
    actual: (usize, usize),
) -> Result<()> {
    if expected != actual {
        return Err(BurnScarError::ShapeMismatch {
            what: what(),
            expected,
            actual,
        });
    }
    Ok(())
}
