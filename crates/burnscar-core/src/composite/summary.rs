use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;
use crate::error::{BurnScarError, Result};

/// Per-pixel good-look count and mean index value for one season.
#[derive(Clone, Debug, PartialEq)]
pub struct SeasonalComposite {
    pub good_count: Array2<i16>,
    pub mean: Array2<f32>,
}

/// Summarize one season of a spectral index.
///
/// An observation is good where its mask is `>= 0`. The mean is taken over
/// good observations only; pixels with no good observation, and every pixel
/// when there are no scenes, are nodata in both outputs.
pub fn seasonal_summary(
    masks: &[ArrayView2<'_, i32>],
    values: &[ArrayView2<'_, f32>],
    shape: (usize, usize),
    nodata: f64,
) -> Result<SeasonalComposite> {
    check_inputs(masks, values, shape)?;
    let (rows, cols) = shape;
    let nodata_f32 = nodata as f32;

    if masks.is_empty() {
        return Ok(SeasonalComposite {
            good_count: Array2::from_elem(shape, nodata as i16),
            mean: Array2::from_elem(shape, nodata_f32),
        });
    }

    let pixels = map_pixels(rows, cols, |row, col| {
        let mut good = 0u32;
        let mut sum = 0.0f64;
        for (mask, value) in masks.iter().zip(values) {
            if mask[[row, col]] >= 0 {
                good += 1;
                sum += value[[row, col]] as f64;
            }
        }
        if good == 0 {
            (nodata as i16, nodata_f32)
        } else {
            (good as i16, (sum / good as f64) as f32)
        }
    });

    Ok(SeasonalComposite {
        good_count: pixels.mapv(|(count, _)| count),
        mean: pixels.mapv(|(_, mean)| mean),
    })
}

/// Per-pixel maximum of an index over good observations; nodata where there
/// is none.
pub fn annual_maximum(
    masks: &[ArrayView2<'_, i32>],
    values: &[ArrayView2<'_, f32>],
    shape: (usize, usize),
    nodata: f64,
) -> Result<Array2<f32>> {
    check_inputs(masks, values, shape)?;
    let nodata_f32 = nodata as f32;
    Ok(map_pixels(shape.0, shape.1, |row, col| {
        masks
            .iter()
            .zip(values)
            .filter(|(mask, _)| mask[[row, col]] >= 0)
            .map(|(_, value)| value[[row, col]])
            .fold(None, |acc: Option<f32>, v| Some(acc.map_or(v, |m| m.max(v))))
            .unwrap_or(nodata_f32)
    }))
}

/// Evaluate `f` for every pixel, splitting rows across the rayon pool for
/// large grids.
fn map_pixels<T, F>(rows: usize, cols: usize, f: F) -> Array2<T>
where
    T: Clone + Send,
    F: Fn(usize, usize) -> T + Sync,
{
    if rows * cols >= PARALLEL_PIXEL_THRESHOLD {
        let row_data: Vec<Vec<T>> = (0..rows)
            .into_par_iter()
            .map(|row| (0..cols).map(|col| f(row, col)).collect())
            .collect();
        Array2::from_shape_fn((rows, cols), |(row, col)| row_data[row][col].clone())
    } else {
        Array2::from_shape_fn((rows, cols), |(row, col)| f(row, col))
    }
}

fn check_inputs(
    masks: &[ArrayView2<'_, i32>],
    values: &[ArrayView2<'_, f32>],
    shape: (usize, usize),
) -> Result<()> {
    if masks.len() != values.len() {
        return Err(BurnScarError::Config(format!(
            "{} masks supplied for {} index layers",
            masks.len(),
            values.len()
        )));
    }
    for (i, (mask, value)) in masks.iter().zip(values).enumerate() {
        for (what, dim) in [("mask", mask.dim()), ("index", value.dim())] {
            if dim != shape {
                return Err(BurnScarError::ShapeMismatch {
                    what: format!("{what} of scene {i}"),
                    expected: shape,
                    actual: dim,
                });
            }
        }
    }
    Ok(())
}
