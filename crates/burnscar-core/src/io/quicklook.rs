use std::path::Path;

use image::{GrayImage, Luma};
use ndarray::Array2;

use crate::error::Result;
use crate::raster::Sample;

/// Save an 8-bit PNG preview of a product. Valid pixels are stretched
/// linearly over 1..=255 between their min and max; nodata is black.
pub fn save_quicklook<T: Sample>(data: &Array2<T>, nodata: f64, path: &Path) -> Result<()> {
    let (h, w) = data.dim();
    let is_valid = |v: f64| v.is_finite() && v != nodata;

    let (min, max) = data
        .iter()
        .filter_map(|v| v.to_f64())
        .filter(|&v| is_valid(v))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    let range = if max > min { max - min } else { 1.0 };

    let mut img = GrayImage::new(w as u32, h as u32);
    for ((row, col), value) in data.indexed_iter() {
        let v = value.to_f64().unwrap_or(nodata);
        let level = if is_valid(v) {
            (1.0 + (v - min) / range * 254.0).round().clamp(1.0, 255.0) as u8
        } else {
            0
        };
        img.put_pixel(col as u32, row as u32, Luma([level]));
    }
    img.save(path)?;
    Ok(())
}
