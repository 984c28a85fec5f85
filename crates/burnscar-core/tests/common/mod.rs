#![allow(dead_code)]

use std::path::{Path, PathBuf};

use burnscar_core::io::{write_raster, EnviDataType};
use burnscar_core::raster::{GeoReference, GeoTransform, Raster, Sample};
use gdal::spatial_ref::SpatialRef;
use ndarray::Array2;

pub const NODATA: f64 = -9999.0;

/// WKT of WGS 84 / UTM zone 11N.
pub fn utm_11n_wkt() -> String {
    SpatialRef::from_epsg(32611)
        .and_then(|srs| srs.to_wkt())
        .expect("EPSG:32611 WKT")
}

/// UTM north-up georeferencing with 30 m pixels.
pub fn test_georef() -> GeoReference {
    GeoReference {
        transform: GeoTransform::north_up(500_000.0, 4_000_000.0, 30.0, -30.0),
        projection: utm_11n_wkt(),
        nodata: NODATA,
    }
}

/// Write `data` as a single-band ENVI raster with the test georeferencing.
pub fn write_envi<T: Sample>(path: &Path, data: Array2<T>, data_type: EnviDataType) {
    let raster = Raster::new(data, test_georef());
    write_raster(path, &raster, data_type).expect("write ENVI raster");
}

/// Write a stack CSV with `file,year,julian` rows.
pub fn write_stack_csv(dir: &Path, scenes: &[(&str, i32, u32)]) -> PathBuf {
    let mut text = String::from("file,year,julian\n");
    for (file, year, julian) in scenes {
        text.push_str(&format!("{file},{year},{julian}\n"));
    }
    let path = dir.join("stack.csv");
    std::fs::write(&path, text).expect("write stack csv");
    path
}

/// Probability grid filled with `background`, with a square patch of
/// `value` covering rows/cols `r0..r0+size` and `c0..c0+size`.
pub fn patch_grid(
    rows: usize,
    cols: usize,
    background: f32,
    (r0, c0): (usize, usize),
    size: usize,
    value: f32,
) -> Array2<f32> {
    let mut grid = Array2::from_elem((rows, cols), background);
    for r in r0..r0 + size {
        for c in c0..c0 + size {
            grid[[r, c]] = value;
        }
    }
    grid
}

/// Build a grid from row slices.
pub fn grid<T: Copy>(rows: &[&[T]]) -> Array2<T> {
    let h = rows.len();
    let w = rows[0].len();
    Array2::from_shape_fn((h, w), |(r, c)| rows[r][c])
}
