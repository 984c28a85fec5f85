use gdal::raster::GdalType;
use ndarray::Array2;
use num_traits::NumCast;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_NODATA;

/// Numeric pixel type that can be stored in, and converted between, rasters.
pub trait Sample:
    Copy + PartialOrd + NumCast + GdalType + Default + Send + Sync + std::fmt::Debug + 'static
{
}

impl<T> Sample for T where
    T: Copy + PartialOrd + NumCast + GdalType + Default + Send + Sync + std::fmt::Debug + 'static
{
}

/// Affine pixel-to-map transform in GDAL order:
/// `(origin_x, pixel_width, rot_x, origin_y, rot_y, pixel_height)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    pub origin_x: f64,
    pub pixel_width: f64,
    pub rot_x: f64,
    pub origin_y: f64,
    pub rot_y: f64,
    /// Negative for north-up rasters.
    pub pixel_height: f64,
}

impl GeoTransform {
    pub fn north_up(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self {
            origin_x,
            pixel_width,
            rot_x: 0.0,
            origin_y,
            rot_y: 0.0,
            pixel_height,
        }
    }

    pub fn from_array(gt: [f64; 6]) -> Self {
        Self {
            origin_x: gt[0],
            pixel_width: gt[1],
            rot_x: gt[2],
            origin_y: gt[3],
            rot_y: gt[4],
            pixel_height: gt[5],
        }
    }

    pub fn to_array(&self) -> [f64; 6] {
        [
            self.origin_x,
            self.pixel_width,
            self.rot_x,
            self.origin_y,
            self.rot_y,
            self.pixel_height,
        ]
    }

    pub fn is_north_up(&self) -> bool {
        self.rot_x == 0.0 && self.rot_y == 0.0
    }
}

impl Default for GeoTransform {
    fn default() -> Self {
        Self::north_up(0.0, 0.0, 1.0, -1.0)
    }
}

/// Georeferencing shared by every raster of a scene group.
///
/// Read once from the first scene and handed read-only to every worker so
/// that all outputs of a run carry identical georeferencing.
#[derive(Clone, Debug, PartialEq)]
pub struct GeoReference {
    pub transform: GeoTransform,
    /// Opaque WKT-like projection string.
    pub projection: String,
    pub nodata: f64,
}

impl Default for GeoReference {
    fn default() -> Self {
        Self {
            transform: GeoTransform::default(),
            projection: String::new(),
            nodata: DEFAULT_NODATA,
        }
    }
}

/// A single-band raster held in memory.
#[derive(Clone, Debug)]
pub struct Raster<T> {
    /// Pixel data, row-major, shape = (rows, cols)
    pub data: Array2<T>,
    pub georef: GeoReference,
}

impl<T: Sample> Raster<T> {
    pub fn new(data: Array2<T>, georef: GeoReference) -> Self {
        Self { data, georef }
    }

    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }
}
