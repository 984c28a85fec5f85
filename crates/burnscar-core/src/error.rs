use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BurnScarError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GDAL error: {0}")]
    Gdal(#[from] gdal::errors::GdalError),

    #[error("Invalid raster {path}: {reason}")]
    InvalidRaster { path: PathBuf, reason: String },

    #[error("Unsupported raster data type: {0}")]
    UnsupportedDataType(String),

    #[error("Invalid raster dimensions: {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("Block ({x_off}, {y_off}) {width}x{height} is outside a {cols}x{rows} raster")]
    BlockOutOfBounds {
        x_off: usize,
        y_off: usize,
        width: usize,
        height: usize,
        cols: usize,
        rows: usize,
    },

    #[error("Sample value {value} does not fit the {target} data type")]
    SampleOutOfRange { value: f64, target: &'static str },

    #[error("Band {band} out of range (total: {total})")]
    BandOutOfRange { band: usize, total: usize },

    #[error("Shape mismatch for {what}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        what: String,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Geotransform mismatch for {what}: expected {expected:?}, got {actual:?}")]
    GeoTransformMismatch {
        what: String,
        expected: [f64; 6],
        actual: [f64; 6],
    },

    #[error("Stack file error: {0}")]
    StackFile(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported geotransform: {0}")]
    UnsupportedGeoTransform(String),

    #[error("{stage} failed for {unit}: {message}")]
    UnitFailed {
        stage: String,
        unit: String,
        message: String,
    },

    #[error("Run cancelled")]
    Cancelled,

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, BurnScarError>;
