use std::path::{Path, PathBuf};

use gdal::raster::GdalDataType;
use gdal::Dataset;
use ndarray::Array2;

use crate::consts::{DEFAULT_NODATA, ENVI_HEADER_EXT};
use crate::error::{BurnScarError, Result};
use crate::raster::{GeoReference, GeoTransform, Raster, Sample};

/// GDAL short name of the driver every raster of the pipeline is written with.
pub const ENVI_DRIVER: &str = "ENVI";

/// Sample encodings the pipeline stores.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnviDataType {
    Byte,
    Int16,
    Int32,
    Float32,
    Float64,
    UInt16,
}

impl EnviDataType {
    pub fn from_gdal(data_type: GdalDataType) -> Result<Self> {
        match data_type {
            GdalDataType::UInt8 => Ok(Self::Byte),
            GdalDataType::Int16 => Ok(Self::Int16),
            GdalDataType::UInt16 => Ok(Self::UInt16),
            GdalDataType::Int32 => Ok(Self::Int32),
            GdalDataType::Float32 => Ok(Self::Float32),
            GdalDataType::Float64 => Ok(Self::Float64),
            other => Err(BurnScarError::UnsupportedDataType(other.name())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Byte => "Byte",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
            Self::UInt16 => "UInt16",
        }
    }
}

impl std::fmt::Display for EnviDataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Path of the ENVI header belonging to a payload path (`x.img` -> `x.hdr`).
pub fn header_path(payload: &Path) -> PathBuf {
    payload.with_extension(ENVI_HEADER_EXT)
}

/// Read access to a raster through GDAL.
///
/// The dataset is closed when the reader is dropped.
pub struct EnviReader {
    dataset: Dataset,
    path: PathBuf,
    rows: usize,
    cols: usize,
    bands: usize,
}

impl EnviReader {
    pub fn open(path: &Path) -> Result<Self> {
        // Surface a missing file as an I/O error rather than a driver error.
        std::fs::metadata(path)?;
        let dataset = Dataset::open(path)?;
        let (cols, rows) = dataset.raster_size();
        let bands = dataset.raster_count();
        if bands == 0 {
            return Err(BurnScarError::InvalidRaster {
                path: path.to_path_buf(),
                reason: "no raster bands".into(),
            });
        }

        Ok(Self {
            dataset,
            path: path.to_path_buf(),
            rows,
            cols,
            bands,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn band_count(&self) -> usize {
        self.bands
    }

    /// Driver that recognised the file, e.g. `ENVI`.
    pub fn driver_name(&self) -> String {
        self.dataset.driver().short_name()
    }

    /// Geotransform of the dataset; rasters without one get the identity
    /// north-up transform.
    pub fn geo_transform(&self) -> GeoTransform {
        self.dataset
            .geo_transform()
            .map(GeoTransform::from_array)
            .unwrap_or_default()
    }

    pub fn projection(&self) -> String {
        self.dataset.projection()
    }

    pub fn data_type(&self, band: usize) -> Result<EnviDataType> {
        self.check_band(band)?;
        let band = self.dataset.rasterband(band + 1)?;
        EnviDataType::from_gdal(band.band_type())
    }

    /// Nodata value declared for `band`, if any.
    pub fn nodata_value(&self, band: usize) -> Result<Option<f64>> {
        self.check_band(band)?;
        Ok(self.dataset.rasterband(band + 1)?.no_data_value())
    }

    /// Georeferencing with the system-wide nodata default applied.
    pub fn georef(&self) -> Result<GeoReference> {
        Ok(GeoReference {
            transform: self.geo_transform(),
            projection: self.projection(),
            nodata: self.nodata_value(0)?.unwrap_or(DEFAULT_NODATA),
        })
    }

    /// Read a window of `band` (0-based), converting samples to `T`.
    pub fn read_block<T: Sample>(
        &self,
        band: usize,
        x_off: usize,
        y_off: usize,
        width: usize,
        height: usize,
    ) -> Result<Array2<T>> {
        self.check_band(band)?;
        if x_off + width > self.cols || y_off + height > self.rows {
            return Err(BurnScarError::BlockOutOfBounds {
                x_off,
                y_off,
                width,
                height,
                cols: self.cols,
                rows: self.rows,
            });
        }

        let buffer = self.dataset.rasterband(band + 1)?.read_as::<T>(
            (x_off as isize, y_off as isize),
            (width, height),
            (width, height),
            None,
        )?;
        Array2::from_shape_vec((height, width), buffer.data().to_vec()).map_err(|e| {
            BurnScarError::InvalidRaster {
                path: self.path.clone(),
                reason: format!("failed to reshape block: {e}"),
            }
        })
    }

    /// Read one whole band.
    pub fn read_band<T: Sample>(&self, band: usize) -> Result<Array2<T>> {
        self.read_block(band, 0, 0, self.cols, self.rows)
    }

    /// Read one whole band together with its georeferencing.
    pub fn read_raster<T: Sample>(&self, band: usize) -> Result<Raster<T>> {
        Ok(Raster::new(self.read_band(band)?, self.georef()?))
    }

    fn check_band(&self, band: usize) -> Result<()> {
        if band >= self.bands {
            return Err(BurnScarError::BandOutOfRange {
                band,
                total: self.bands,
            });
        }
        Ok(())
    }
}
