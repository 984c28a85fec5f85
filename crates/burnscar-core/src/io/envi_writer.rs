use std::path::{Path, PathBuf};

use gdal::raster::Buffer;
use gdal::{Dataset, DriverManager};
use ndarray::ArrayView2;

use crate::error::{BurnScarError, Result};
use crate::io::envi::{header_path, EnviDataType, ENVI_DRIVER};
use crate::raster::{GeoReference, Raster, Sample};

/// Writes a band-sequential ENVI raster through GDAL. The dataset is created
/// at full size up front, so blocks may be written in any order.
pub struct EnviWriter {
    dataset: Dataset,
    data_type: EnviDataType,
    path: PathBuf,
    rows: usize,
    cols: usize,
    bands: usize,
}

impl EnviWriter {
    /// Create a raster of the given shape, copying georeferencing and nodata
    /// from `georef`.
    pub fn create(
        path: &Path,
        rows: usize,
        cols: usize,
        bands: usize,
        data_type: EnviDataType,
        georef: &GeoReference,
    ) -> Result<Self> {
        if rows == 0 || cols == 0 || bands == 0 {
            return Err(BurnScarError::InvalidDimensions { rows, cols });
        }

        let driver = DriverManager::get_driver_by_name(ENVI_DRIVER)?;
        let mut dataset = match data_type {
            EnviDataType::Byte => driver.create_with_band_type::<u8, _>(path, cols, rows, bands)?,
            EnviDataType::Int16 => driver.create_with_band_type::<i16, _>(path, cols, rows, bands)?,
            EnviDataType::UInt16 => driver.create_with_band_type::<u16, _>(path, cols, rows, bands)?,
            EnviDataType::Int32 => driver.create_with_band_type::<i32, _>(path, cols, rows, bands)?,
            EnviDataType::Float32 => driver.create_with_band_type::<f32, _>(path, cols, rows, bands)?,
            EnviDataType::Float64 => driver.create_with_band_type::<f64, _>(path, cols, rows, bands)?,
        };
        dataset.set_geo_transform(&georef.transform.to_array())?;
        if !georef.projection.is_empty() {
            dataset.set_projection(&georef.projection)?;
        }
        for band in 1..=bands {
            dataset
                .rasterband(band)?
                .set_no_data_value(Some(georef.nodata))?;
        }

        Ok(Self {
            dataset,
            data_type,
            path: path.to_path_buf(),
            rows,
            cols,
            bands,
        })
    }

    /// Write `block` into `band` with its upper-left corner at (`x_off`, `y_off`).
    /// Every sample must be representable in the raster's data type.
    pub fn write_block<T: Sample>(
        &mut self,
        band: usize,
        block: ArrayView2<'_, T>,
        x_off: usize,
        y_off: usize,
    ) -> Result<()> {
        if band >= self.bands {
            return Err(BurnScarError::BandOutOfRange {
                band,
                total: self.bands,
            });
        }
        let (height, width) = block.dim();
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
        check_range(&block, self.data_type)?;

        let mut buffer = Buffer::new((width, height), block.iter().copied().collect());
        self.dataset.rasterband(band + 1)?.write(
            (x_off as isize, y_off as isize),
            (width, height),
            &mut buffer,
        )?;
        Ok(())
    }

    /// Flush and close the dataset.
    pub fn finalize(mut self) -> Result<()> {
        self.dataset.flush_cache()?;
        let Self { dataset, path, .. } = self;
        drop(dataset);
        if !header_path(&path).is_file() {
            return Err(BurnScarError::InvalidRaster {
                path,
                reason: "driver wrote no ENVI header".into(),
            });
        }
        Ok(())
    }
}

/// Write a whole single-band raster in one call.
pub fn write_raster<T: Sample>(path: &Path, raster: &Raster<T>, data_type: EnviDataType) -> Result<()> {
    let (rows, cols) = raster.shape();
    let mut writer = EnviWriter::create(path, rows, cols, 1, data_type, &raster.georef)?;
    writer.write_block(0, raster.data.view(), 0, 0)?;
    writer.finalize()
}

/// GDAL saturates out-of-range samples on write; reject them instead.
fn check_range<T: Sample>(block: &ArrayView2<'_, T>, data_type: EnviDataType) -> Result<()> {
    for &value in block.iter() {
        let fits = match data_type {
            EnviDataType::Byte => value.to_u8().is_some(),
            EnviDataType::Int16 => value.to_i16().is_some(),
            EnviDataType::UInt16 => value.to_u16().is_some(),
            EnviDataType::Int32 => value.to_i32().is_some(),
            EnviDataType::Float32 => value.to_f32().is_some(),
            EnviDataType::Float64 => true,
        };
        if !fits {
            return Err(BurnScarError::SampleOutOfRange {
                value: value.to_f64().unwrap_or(f64::NAN),
                target: data_type.name(),
            });
        }
    }
    Ok(())
}
