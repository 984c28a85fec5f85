use std::path::Path;

use ndarray::{s, Array2};
use num_traits::NumCast;
use serde::Deserialize;

use crate::error::{BurnScarError, Result};
use crate::raster::{GeoTransform, Raster, Sample};

/// Maximum geographic extent of a temporal stack, in map units.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct BoundingExtent {
    #[serde(alias = "West", alias = "WEST")]
    pub west: f64,
    #[serde(alias = "East", alias = "EAST")]
    pub east: f64,
    #[serde(alias = "North", alias = "NORTH")]
    pub north: f64,
    #[serde(alias = "South", alias = "SOUTH")]
    pub south: f64,
}

impl BoundingExtent {
    /// Read the first data row of a bounding-extents CSV
    /// (`West, East, North, South` header in any order).
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;
        match reader.deserialize().next() {
            Some(record) => {
                let extent: BoundingExtent = record?;
                extent.validate()?;
                Ok(extent)
            }
            None => Err(BurnScarError::Config(format!(
                "bounding extents file has no values: {}",
                path.display()
            ))),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.east <= self.west || self.north <= self.south {
            return Err(BurnScarError::Config(format!(
                "degenerate bounding extent: W {} E {} N {} S {}",
                self.west, self.east, self.north, self.south
            )));
        }
        Ok(())
    }

    /// Grid shape (rows, cols) covering the extent at the given pixel size.
    pub fn grid_shape(&self, pixel_width: f64, pixel_height: f64) -> (usize, usize) {
        let cols = ((self.east - self.west) / pixel_width).round() as usize;
        let rows = ((self.north - self.south) / pixel_height.abs()).round() as usize;
        (rows, cols)
    }
}

/// Copy `raster` onto the grid spanning `extent` at the raster's own pixel
/// size. Pixels of the extent not covered by the raster hold nodata.
pub fn place_on_extent<T: Sample>(raster: &Raster<T>, extent: &BoundingExtent) -> Result<Raster<T>> {
    let gt = raster.georef.transform;
    if !gt.is_north_up() {
        return Err(BurnScarError::UnsupportedGeoTransform(
            "only north-up rasters can be placed on a common extent".into(),
        ));
    }
    extent.validate()?;

    let (rows, cols) = extent.grid_shape(gt.pixel_width, gt.pixel_height);
    if rows == 0 || cols == 0 {
        return Err(BurnScarError::InvalidDimensions { rows, cols });
    }

    let mut georef = raster.georef.clone();
    georef.transform =
        GeoTransform::north_up(extent.west, extent.north, gt.pixel_width, gt.pixel_height);
    let fill = <T as NumCast>::from(georef.nodata).unwrap_or_default();
    let mut data = Array2::from_elem((rows, cols), fill);

    // Signed offset of the source grid inside the target grid.
    let col_off = ((gt.origin_x - extent.west) / gt.pixel_width).round() as i64;
    let row_off = ((extent.north - gt.origin_y) / gt.pixel_height.abs()).round() as i64;

    let (src_rows, src_cols) = raster.shape();
    let dst_row_start = row_off.max(0);
    let dst_col_start = col_off.max(0);
    let dst_row_end = (row_off + src_rows as i64).min(rows as i64);
    let dst_col_end = (col_off + src_cols as i64).min(cols as i64);

    if dst_row_start < dst_row_end && dst_col_start < dst_col_end {
        let src = raster.data.slice(s![
            (dst_row_start - row_off) as usize..(dst_row_end - row_off) as usize,
            (dst_col_start - col_off) as usize..(dst_col_end - col_off) as usize
        ]);
        data.slice_mut(s![
            dst_row_start as usize..dst_row_end as usize,
            dst_col_start as usize..dst_col_end as usize
        ])
        .assign(&src);
    }

    Ok(Raster::new(data, georef))
}
