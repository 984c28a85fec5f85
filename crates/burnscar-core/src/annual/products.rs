use std::path::{Path, PathBuf};

use ndarray::Array2;

use crate::consts::ENVI_PAYLOAD_EXT;

/// The four per-year burn products.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnnualProduct {
    /// Julian day of the first detected burn.
    BurnedArea,
    /// Number of scenes classified as burned.
    BurnCount,
    /// Number of scenes with a valid observation.
    GoodLooksCount,
    /// Maximum burn probability.
    MaxBurnProb,
}

impl AnnualProduct {
    pub const ALL: [AnnualProduct; 4] = [
        AnnualProduct::BurnedArea,
        AnnualProduct::BurnCount,
        AnnualProduct::GoodLooksCount,
        AnnualProduct::MaxBurnProb,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::BurnedArea => "burned_area",
            Self::BurnCount => "burn_count",
            Self::GoodLooksCount => "good_looks_count",
            Self::MaxBurnProb => "max_burn_prob",
        }
    }

    /// Deterministic output name: `<product>_<year>.img`.
    pub fn file_name(&self, year: i32) -> String {
        format!("{}_{}.{}", self.name(), year, ENVI_PAYLOAD_EXT)
    }

    pub fn path(&self, output_dir: &Path, year: i32) -> PathBuf {
        output_dir.join(self.file_name(year))
    }
}

impl std::fmt::Display for AnnualProduct {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The four co-produced annual rasters (signed 16-bit).
#[derive(Clone, Debug, PartialEq)]
pub struct AnnualSummary {
    pub burned_area: Array2<i16>,
    pub burn_count: Array2<i16>,
    pub good_looks_count: Array2<i16>,
    pub max_burn_prob: Array2<i16>,
}

impl AnnualSummary {
    pub fn filled(rows: usize, cols: usize, value: i16) -> Self {
        let grid = Array2::from_elem((rows, cols), value);
        Self {
            burned_area: grid.clone(),
            burn_count: grid.clone(),
            good_looks_count: grid.clone(),
            max_burn_prob: grid,
        }
    }

    pub fn shape(&self) -> (usize, usize) {
        self.burned_area.dim()
    }

    pub fn product(&self, product: AnnualProduct) -> &Array2<i16> {
        match product {
            AnnualProduct::BurnedArea => &self.burned_area,
            AnnualProduct::BurnCount => &self.burn_count,
            AnnualProduct::GoodLooksCount => &self.good_looks_count,
            AnnualProduct::MaxBurnProb => &self.max_burn_prob,
        }
    }
}
