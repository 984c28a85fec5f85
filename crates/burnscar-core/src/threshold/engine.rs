use ndarray::{Array2, ArrayView2, Zip};
use tracing::debug;

use crate::error::{BurnScarError, Result};
use crate::raster::Raster;

use super::components::label_components;
use super::config::ThresholdParams;
use super::flood_fill::flood_fill;
use super::regions::{region_stats, RegionTable};

/// Result of thresholding one burn probability raster.
#[derive(Clone, Debug)]
pub struct BurnScars {
    /// Final region labels (0 = unburned, negative = propagated nodata/QA).
    pub labels: Array2<i32>,
    pub regions: RegionTable,
    /// Seed components found before size filtering.
    pub seed_count: usize,
    /// Seed components large enough to be grown.
    pub grown_seeds: usize,
    /// Pixels absorbed by all flood fills.
    pub filled_pixels: usize,
}

/// A classified scene: the label raster plus its attribute table.
#[derive(Clone, Debug)]
pub struct ClassifiedScene {
    pub classification: Raster<i32>,
    pub regions: RegionTable,
}

/// Turn a burn probability grid into labeled burn scars.
///
/// Seeds are 4-connected patches with probability `>= seed_prob_thresh`;
/// patches smaller than `seed_size_thresh` are dropped. Each surviving seed
/// is flood filled from its first pixel in scan order, in ascending seed
/// label order. The union of the fills is then relabeled by connectivity, so
/// scars that grew into contact become a single region. Pixels that are
/// nodata or negative in `probability` carry that value in the output.
pub fn find_burn_scars(
    probability: ArrayView2<'_, f32>,
    params: &ThresholdParams,
    nodata: f32,
) -> Result<BurnScars> {
    let (h, w) = probability.dim();
    if h == 0 || w == 0 {
        return Err(BurnScarError::InvalidDimensions { rows: h, cols: w });
    }
    params.validate()?;

    // Phase 1: seeds.
    let seed_mask = probability.mapv(|p| p != nodata && p >= params.seed_prob_thresh);
    let seeds = label_components(seed_mask.view());
    debug!(seeds = seeds.count(), "Found seeds to use for flood fill");

    // Phase 2: grow surviving seeds.
    let mut grown = Array2::<i32>::zeros((h, w));
    let mut grown_seeds = 0usize;
    let mut filled_pixels = 0usize;
    for seed in seeds
        .components
        .iter()
        .filter(|s| s.area >= params.seed_size_thresh)
    {
        let (row, col) = seed.first_pixel;
        // Already swallowed by an earlier seed's fill, which covered this
        // seed's whole fill closure.
        if grown[[row, col]] != 0 {
            continue;
        }
        grown_seeds += 1;
        filled_pixels += flood_fill(
            probability,
            &mut grown,
            row,
            col,
            seed.label as i32,
            params.flood_fill_prob_thresh,
            nodata,
        );
    }

    // Final regions by connectivity of everything grown.
    let burned = grown.mapv(|l| l > 0);
    let scars = label_components(burned.view());
    let regions = region_stats(&scars, probability);

    let mut labels = scars.labels.mapv(|l| l as i32);
    let nodata_label = nodata as i32;
    Zip::from(&mut labels)
        .and(probability)
        .for_each(|label, &p| {
            if p == nodata {
                *label = nodata_label;
            } else if p < 0.0 {
                *label = p.floor() as i32;
            }
        });

    debug!(
        seeds = seeds.count(),
        grown_seeds,
        filled_pixels,
        regions = regions.len(),
        "Burn scars complete"
    );

    Ok(BurnScars {
        labels,
        regions,
        seed_count: seeds.count(),
        grown_seeds,
        filled_pixels,
    })
}

/// Threshold a georeferenced probability raster using its own nodata value.
pub fn threshold_raster(probability: &Raster<f32>, params: &ThresholdParams) -> Result<ClassifiedScene> {
    let nodata = probability.georef.nodata as f32;
    let scars = find_burn_scars(probability.data.view(), params, nodata)?;
    Ok(ClassifiedScene {
        classification: Raster::new(scars.labels, probability.georef.clone()),
        regions: scars.regions,
    })
}
