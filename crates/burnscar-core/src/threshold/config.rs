use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_FLOOD_FILL_PROB_THRESH, DEFAULT_SEED_PROB_THRESH, DEFAULT_SEED_SIZE_THRESH,
};
use crate::error::{BurnScarError, Result};

/// Thresholds that turn a burn probability raster into burn scars.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThresholdParams {
    /// Probability (percent) at or above which a pixel is a seed.
    #[serde(default = "default_seed_prob_thresh")]
    pub seed_prob_thresh: f32,
    /// Minimum seed patch area (pixels) that is grown.
    #[serde(default = "default_seed_size_thresh")]
    pub seed_size_thresh: usize,
    /// Probability (percent) a pixel must exceed to join a growing scar.
    #[serde(default = "default_flood_fill_prob_thresh")]
    pub flood_fill_prob_thresh: f32,
}

fn default_seed_prob_thresh() -> f32 {
    DEFAULT_SEED_PROB_THRESH
}
fn default_seed_size_thresh() -> usize {
    DEFAULT_SEED_SIZE_THRESH
}
fn default_flood_fill_prob_thresh() -> f32 {
    DEFAULT_FLOOD_FILL_PROB_THRESH
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self {
            seed_prob_thresh: DEFAULT_SEED_PROB_THRESH,
            seed_size_thresh: DEFAULT_SEED_SIZE_THRESH,
            flood_fill_prob_thresh: DEFAULT_FLOOD_FILL_PROB_THRESH,
        }
    }
}

impl ThresholdParams {
    /// Probabilities are percentages; both thresholds must lie in [0, 100]
    /// and at least one seed pixel is required to grow a scar.
    pub fn validate(&self) -> Result<()> {
        let in_range = |v: f32| (0.0..=100.0).contains(&v);
        if !in_range(self.seed_prob_thresh) {
            return Err(BurnScarError::Config(format!(
                "seed probability threshold {} outside [0, 100]",
                self.seed_prob_thresh
            )));
        }
        if !in_range(self.flood_fill_prob_thresh) {
            return Err(BurnScarError::Config(format!(
                "flood fill probability threshold {} outside [0, 100]",
                self.flood_fill_prob_thresh
            )));
        }
        if self.seed_size_thresh == 0 {
            return Err(BurnScarError::Config(
                "seed size threshold must be at least 1 pixel".into(),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Display for ThresholdParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "seed >= {}% ({} px min), fill > {}%",
            self.seed_prob_thresh, self.seed_size_thresh, self.flood_fill_prob_thresh
        )
    }
}
