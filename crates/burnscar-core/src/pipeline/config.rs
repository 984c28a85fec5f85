use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BLOCK_SIZE, DEFAULT_MASK_LAYER, MIN_STACK_YEAR};
use crate::error::{BurnScarError, Result};
use crate::io::TemporalStack;
use crate::threshold::ThresholdParams;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Stack CSV listing every scene (`file`, `year`, `julian`, ...).
    pub stack_file: PathBuf,
    /// Directory holding `<stem>_burn_probability.img` rasters.
    pub bp_dir: PathBuf,
    /// Directory receiving (and later read back) `<stem>_burn_class.img`.
    pub bc_dir: PathBuf,
    /// Directory receiving the annual products.
    pub output_dir: PathBuf,
    /// First year to process; defaults to the first stack year + 1.
    #[serde(default)]
    pub start_year: Option<i32>,
    /// Last year to process; defaults to the last stack year.
    #[serde(default)]
    pub end_year: Option<i32>,
    #[serde(default = "default_workers")]
    pub workers: usize,
    #[serde(default)]
    pub threshold: ThresholdParams,
    #[serde(default)]
    pub annual: AnnualConfig,
    #[serde(default)]
    pub composite: Option<CompositeConfig>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnualConfig {
    /// Edge length of the square blocks read and written at a time.
    #[serde(default = "default_block_size")]
    pub block_size: usize,
    /// Write an 8-bit PNG preview next to each annual product.
    #[serde(default)]
    pub quicklooks: bool,
    /// Bounding-extent CSV. When set, every scene is placed on this grid
    /// before aggregation.
    #[serde(default)]
    pub extent_file: Option<PathBuf>,
}

impl Default for AnnualConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            quicklooks: false,
            extent_file: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompositeConfig {
    /// Directory holding the per-scene QA masks (`<stem>_<mask_layer>.img`).
    pub mask_dir: PathBuf,
    /// Directory holding the per-scene spectral indices (`<stem>_<index>.img`).
    pub index_dir: PathBuf,
    /// Index layer names to summarize, e.g. `["ndvi", "nbr"]`.
    pub indices: Vec<String>,
    pub output_dir: PathBuf,
    #[serde(default = "default_mask_layer")]
    pub mask_layer: String,
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn default_block_size() -> usize {
    DEFAULT_BLOCK_SIZE
}

fn default_mask_layer() -> String {
    DEFAULT_MASK_LAYER.to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stack_file: PathBuf::from("stack.csv"),
            bp_dir: PathBuf::from("burn_probability"),
            bc_dir: PathBuf::from("burn_class"),
            output_dir: PathBuf::from("annual"),
            start_year: None,
            end_year: None,
            workers: default_workers(),
            threshold: ThresholdParams::default(),
            annual: AnnualConfig::default(),
            composite: None,
        }
    }
}

/// Inclusive range of years selected for processing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.start..=self.end
    }

    pub fn len(&self) -> usize {
        (self.end - self.start + 1).max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

impl std::fmt::Display for YearRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl PipelineConfig {
    /// Checks that need no filesystem access beyond the config itself.
    pub fn validate(&self) -> Result<()> {
        self.threshold.validate()?;
        if self.workers == 0 {
            return Err(BurnScarError::Config("workers must be at least 1".into()));
        }
        if self.annual.block_size == 0 {
            return Err(BurnScarError::Config("block_size must be at least 1".into()));
        }
        for (name, year) in [("start_year", self.start_year), ("end_year", self.end_year)] {
            if let Some(y) = year {
                if y < MIN_STACK_YEAR {
                    return Err(BurnScarError::Config(format!(
                        "{name} cannot be before {MIN_STACK_YEAR}: {y}"
                    )));
                }
            }
        }
        if let (Some(start), Some(end)) = (self.start_year, self.end_year) {
            if end < start {
                return Err(BurnScarError::Config(format!(
                    "end_year ({end}) is less than start_year ({start})"
                )));
            }
        }
        if let Some(composite) = &self.composite {
            if composite.indices.is_empty() {
                return Err(BurnScarError::Config(
                    "composite needs at least one index layer".into(),
                ));
            }
        }
        Ok(())
    }

    /// Resolve the processing years against the stack. The first stack year
    /// only provides history, so the default start is one year later.
    pub fn resolve_years(&self, stack: &TemporalStack) -> Result<YearRange> {
        let (Some(min), Some(max)) = (stack.min_year(), stack.max_year()) else {
            return Err(BurnScarError::Config(
                "stack file lists no scenes".into(),
            ));
        };
        let start = self.start_year.unwrap_or(min + 1);
        let end = self.end_year.unwrap_or(max);
        if start < MIN_STACK_YEAR || end < MIN_STACK_YEAR {
            return Err(BurnScarError::Config(format!(
                "years cannot be before {MIN_STACK_YEAR}: {start}-{end}"
            )));
        }
        if end < start {
            return Err(BurnScarError::Config(format!(
                "end_year ({end}) is less than start_year ({start})"
            )));
        }
        Ok(YearRange { start, end })
    }
}
