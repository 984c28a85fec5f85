pub mod components;
pub mod config;
pub mod engine;
pub mod flood_fill;
pub mod regions;

pub use config::ThresholdParams;
pub use engine::{find_burn_scars, threshold_raster, BurnScars, ClassifiedScene};
pub use regions::{RegionStats, RegionTable};
