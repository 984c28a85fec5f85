pub mod season;
pub mod summary;

pub use season::Season;
pub use summary::{annual_maximum, seasonal_summary, SeasonalComposite};

use std::path::{Path, PathBuf};

use crate::consts::ENVI_PAYLOAD_EXT;

/// `<year>_<season>_good_count.img`
pub fn good_count_path(output_dir: &Path, year: i32, season: Season) -> PathBuf {
    output_dir.join(format!("{year}_{season}_good_count.{ENVI_PAYLOAD_EXT}"))
}

/// `<year>_<season>_<index>.img`
pub fn seasonal_index_path(output_dir: &Path, year: i32, season: Season, index: &str) -> PathBuf {
    output_dir.join(format!("{year}_{season}_{index}.{ENVI_PAYLOAD_EXT}"))
}

/// `<year>_maximum_<index>.img`
pub fn annual_max_path(output_dir: &Path, year: i32, index: &str) -> PathBuf {
    output_dir.join(format!("{year}_maximum_{index}.{ENVI_PAYLOAD_EXT}"))
}
