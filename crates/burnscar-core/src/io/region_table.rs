use std::path::Path;

use crate::error::Result;
use crate::threshold::regions::{RegionStats, RegionTable};

const COLUMNS: [&str; 6] = [
    "label",
    "area",
    "filled_area",
    "max_intensity",
    "mean_intensity",
    "min_intensity",
];

/// Persist a region attribute table as CSV (one row per final label). The
/// header is written even when the table is empty.
pub fn write_region_table(path: &Path, table: &RegionTable) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(COLUMNS)?;
    for region in table.iter() {
        writer.serialize(region)?;
    }
    writer.flush()?;
    Ok(())
}

/// Load a region attribute table written by [`write_region_table`].
pub fn read_region_table(path: &Path) -> Result<RegionTable> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut regions = Vec::new();
    for record in reader.deserialize() {
        let region: RegionStats = record?;
        regions.push(region);
    }
    Ok(RegionTable::from_regions(regions))
}
