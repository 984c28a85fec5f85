/// Nodata sentinel used when a raster header does not declare one.
pub const DEFAULT_NODATA: f64 = -9999.0;

/// Burn probability (percent) at or above which a pixel seeds a burn scar.
pub const DEFAULT_SEED_PROB_THRESH: f32 = 97.5;

/// Minimum seed component area (pixels) that is grown into a burn scar.
/// Smaller seed patches are treated as false positives.
pub const DEFAULT_SEED_SIZE_THRESH: usize = 5;

/// Burn probability (percent) a pixel must exceed to join a growing scar.
pub const DEFAULT_FLOOD_FILL_PROB_THRESH: f32 = 75.0;

/// Edge length (pixels) of the square blocks read during annual aggregation.
pub const DEFAULT_BLOCK_SIZE: usize = 1024;

/// First year with usable Landsat TM surface reflectance.
pub const MIN_STACK_YEAR: i32 = 1984;

/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Julian day written to `burned_area` for pixels that never burned.
pub const NEVER_BURNED: i16 = 0;

/// Suffix of a burn probability raster relative to the scene stem.
pub const BURN_PROBABILITY_SUFFIX: &str = "_burn_probability.img";

/// Suffix of a burn classification raster relative to the scene stem.
pub const BURN_CLASS_SUFFIX: &str = "_burn_class.img";

/// Suffix of the region attribute table written next to a classification.
pub const REGION_TABLE_SUFFIX: &str = "_burn_class.rat.csv";

/// Extension of the ENVI payload file.
pub const ENVI_PAYLOAD_EXT: &str = "img";

/// Extension of the ENVI text header.
pub const ENVI_HEADER_EXT: &str = "hdr";

/// Sidecar extension GDAL leaves next to rasters it touched.
pub const AUX_XML_SUFFIX: &str = ".aux.xml";

/// Per-scene QA mask layer used by the seasonal compositor.
pub const DEFAULT_MASK_LAYER: &str = "mask";
