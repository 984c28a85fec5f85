use std::path::PathBuf;

use anyhow::{Context, Result};
use burnscar_core::io::EnviReader;
use clap::Args;

#[derive(Args)]
pub struct InfoArgs {
    /// Raster to describe, e.g. an ENVI payload (.img) with its .hdr
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let reader = EnviReader::open(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    let georef = reader.georef()?;
    let gt = georef.transform;

    println!("File:        {}", args.file.display());
    println!("Driver:      {}", reader.driver_name());
    println!("Dimensions:  {}x{}", reader.cols(), reader.rows());
    println!("Bands:       {}", reader.band_count());
    for band in 0..reader.band_count() {
        let data_type = reader
            .data_type(band)
            .map(|t| t.to_string())
            .unwrap_or_else(|e| format!("({e})"));
        println!("Band {}:      {}", band + 1, data_type);
    }
    println!("Origin:      ({}, {})", gt.origin_x, gt.origin_y);
    println!("Pixel size:  {} x {}", gt.pixel_width, gt.pixel_height);
    match reader.nodata_value(0)? {
        Some(nodata) => println!("Nodata:      {nodata}"),
        None => println!("Nodata:      (none, assuming {})", georef.nodata),
    }
    if !georef.projection.is_empty() {
        println!("Projection:  {}", georef.projection);
    }

    Ok(())
}
