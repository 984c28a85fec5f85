mod common;

use std::path::Path;

use burnscar_core::error::BurnScarError;
use burnscar_core::io::extent::{place_on_extent, BoundingExtent};
use burnscar_core::io::region_table::{read_region_table, write_region_table};
use burnscar_core::io::{StackEntry, TemporalStack};
use burnscar_core::raster::{GeoTransform, Raster};
use burnscar_core::threshold::{RegionStats, RegionTable};
use common::{grid, test_georef};
use ndarray::Array2;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Stack CSV
// ---------------------------------------------------------------------------

#[test]
fn test_headers_are_case_insensitive_with_extra_columns() {
    let csv = "FILE_, Year, Julian, Month, Sensor, Extra\n\
               lndsr.LT50420342005100.hdf, 2005, 100, 4, TM, x\n\
               lndsr.LT50420342004200.hdf, 2004, 200, 7, TM, y\n";
    let stack = TemporalStack::from_csv_str(csv).unwrap();
    assert_eq!(stack.entries.len(), 2);
    assert_eq!(stack.entries[0].year, 2005);
    assert_eq!(stack.entries[0].month, Some(4));
    assert_eq!(stack.entries[1].sensor.as_deref(), Some("TM"));
    assert_eq!(stack.min_year(), Some(2004));
    assert_eq!(stack.max_year(), Some(2005));
}

#[test]
fn test_month_is_derived_from_julian_day() {
    let entry = StackEntry::new("scene.tif", 2005, 32);
    assert_eq!(entry.acquisition_month(), Some(2));
    let leap = StackEntry::new("scene.tif", 2004, 366);
    assert_eq!(leap.acquisition_month(), Some(12));
}

#[test]
fn test_scene_file_names() {
    let entry = StackEntry::new("/data/lndsr.LT50420342005100.hdf", 2005, 100);
    assert_eq!(entry.stem(), "LT50420342005100");
    let dir = Path::new("bp");
    assert_eq!(
        entry.burn_probability_path(dir),
        dir.join("LT50420342005100_burn_probability.img")
    );
    assert_eq!(
        entry.burn_class_path(Path::new("bc")),
        Path::new("bc").join("LT50420342005100_burn_class.img")
    );
    assert_eq!(
        entry.layer_path(Path::new("idx"), "nbr"),
        Path::new("idx").join("LT50420342005100_nbr.img")
    );
}

#[test]
fn test_julian_day_out_of_range_is_rejected() {
    let result = TemporalStack::from_csv_str("file,year,julian\na.tif,2005,0\n");
    assert!(matches!(result, Err(BurnScarError::Config(_))));
}

#[test]
fn test_missing_required_column_is_a_stack_error() {
    let result = TemporalStack::from_csv_str("file,year\na.tif,2005\n");
    assert!(matches!(result, Err(BurnScarError::StackFile(_))));
}

#[test]
fn test_missing_stack_file_is_a_config_error() {
    let result = TemporalStack::load(Path::new("/nonexistent/stack.csv"));
    assert!(matches!(result, Err(BurnScarError::Config(_))));
}

#[test]
fn test_year_selection_sorts_by_julian_day() {
    let csv = "file,year,julian\n\
               c.tif,2005,200\n\
               a.tif,2005,50\n\
               x.tif,2004,10\n\
               b.tif,2005,50\n";
    let stack = TemporalStack::from_csv_str(csv).unwrap();
    let files: Vec<&str> = stack.for_year(2005).into_iter().map(|e| e.file.as_str()).collect();
    assert_eq!(files, vec!["a.tif", "b.tif", "c.tif"]);
    assert_eq!(stack.in_years(2004, 2004).len(), 1);
    assert_eq!(stack.in_years(2004, 2005).len(), 4);
}

// ---------------------------------------------------------------------------
// Bounding extent
// ---------------------------------------------------------------------------

#[test]
fn test_load_bounding_extent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bounding_box_coordinates.csv");
    std::fs::write(&path, "West,East,North,South\n499940,500090,4000060,3999910\n").unwrap();
    let extent = BoundingExtent::load(&path).unwrap();
    assert_eq!(extent.west, 499_940.0);
    assert_eq!(extent.grid_shape(30.0, -30.0), (5, 5));
}

#[test]
fn test_place_on_extent_fills_uncovered_pixels() {
    // Scene origin (500000, 4000000); extent starts two pixels west and
    // two pixels north of it.
    let raster = Raster::new(grid(&[&[1.0f32, 2.0], &[3.0, 4.0]]), test_georef());
    let extent = BoundingExtent {
        west: 499_940.0,
        east: 500_090.0,
        north: 4_000_060.0,
        south: 3_999_910.0,
    };
    let placed = place_on_extent(&raster, &extent).unwrap();
    assert_eq!(placed.shape(), (5, 5));
    assert_eq!(
        placed.georef.transform,
        GeoTransform::north_up(499_940.0, 4_000_060.0, 30.0, -30.0)
    );
    assert_eq!(placed.data[[2, 2]], 1.0);
    assert_eq!(placed.data[[3, 3]], 4.0);
    assert_eq!(placed.data[[0, 0]], -9999.0);
    let valid = placed.data.iter().filter(|&&v| v != -9999.0).count();
    assert_eq!(valid, 4);
}

#[test]
fn test_place_on_extent_clips_overhanging_scene() {
    let data = Array2::from_elem((4, 4), 7i32);
    let raster = Raster::new(data, test_georef());
    let extent = BoundingExtent {
        west: 500_030.0,
        east: 500_090.0,
        north: 4_000_000.0,
        south: 3_999_940.0,
    };
    let placed = place_on_extent(&raster, &extent).unwrap();
    assert_eq!(placed.shape(), (2, 2));
    assert!(placed.data.iter().all(|&v| v == 7));
}

#[test]
fn test_rotated_scene_cannot_be_placed() {
    let mut georef = test_georef();
    georef.transform.rot_y = 0.1;
    let raster = Raster::new(Array2::<f32>::zeros((2, 2)), georef);
    let extent = BoundingExtent {
        west: 0.0,
        east: 10.0,
        north: 10.0,
        south: 0.0,
    };
    assert!(matches!(
        place_on_extent(&raster, &extent),
        Err(BurnScarError::UnsupportedGeoTransform(_))
    ));
}

// ---------------------------------------------------------------------------
// Region table sidecar
// ---------------------------------------------------------------------------

#[test]
fn test_empty_region_table_still_has_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scene_burn_class.rat.csv");
    write_region_table(&path, &RegionTable::default()).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        text.trim(),
        "label,area,filled_area,max_intensity,mean_intensity,min_intensity"
    );
    assert!(read_region_table(&path).unwrap().is_empty());
}

#[test]
fn test_region_table_is_keyed_by_label() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rat.csv");
    let table = RegionTable::from_regions(vec![
        RegionStats {
            label: 2,
            area: 4,
            filled_area: 4,
            max_intensity: 99.0,
            mean_intensity: 98.5,
            min_intensity: 98.0,
        },
        RegionStats {
            label: 1,
            area: 9,
            filled_area: 10,
            max_intensity: 100.0,
            mean_intensity: 90.0,
            min_intensity: 76.0,
        },
    ]);
    write_region_table(&path, &table).unwrap();
    let loaded = read_region_table(&path).unwrap();
    assert_eq!(loaded.labels(), vec![1, 2]);
    assert_eq!(loaded.get(1).unwrap().filled_area, 10);
    assert_eq!(loaded, table);
}
