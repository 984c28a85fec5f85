mod common;

use burnscar_core::error::BurnScarError;
use burnscar_core::io::{header_path, write_raster, EnviDataType, EnviReader, EnviWriter};
use burnscar_core::raster::{GeoReference, Raster};
use common::{grid, test_georef, write_envi};
use ndarray::Array2;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Reader / writer
// ---------------------------------------------------------------------------

#[test]
fn test_written_raster_keeps_georeferencing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bp.img");
    let data = Array2::from_shape_fn((4, 6), |(r, c)| (r * 10 + c) as f32);
    write_envi(&path, data.clone(), EnviDataType::Float32);

    assert!(header_path(&path).is_file());
    let reader = EnviReader::open(&path).unwrap();
    assert_eq!(reader.driver_name(), "ENVI");
    assert_eq!(reader.shape(), (4, 6));
    assert_eq!(reader.data_type(0).unwrap(), EnviDataType::Float32);

    let georef = reader.georef().unwrap();
    assert_eq!(georef.transform, test_georef().transform);
    assert!(georef.projection.contains("UTM zone 11N"));
    assert_eq!(reader.nodata_value(0).unwrap(), Some(-9999.0));
    assert_eq!(reader.read_band::<f32>(0).unwrap(), data);
}

#[test]
fn test_read_block_window() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bc.img");
    let data = Array2::from_shape_fn((5, 5), |(r, c)| (r * 5 + c) as i32);
    write_envi(&path, data, EnviDataType::Int32);

    let reader = EnviReader::open(&path).unwrap();
    let block = reader.read_block::<i32>(0, 1, 2, 3, 2).unwrap();
    assert_eq!(block, grid(&[&[11, 12, 13], &[16, 17, 18]]));
}

#[test]
fn test_read_converts_sample_type() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("count.img");
    write_envi(&path, grid(&[&[1i16, -2], &[300, 4]]), EnviDataType::Int16);
    let reader = EnviReader::open(&path).unwrap();
    let as_f32 = reader.read_band::<f32>(0).unwrap();
    assert_eq!(as_f32, grid(&[&[1.0f32, -2.0], &[300.0, 4.0]]));
}

#[test]
fn test_block_outside_raster_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("small.img");
    write_envi(&path, Array2::<f32>::zeros((3, 3)), EnviDataType::Float32);
    let reader = EnviReader::open(&path).unwrap();
    assert!(matches!(
        reader.read_block::<f32>(0, 2, 0, 2, 1),
        Err(BurnScarError::BlockOutOfBounds { .. })
    ));
    assert!(matches!(
        reader.read_band::<f32>(1),
        Err(BurnScarError::BandOutOfRange { band: 1, total: 1 })
    ));
}

#[test]
fn test_missing_raster_fails_to_open() {
    let dir = TempDir::new().unwrap();
    let result = EnviReader::open(&dir.path().join("absent.img"));
    assert!(matches!(result, Err(BurnScarError::Io(_))));
}

#[test]
fn test_file_without_raster_driver_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("garbage.img");
    std::fs::write(&path, b"not a raster at all").unwrap();
    assert!(matches!(
        EnviReader::open(&path),
        Err(BurnScarError::Gdal(_))
    ));
}

#[test]
fn test_each_data_type_is_written_as_requested() {
    let dir = TempDir::new().unwrap();
    let types = [
        EnviDataType::Byte,
        EnviDataType::Int16,
        EnviDataType::UInt16,
        EnviDataType::Int32,
        EnviDataType::Float32,
        EnviDataType::Float64,
    ];
    let georef = GeoReference {
        nodata: 0.0,
        ..test_georef()
    };
    for data_type in types {
        let path = dir.path().join(format!("{data_type}.img"));
        let raster = Raster::new(grid(&[&[1u8, 2], &[3, 4]]), georef.clone());
        write_raster(&path, &raster, data_type).unwrap();
        let reader = EnviReader::open(&path).unwrap();
        assert_eq!(reader.data_type(0).unwrap(), data_type);
        assert_eq!(
            reader.read_band::<f64>(0).unwrap(),
            grid(&[&[1.0, 2.0], &[3.0, 4.0]])
        );
    }
}

#[test]
fn test_bands_are_written_independently() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("two_band.img");
    let mut writer =
        EnviWriter::create(&path, 2, 2, 2, EnviDataType::Float32, &test_georef()).unwrap();
    writer
        .write_block(1, Array2::from_elem((2, 2), 5.0f32).view(), 0, 0)
        .unwrap();
    writer
        .write_block(0, Array2::from_elem((2, 2), 1.5f32).view(), 0, 0)
        .unwrap();
    assert!(matches!(
        writer.write_block(2, Array2::from_elem((1, 1), 0.0f32).view(), 0, 0),
        Err(BurnScarError::BandOutOfRange { band: 2, total: 2 })
    ));
    writer.finalize().unwrap();

    let reader = EnviReader::open(&path).unwrap();
    assert_eq!(reader.band_count(), 2);
    assert_eq!(reader.nodata_value(1).unwrap(), Some(-9999.0));
    assert_eq!(reader.read_band::<f32>(0).unwrap(), Array2::from_elem((2, 2), 1.5f32));
    assert_eq!(reader.read_band::<f32>(1).unwrap(), Array2::from_elem((2, 2), 5.0f32));
}

#[test]
fn test_blocks_can_be_written_in_any_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tiles.img");
    let mut writer =
        EnviWriter::create(&path, 2, 4, 1, EnviDataType::Int16, &test_georef()).unwrap();
    writer
        .write_block(0, Array2::from_elem((2, 2), 7i16).view(), 2, 0)
        .unwrap();
    writer
        .write_block(0, Array2::from_elem((2, 2), 3i16).view(), 0, 0)
        .unwrap();
    writer.finalize().unwrap();

    let data = EnviReader::open(&path).unwrap().read_band::<i16>(0).unwrap();
    assert_eq!(data, grid(&[&[3i16, 3, 7, 7], &[3, 3, 7, 7]]));
}

#[test]
fn test_out_of_range_sample_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("overflow.img");
    let raster = Raster::new(Array2::from_elem((1, 1), 40_000i32), test_georef());
    assert!(matches!(
        write_raster(&path, &raster, EnviDataType::Int16),
        Err(BurnScarError::SampleOutOfRange { target: "Int16", .. })
    ));
    let negative = Raster::new(Array2::from_elem((1, 1), -1i32), test_georef());
    assert!(matches!(
        write_raster(&dir.path().join("negative.img"), &negative, EnviDataType::Byte),
        Err(BurnScarError::SampleOutOfRange { target: "Byte", .. })
    ));
}

#[test]
fn test_zero_sized_raster_cannot_be_created() {
    let dir = TempDir::new().unwrap();
    let result = EnviWriter::create(
        &dir.path().join("empty.img"),
        0,
        3,
        1,
        EnviDataType::Float32,
        &test_georef(),
    );
    assert!(matches!(result, Err(BurnScarError::InvalidDimensions { .. })));
}
