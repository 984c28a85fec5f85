mod common;

use burnscar_core::threshold::components::label_components;
use common::grid;
use ndarray::Array2;

#[test]
fn test_empty_mask_has_no_components() {
    let mask = Array2::<bool>::from_elem((4, 4), false);
    let labeled = label_components(mask.view());
    assert_eq!(labeled.count(), 0);
    assert!(labeled.labels.iter().all(|&l| l == 0));
}

#[test]
fn test_labels_follow_scan_order_of_first_pixel() {
    let mask = grid(&[
        &[false, false, false, true],
        &[true, false, false, true],
        &[true, false, false, false],
    ]);
    let labeled = label_components(mask.view());
    assert_eq!(labeled.count(), 2);
    // The right-hand patch starts at (0, 3), before the left one at (1, 0).
    assert_eq!(labeled.labels[[0, 3]], 1);
    assert_eq!(labeled.labels[[1, 3]], 1);
    assert_eq!(labeled.labels[[1, 0]], 2);
    assert_eq!(labeled.components[0].first_pixel, (0, 3));
    assert_eq!(labeled.components[1].first_pixel, (1, 0));
}

#[test]
fn test_diagonal_pixels_are_separate() {
    let mask = grid(&[&[true, false], &[false, true]]);
    let labeled = label_components(mask.view());
    assert_eq!(labeled.count(), 2);
    assert_ne!(labeled.labels[[0, 0]], labeled.labels[[1, 1]]);
}

#[test]
fn test_u_shape_merges_into_one_component() {
    // Two arms get different provisional labels and meet on the bottom row.
    let mask = grid(&[
        &[true, false, true],
        &[true, false, true],
        &[true, true, true],
    ]);
    let labeled = label_components(mask.view());
    assert_eq!(labeled.count(), 1);
    assert_eq!(labeled.components[0].area, 7);
    assert_eq!(labeled.components[0].bbox, (0, 2, 0, 2));
    assert!(labeled
        .labels
        .iter()
        .zip(mask.iter())
        .all(|(&l, &m)| (l == 1) == m));
}

#[test]
fn test_component_area_and_bbox() {
    let mask = grid(&[
        &[false, false, false, false],
        &[false, true, true, false],
        &[false, true, false, false],
        &[false, false, false, false],
    ]);
    let labeled = label_components(mask.view());
    assert_eq!(labeled.count(), 1);
    let c = &labeled.components[0];
    assert_eq!(c.label, 1);
    assert_eq!(c.area, 3);
    assert_eq!(c.first_pixel, (1, 1));
    assert_eq!(c.bbox, (1, 2, 1, 2));
}
