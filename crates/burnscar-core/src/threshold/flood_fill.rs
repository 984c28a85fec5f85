use ndarray::{Array2, ArrayView2};

/// Grow region `label` from (`row`, `col`) over pixels whose probability
/// exceeds `fill_thresh`.
///
/// The frontier is an explicit LIFO stack. A popped pixel is absorbed when
/// it is not nodata, not already carrying `label`, and strictly above the
/// threshold. Only neighbours that are still unlabeled (0) are pushed, so a
/// fill never crosses into a region claimed by another label.
///
/// Returns the number of pixels absorbed.
pub fn flood_fill(
    probability: ArrayView2<'_, f32>,
    labels: &mut Array2<i32>,
    row: usize,
    col: usize,
    label: i32,
    fill_thresh: f32,
    nodata: f32,
) -> usize {
    let (h, w) = probability.dim();
    let mut filled = 0usize;
    let mut frontier: Vec<(usize, usize)> = vec![(row, col)];

    while let Some((r, c)) = frontier.pop() {
        let p = probability[[r, c]];
        // NaN never compares above the threshold, so it is never absorbed.
        let above = p > fill_thresh;
        if p == nodata || labels[[r, c]] == label || !above {
            continue;
        }

        labels[[r, c]] = label;
        filled += 1;

        if r > 0 && labels[[r - 1, c]] == 0 {
            frontier.push((r - 1, c));
        }
        if r + 1 < h && labels[[r + 1, c]] == 0 {
            frontier.push((r + 1, c));
        }
        if c > 0 && labels[[r, c - 1]] == 0 {
            frontier.push((r, c - 1));
        }
        if c + 1 < w && labels[[r, c + 1]] == 0 {
            frontier.push((r, c + 1));
        }
    }

    filled
}
