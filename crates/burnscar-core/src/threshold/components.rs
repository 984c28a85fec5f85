use ndarray::{Array2, ArrayView2};

/// Statistics for a single connected component.
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentStats {
    /// Consecutive label, starting at 1.
    pub label: u32,
    /// Number of pixels in the component.
    pub area: usize,
    /// First pixel of the component in row-major scan order: (row, col).
    pub first_pixel: (usize, usize),
    /// Bounding box: (min_row, max_row, min_col, max_col).
    pub bbox: (usize, usize, usize, usize),
}

/// Label image plus per-component statistics.
#[derive(Clone, Debug)]
pub struct LabeledComponents {
    /// 0 = background, otherwise the component label.
    pub labels: Array2<u32>,
    /// Sorted by label ascending.
    pub components: Vec<ComponentStats>,
}

impl LabeledComponents {
    pub fn count(&self) -> usize {
        self.components.len()
    }
}

/// Label the 4-connected components of a binary mask using two-pass
/// labeling with union-find.
///
/// Final labels are consecutive and numbered in scan order of each
/// component's first pixel, so the result does not depend on how
/// provisional labels were merged.
pub fn label_components(mask: ArrayView2<'_, bool>) -> LabeledComponents {
    let (h, w) = mask.dim();
    let mut labels = Array2::<u32>::zeros((h, w));
    if h == 0 || w == 0 {
        return LabeledComponents {
            labels,
            components: Vec::new(),
        };
    }

    // Union-find parent array. Index 0 unused; labels start at 1.
    let mut parent: Vec<u32> = vec![0];

    // Pass 1: assign provisional labels.
    for row in 0..h {
        for col in 0..w {
            if !mask[[row, col]] {
                continue;
            }

            let up = if row > 0 { labels[[row - 1, col]] } else { 0 };
            let left = if col > 0 { labels[[row, col - 1]] } else { 0 };

            labels[[row, col]] = match (up > 0, left > 0) {
                (false, false) => {
                    let next = parent.len() as u32;
                    parent.push(next);
                    next
                }
                (true, false) => up,
                (false, true) => left,
                (true, true) => {
                    if up != left {
                        union(&mut parent, up, left);
                    }
                    up.min(left)
                }
            };
        }
    }

    // Flatten parent references.
    for i in 1..parent.len() {
        parent[i] = find(&parent, i as u32);
    }

    // Pass 2: renumber roots in scan order and collect stats.
    let mut final_label = vec![0u32; parent.len()];
    let mut components: Vec<ComponentStats> = Vec::new();

    for row in 0..h {
        for col in 0..w {
            let provisional = labels[[row, col]];
            if provisional == 0 {
                continue;
            }
            let root = parent[provisional as usize] as usize;
            if final_label[root] == 0 {
                components.push(ComponentStats {
                    label: components.len() as u32 + 1,
                    area: 0,
                    first_pixel: (row, col),
                    bbox: (row, row, col, col),
                });
                final_label[root] = components.len() as u32;
            }
            let label = final_label[root];
            labels[[row, col]] = label;

            let entry = &mut components[label as usize - 1];
            entry.area += 1;
            entry.bbox.0 = entry.bbox.0.min(row);
            entry.bbox.1 = entry.bbox.1.max(row);
            entry.bbox.2 = entry.bbox.2.min(col);
            entry.bbox.3 = entry.bbox.3.max(col);
        }
    }

    LabeledComponents { labels, components }
}

fn find(parent: &[u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        x = parent[x as usize];
    }
    x
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        // Merge larger root into smaller root to keep labels consistent.
        let (small, big) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[big as usize] = small;
    }
}
