use std::collections::VecDeque;

use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use super::components::{ComponentStats, LabeledComponents};

/// Attribute-table row for one final burn scar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionStats {
    pub label: i32,
    /// Pixel count.
    pub area: usize,
    /// Pixel count with enclosed holes filled.
    pub filled_area: usize,
    pub max_intensity: f64,
    pub mean_intensity: f64,
    pub min_intensity: f64,
}

/// Region attribute table keyed by final label, sorted ascending.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegionTable {
    regions: Vec<RegionStats>,
}

impl RegionTable {
    pub fn from_regions(mut regions: Vec<RegionStats>) -> Self {
        regions.sort_by_key(|r| r.label);
        Self { regions }
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionStats> {
        self.regions.iter()
    }

    pub fn get(&self, label: i32) -> Option<&RegionStats> {
        self.regions
            .binary_search_by_key(&label, |r| r.label)
            .ok()
            .map(|i| &self.regions[i])
    }

    pub fn labels(&self) -> Vec<i32> {
        self.regions.iter().map(|r| r.label).collect()
    }

    /// Total burned pixels across all regions.
    pub fn total_area(&self) -> usize {
        self.regions.iter().map(|r| r.area).sum()
    }
}

/// Per-region statistics of `intensity` over the labeled components.
pub fn region_stats(components: &LabeledComponents, intensity: ArrayView2<'_, f32>) -> RegionTable {
    let n = components.count();
    let mut sum = vec![0.0f64; n];
    let mut min = vec![f64::INFINITY; n];
    let mut max = vec![f64::NEG_INFINITY; n];

    for (label, &value) in components.labels.iter().zip(intensity.iter()) {
        if *label == 0 {
            continue;
        }
        let i = *label as usize - 1;
        let v = value as f64;
        sum[i] += v;
        min[i] = min[i].min(v);
        max[i] = max[i].max(v);
    }

    let regions = components
        .components
        .iter()
        .map(|c| {
            let i = c.label as usize - 1;
            RegionStats {
                label: c.label as i32,
                area: c.area,
                filled_area: filled_area(&components.labels, c),
                max_intensity: max[i],
                mean_intensity: sum[i] / c.area as f64,
                min_intensity: min[i],
            }
        })
        .collect();

    RegionTable { regions }
}

/// Area of a component after filling holes: pixels inside its bounding box
/// that cannot reach the box border through 4-connected background.
fn filled_area(labels: &Array2<u32>, component: &ComponentStats) -> usize {
    let (r0, r1, c0, c1) = component.bbox;
    // One pixel of padding around the bounding box guarantees a connected
    // outside for the background flood.
    let ph = r1 - r0 + 3;
    let pw = c1 - c0 + 3;
    let inside = |pr: usize, pc: usize| {
        pr >= 1
            && pc >= 1
            && pr <= ph - 2
            && pc <= pw - 2
            && labels[[r0 + pr - 1, c0 + pc - 1]] == component.label
    };

    let mut outside = Array2::<bool>::from_elem((ph, pw), false);
    let mut queue = VecDeque::from([(0usize, 0usize)]);
    outside[[0, 0]] = true;
    let mut outside_count = 1usize;

    while let Some((r, c)) = queue.pop_front() {
        let mut visit = |nr: usize, nc: usize| {
            if !outside[[nr, nc]] && !inside(nr, nc) {
                outside[[nr, nc]] = true;
                outside_count += 1;
                queue.push_back((nr, nc));
            }
        };
        if r > 0 {
            visit(r - 1, c);
        }
        if r + 1 < ph {
            visit(r + 1, c);
        }
        if c > 0 {
            visit(r, c - 1);
        }
        if c + 1 < pw {
            visit(r, c + 1);
        }
    }

    ph * pw - outside_count
}
