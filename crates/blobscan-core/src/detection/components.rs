use std::collections::HashMap;
use std::f64::consts::PI;

use image::{GrayImage, Luma};
use imageproc::region_labelling::{connected_components, Connectivity};

/// Statistics for a single connected component.
#[derive(Clone, Debug)]
pub struct ComponentStats {
    /// Unique label for this component.
    pub label: u32,
    /// Number of pixels in the component.
    pub area: usize,
    /// Bounding box: (min_row, max_row, min_col, max_col).
    pub bbox: (usize, usize, usize, usize),
    /// Sum of 8-bit intensity levels over the component.
    pub intensity_sum: u64,
    /// Pixels with at least one 4-neighbor outside the component.
    pub perimeter: usize,
}

impl ComponentStats {
    pub fn width(&self) -> usize {
        self.bbox.3 - self.bbox.2 + 1
    }

    pub fn height(&self) -> usize {
        self.bbox.1 - self.bbox.0 + 1
    }

    /// Mean intensity in 8-bit levels.
    pub fn mean_intensity(&self) -> f32 {
        if self.area == 0 {
            return 0.0;
        }
        (self.intensity_sum as f64 / self.area as f64) as f32
    }

    /// Long side over short side of the bounding box, always >= 1.
    pub fn aspect_ratio(&self) -> f32 {
        let (w, h) = (self.width() as f32, self.height() as f32);
        w.max(h) / w.min(h)
    }

    /// `4 * pi * area / perimeter^2`: close to 1 for filled discs and squares,
    /// small for ragged or hollow shapes.
    pub fn compactness(&self) -> f32 {
        if self.perimeter == 0 {
            return 0.0;
        }
        let p = self.perimeter as f64;
        (4.0 * PI * self.area as f64 / (p * p)) as f32
    }
}

/// Label the 8-connected foreground regions of `mask` and collect per-region
/// statistics, sampling intensity from `intensity` (same dimensions).
///
/// Returns component statistics sorted by area descending (largest first).
pub fn label_components(mask: &GrayImage, intensity: &GrayImage) -> Vec<ComponentStats> {
    let (w, h) = mask.dimensions();
    if w == 0 || h == 0 {
        return Vec::new();
    }
    debug_assert_eq!(mask.dimensions(), intensity.dimensions());

    let labels = connected_components(mask, Connectivity::Eight, Luma([0u8]));
    let label_at = |col: i64, row: i64| -> u32 {
        if col < 0 || row < 0 || col >= w as i64 || row >= h as i64 {
            0
        } else {
            labels.get_pixel(col as u32, row as u32).0[0]
        }
    };

    let mut stats_map = HashMap::<u32, ComponentStats>::new();

    for row in 0..h {
        for col in 0..w {
            let lbl = labels.get_pixel(col, row).0[0];
            if lbl == 0 {
                continue;
            }
            let (r, c) = (row as usize, col as usize);

            let entry = stats_map.entry(lbl).or_insert(ComponentStats {
                label: lbl,
                area: 0,
                bbox: (r, r, c, c),
                intensity_sum: 0,
                perimeter: 0,
            });

            entry.area += 1;
            entry.intensity_sum += intensity.get_pixel(col, row).0[0] as u64;
            entry.bbox.0 = entry.bbox.0.min(r);
            entry.bbox.1 = entry.bbox.1.max(r);
            entry.bbox.2 = entry.bbox.2.min(c);
            entry.bbox.3 = entry.bbox.3.max(c);

            let (ci, ri) = (col as i64, row as i64);
            let on_boundary = [(ci - 1, ri), (ci + 1, ri), (ci, ri - 1), (ci, ri + 1)]
                .iter()
                .any(|&(nc, nr)| label_at(nc, nr) != lbl);
            if on_boundary {
                entry.perimeter += 1;
            }
        }
    }

    let mut components: Vec<ComponentStats> = stats_map.into_values().collect();
    components.sort_unstable_by(|a, b| b.area.cmp(&a.area).then(a.label.cmp(&b.label)));
    components
}
