use image::GrayImage;
use imageproc::contrast::equalize_histogram;
use ndarray::Array2;

use crate::consts::{EPSILON, HISTOGRAM_BINS};

/// Linear histogram stretch: maps [black_point, white_point] → [0.0, 1.0].
pub fn histogram_stretch(data: &Array2<f32>, black_point: f32, white_point: f32) -> Array2<f32> {
    let range = white_point - black_point;
    let range = if range.abs() < EPSILON { 1.0 } else { range };

    data.mapv(|v| ((v - black_point) / range).clamp(0.0, 1.0))
}

/// Automatic histogram stretch using percentile-based black/white points.
///
/// `low_percentile` and `high_percentile` are in [0.0, 1.0].
pub fn percentile_stretch(data: &Array2<f32>, low_percentile: f32, high_percentile: f32) -> Array2<f32> {
    if data.is_empty() {
        return data.clone();
    }
    let mut sorted: Vec<f32> = data.iter().copied().collect();
    sorted.sort_unstable_by(f32::total_cmp);

    let n = sorted.len();
    let lo_idx = ((n as f32 * low_percentile.clamp(0.0, 1.0)) as usize).min(n - 1);
    let hi_idx = ((n as f32 * high_percentile.clamp(0.0, 1.0)) as usize).min(n - 1);

    histogram_stretch(data, sorted[lo_idx], sorted[hi_idx])
}

/// Min/max normalization: stretch the observed range onto [0.0, 1.0].
///
/// A flat array is returned unchanged rather than blown up to a single level.
pub fn normalize(data: &Array2<f32>) -> Array2<f32> {
    let (min, max) = data
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() || (max - min).abs() < EPSILON {
        return data.clone();
    }
    histogram_stretch(data, min, max)
}

/// Global histogram equalization on an 8-bit image.
pub fn equalize(img: &GrayImage) -> GrayImage {
    equalize_histogram(img)
}

/// Median 8-bit level of an image, read off its histogram.
pub fn median_level(img: &GrayImage) -> u8 {
    let mut histogram = [0u64; HISTOGRAM_BINS];
    for p in img.pixels() {
        histogram[p.0[0] as usize] += 1;
    }

    let total: u64 = histogram.iter().sum();
    if total == 0 {
        return 0;
    }

    let half = total.div_ceil(2);
    let mut cumulative = 0u64;
    for (level, &count) in histogram.iter().enumerate() {
        cumulative += count;
        if cumulative >= half {
            return level as u8;
        }
    }
    u8::MAX
}
