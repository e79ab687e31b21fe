use std::collections::HashMap;

use image::GrayImage;
use ndarray::Array2;
use tracing::debug;

use crate::filters::denoise::denoise;
use crate::filters::histogram::{equalize, median_level, normalize, percentile_stretch};
use crate::filters::levels::apply_gain;
use crate::frame::array_to_gray8;
use crate::scene::TunedParameters;
use crate::tiling::Tile;

use super::bbox::{BoundingBox, Detection};
use super::components::label_components;
use super::config::{ContrastMethod, DetectionConfig, PreprocessConfig};
use super::morphology::{clean, fill_holes};
use super::rules::{ComponentFilter, Rejection};
use super::threshold::adaptive_threshold;

/// Normalize, enhance contrast, apply gain and denoise a tile, producing the
/// 8-bit image that thresholding and intensity checks run on.
pub fn preprocess(data: &Array2<f32>, config: &PreprocessConfig) -> GrayImage {
    let normalized = normalize(data);

    let enhanced = match &config.contrast {
        ContrastMethod::None => array_to_gray8(&normalized),
        ContrastMethod::Stretch {
            low_percentile,
            high_percentile,
        } => array_to_gray8(&percentile_stretch(
            &normalized,
            *low_percentile,
            *high_percentile,
        )),
        ContrastMethod::Equalize => equalize(&array_to_gray8(&normalized)),
    };

    let gained = apply_gain(&enhanced, config.brightness_gain);
    denoise(&gained, config.denoise_strength)
}

/// Adaptive threshold, open/close cleanup, then hole filling.
pub fn binarize(enhanced: &GrayImage, config: &DetectionConfig) -> GrayImage {
    let mask = adaptive_threshold(enhanced, config.block_radius, config.threshold_offset);
    fill_holes(&clean(&mask, config.morph_radius))
}

/// Detect blobs in one tile.
///
/// Boxes are returned in full-image coordinates: the tile-local component
/// box shifted by the tile origin.
pub fn detect_in_tile(
    tile: &Tile,
    params: &TunedParameters,
    preprocess_config: &PreprocessConfig,
    config: &DetectionConfig,
) -> Vec<Detection> {
    if tile.pixel_count() == 0 {
        return Vec::new();
    }

    let enhanced = preprocess(&tile.data, preprocess_config);
    let mask = binarize(&enhanced, config);
    let background = median_level(&enhanced);
    let filter = ComponentFilter::for_tile(params, config, tile.pixel_count(), background);

    let components = label_components(&mask, &enhanced);
    let mut rejected = HashMap::<Rejection, usize>::new();
    let mut detections = Vec::new();

    for c in &components {
        if let Some(reason) = filter.check(c) {
            *rejected.entry(reason).or_default() += 1;
            continue;
        }
        detections.push(Detection {
            bbox: BoundingBox::from_row_col(c.bbox).offset(tile.x, tile.y),
            area: c.area,
            mean_intensity: c.mean_intensity() / 255.0,
            aspect_ratio: c.aspect_ratio(),
            compactness: c.compactness(),
        });
    }

    debug!(
        tile_x = tile.x,
        tile_y = tile.y,
        scene = %params.scene,
        dark_ratio = params.dark_ratio,
        background,
        components = components.len(),
        accepted = detections.len(),
        ?rejected,
        "Tile processed"
    );

    detections
}

