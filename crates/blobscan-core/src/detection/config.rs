use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BRIGHTNESS_GAIN, DEFAULT_DENOISE_STRENGTH, DEFAULT_MAX_AREA_FRACTION,
    DEFAULT_MAX_ASPECT_RATIO, DEFAULT_MIN_COMPACTNESS, DEFAULT_MORPH_RADIUS,
    DEFAULT_THRESHOLD_BLOCK_RADIUS, DEFAULT_THRESHOLD_OFFSET,
};

/// Contrast enhancement applied after min/max normalization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ContrastMethod {
    /// No enhancement.
    None,
    /// Percentile stretch: [low, high] percentiles are mapped onto [0, 1].
    Stretch {
        low_percentile: f32,
        high_percentile: f32,
    },
    /// Global histogram equalization.
    Equalize,
}

impl Default for ContrastMethod {
    fn default() -> Self {
        Self::Stretch {
            low_percentile: 0.001,
            high_percentile: 0.999,
        }
    }
}

impl fmt::Display for ContrastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Stretch {
                low_percentile,
                high_percentile,
            } => write!(
                f,
                "Stretch ({:.1}%-{:.1}%)",
                low_percentile * 100.0,
                high_percentile * 100.0
            ),
            Self::Equalize => write!(f, "Equalize"),
        }
    }
}

/// Tile preprocessing: normalize, enhance contrast, apply gain, denoise.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PreprocessConfig {
    #[serde(default)]
    pub contrast: ContrastMethod,
    /// Multiplicative brightness gain on 8-bit levels.
    #[serde(default = "default_brightness_gain")]
    pub brightness_gain: f32,
    /// Gaussian sigma for denoising; 0 disables.
    #[serde(default = "default_denoise_strength")]
    pub denoise_strength: f32,
}

fn default_brightness_gain() -> f32 {
    DEFAULT_BRIGHTNESS_GAIN
}
fn default_denoise_strength() -> f32 {
    DEFAULT_DENOISE_STRENGTH
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            contrast: ContrastMethod::default(),
            brightness_gain: DEFAULT_BRIGHTNESS_GAIN,
            denoise_strength: DEFAULT_DENOISE_STRENGTH,
        }
    }
}

/// Binarization, cleanup and shape-filter settings shared by every tile.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Local-mean window radius for adaptive thresholding.
    #[serde(default = "default_block_radius")]
    pub block_radius: u32,
    /// Levels above the local mean a pixel needs to be foreground.
    #[serde(default = "default_threshold_offset")]
    pub threshold_offset: i16,
    /// Structuring element radius for open/close; 0 skips morphology.
    #[serde(default = "default_morph_radius")]
    pub morph_radius: u8,
    /// Largest component area as a fraction of the tile area.
    #[serde(default = "default_max_area_fraction")]
    pub max_area_fraction: f32,
    /// Largest accepted long-side / short-side ratio.
    #[serde(default = "default_max_aspect_ratio")]
    pub max_aspect_ratio: f32,
    /// Smallest accepted 4*pi*area / perimeter^2.
    #[serde(default = "default_min_compactness")]
    pub min_compactness: f32,
}

fn default_block_radius() -> u32 {
    DEFAULT_THRESHOLD_BLOCK_RADIUS
}
fn default_threshold_offset() -> i16 {
    DEFAULT_THRESHOLD_OFFSET
}
fn default_morph_radius() -> u8 {
    DEFAULT_MORPH_RADIUS
}
fn default_max_area_fraction() -> f32 {
    DEFAULT_MAX_AREA_FRACTION
}
fn default_max_aspect_ratio() -> f32 {
    DEFAULT_MAX_ASPECT_RATIO
}
fn default_min_compactness() -> f32 {
    DEFAULT_MIN_COMPACTNESS
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            block_radius: DEFAULT_THRESHOLD_BLOCK_RADIUS,
            threshold_offset: DEFAULT_THRESHOLD_OFFSET,
            morph_radius: DEFAULT_MORPH_RADIUS,
            max_area_fraction: DEFAULT_MAX_AREA_FRACTION,
            max_aspect_ratio: DEFAULT_MAX_ASPECT_RATIO,
            min_compactness: DEFAULT_MIN_COMPACTNESS,
        }
    }
}
