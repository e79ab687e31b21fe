use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BOX_COLOR, DEFAULT_DARK_LEVEL, DEFAULT_MAX_TILE_SIZE, MAX_THRESHOLD_OFFSET,
};
use crate::detection::{DetectionConfig, PreprocessConfig};
use crate::error::{BlobscanError, Result};
use crate::scene::{ParameterTable, SceneThresholds};

/// Full configuration of a detection batch. Serializes to/from TOML; every
/// field falls back to its default when omitted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory scanned for input images.
    #[serde(default = "default_input")]
    pub input: PathBuf,
    /// Directory receiving annotated images and CSV tables.
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default = "default_max_tile_size")]
    pub max_tile_size: usize,
    /// Intensity in [0, 1] below which a pixel counts as dark.
    #[serde(default = "default_dark_level")]
    pub dark_level: f32,
    /// RGB outline color for annotated output.
    #[serde(default = "default_box_color")]
    pub box_color: [u8; 3],
    #[serde(default)]
    pub scene: SceneThresholds,
    #[serde(default)]
    pub parameters: ParameterTable,
    #[serde(default)]
    pub preprocess: PreprocessConfig,
    #[serde(default)]
    pub detection: DetectionConfig,
}

fn default_input() -> PathBuf {
    PathBuf::from("input")
}
fn default_output() -> PathBuf {
    PathBuf::from("output")
}
fn default_max_tile_size() -> usize {
    DEFAULT_MAX_TILE_SIZE
}
fn default_dark_level() -> f32 {
    DEFAULT_DARK_LEVEL
}
fn default_box_color() -> [u8; 3] {
    DEFAULT_BOX_COLOR
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
            max_tile_size: DEFAULT_MAX_TILE_SIZE,
            dark_level: DEFAULT_DARK_LEVEL,
            box_color: DEFAULT_BOX_COLOR,
            scene: SceneThresholds::default(),
            parameters: ParameterTable::default(),
            preprocess: PreprocessConfig::default(),
            detection: DetectionConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Reject settings that would make every tile degenerate.
    pub fn validate(&self) -> Result<()> {
        if self.max_tile_size == 0 {
            return Err(BlobscanError::InvalidConfig(
                "max_tile_size must be at least 1".into(),
            ));
        }
        if !(self.dark_level > 0.0 && self.dark_level <= 1.0) {
            return Err(BlobscanError::InvalidConfig(format!(
                "dark_level must lie in (0, 1], got {}",
                self.dark_level
            )));
        }
        if !(self.preprocess.brightness_gain.is_finite() && self.preprocess.brightness_gain > 0.0) {
            return Err(BlobscanError::InvalidConfig(format!(
                "brightness_gain must be positive, got {}",
                self.preprocess.brightness_gain
            )));
        }
        if self.detection.max_aspect_ratio < 1.0 {
            return Err(BlobscanError::InvalidConfig(format!(
                "max_aspect_ratio must be at least 1, got {}",
                self.detection.max_aspect_ratio
            )));
        }
        let offset = self.detection.threshold_offset;
        if !(-MAX_THRESHOLD_OFFSET..=MAX_THRESHOLD_OFFSET).contains(&offset) {
            return Err(BlobscanError::InvalidConfig(format!(
                "threshold_offset must lie in [-{MAX_THRESHOLD_OFFSET}, {MAX_THRESHOLD_OFFSET}], got {offset}"
            )));
        }
        self.scene.validate()
    }
}
