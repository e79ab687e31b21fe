use std::fmt;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_AREA_MIN, DEFAULT_DARK_LOW, DEFAULT_DARK_MID, MIXED_TIER, URBAN_TIER,
    WATER_HEAVY_TIER,
};
use crate::error::{BlobscanError, Result};

/// Scene label derived from the fraction of dark pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SceneClass {
    Urban,
    Mixed,
    WaterHeavy,
}

impl fmt::Display for SceneClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Urban => write!(f, "urban"),
            Self::Mixed => write!(f, "mixed"),
            Self::WaterHeavy => write!(f, "water-heavy"),
        }
    }
}

impl std::str::FromStr for SceneClass {
    type Err = BlobscanError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "urban" => Ok(Self::Urban),
            "mixed" => Ok(Self::Mixed),
            "water-heavy" => Ok(Self::WaterHeavy),
            other => Err(BlobscanError::InvalidConfig(format!(
                "unknown scene class '{other}'"
            ))),
        }
    }
}

/// Dark-ratio boundaries between scene classes plus the base component area.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SceneThresholds {
    /// Dark ratio below which a tile is urban.
    #[serde(default = "default_low")]
    pub low: f64,
    /// Dark ratio at or above which a tile is water-heavy.
    #[serde(default = "default_mid")]
    pub mid: f64,
    /// Base minimum component area in pixels, scaled by the tier's area fraction.
    #[serde(default = "default_area_min")]
    pub area_min: usize,
}

fn default_low() -> f64 {
    DEFAULT_DARK_LOW
}
fn default_mid() -> f64 {
    DEFAULT_DARK_MID
}
fn default_area_min() -> usize {
    DEFAULT_AREA_MIN
}

impl Default for SceneThresholds {
    fn default() -> Self {
        Self {
            low: DEFAULT_DARK_LOW,
            mid: DEFAULT_DARK_MID,
            area_min: DEFAULT_AREA_MIN,
        }
    }
}

impl SceneThresholds {
    pub fn validate(&self) -> Result<()> {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !in_unit(self.low) || !in_unit(self.mid) {
            return Err(BlobscanError::InvalidConfig(format!(
                "darkness thresholds must lie in [0, 1] (low={}, mid={})",
                self.low, self.mid
            )));
        }
        if self.low > self.mid {
            return Err(BlobscanError::InvalidConfig(format!(
                "low darkness threshold {} exceeds mid threshold {}",
                self.low, self.mid
            )));
        }
        Ok(())
    }

    /// Map a dark ratio onto a scene class by range comparison.
    pub fn classify(&self, dark_ratio: f64) -> SceneClass {
        if dark_ratio < self.low {
            SceneClass::Urban
        } else if dark_ratio < self.mid {
            SceneClass::Mixed
        } else {
            SceneClass::WaterHeavy
        }
    }
}

/// One row of the parameter lookup table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterTier {
    /// Multiplier applied to `SceneThresholds::area_min`.
    pub area_fraction: f32,
    /// Required ratio of component mean intensity to background median.
    pub intensity_ratio: f32,
}

impl ParameterTier {
    const fn from_pair(pair: (f32, f32)) -> Self {
        Self {
            area_fraction: pair.0,
            intensity_ratio: pair.1,
        }
    }
}

/// Fixed parameter pairs keyed by scene class.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParameterTable {
    pub urban: ParameterTier,
    pub mixed: ParameterTier,
    pub water_heavy: ParameterTier,
}

impl Default for ParameterTable {
    fn default() -> Self {
        Self {
            urban: ParameterTier::from_pair(URBAN_TIER),
            mixed: ParameterTier::from_pair(MIXED_TIER),
            water_heavy: ParameterTier::from_pair(WATER_HEAVY_TIER),
        }
    }
}

impl ParameterTable {
    pub fn tier(&self, scene: SceneClass) -> ParameterTier {
        match scene {
            SceneClass::Urban => self.urban,
            SceneClass::Mixed => self.mixed,
            SceneClass::WaterHeavy => self.water_heavy,
        }
    }
}

/// Parameters selected for one tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TunedParameters {
    pub dark_ratio: f64,
    pub scene: SceneClass,
    /// Minimum component area in pixels (at least 1).
    pub min_area: usize,
    pub intensity_ratio: f32,
}

/// Fraction of samples strictly below `dark_level`. Returns 0 for an empty array.
pub fn dark_ratio(data: &Array2<f32>, dark_level: f32) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let dark = data.iter().filter(|&&v| v < dark_level).count();
    dark as f64 / data.len() as f64
}

/// Classify a tile's darkness and look up its detection parameters.
pub fn tune(
    data: &Array2<f32>,
    thresholds: &SceneThresholds,
    table: &ParameterTable,
    dark_level: f32,
) -> TunedParameters {
    let ratio = dark_ratio(data, dark_level);
    let scene = thresholds.classify(ratio);
    let tier = table.tier(scene);
    let min_area = ((thresholds.area_min as f32 * tier.area_fraction).round() as usize).max(1);

    TunedParameters {
        dark_ratio: ratio,
        scene,
        min_area,
        intensity_ratio: tier.intensity_ratio,
    }
}
