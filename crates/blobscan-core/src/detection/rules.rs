use std::fmt;

use crate::scene::TunedParameters;

use super::components::ComponentStats;
use super::config::DetectionConfig;

/// Why a component was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rejection {
    TooSmall,
    TooLarge,
    TooDim,
    Elongated,
    Ragged,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooSmall => write!(f, "too small"),
            Self::TooLarge => write!(f, "too large"),
            Self::TooDim => write!(f, "too dim"),
            Self::Elongated => write!(f, "elongated"),
            Self::Ragged => write!(f, "ragged"),
        }
    }
}

/// Scalar acceptance rules for one tile's components.
#[derive(Clone, Debug)]
pub struct ComponentFilter {
    pub min_area: usize,
    pub max_area: usize,
    pub intensity_ratio: f32,
    /// Background median of the preprocessed tile, in 8-bit levels.
    pub background_median: f32,
    pub max_aspect_ratio: f32,
    pub min_compactness: f32,
}

impl ComponentFilter {
    pub fn for_tile(
        params: &TunedParameters,
        config: &DetectionConfig,
        tile_pixels: usize,
        background_median: u8,
    ) -> Self {
        let max_area = ((tile_pixels as f64 * config.max_area_fraction as f64).floor() as usize)
            .max(params.min_area);
        Self {
            min_area: params.min_area,
            max_area,
            intensity_ratio: params.intensity_ratio,
            background_median: background_median as f32,
            max_aspect_ratio: config.max_aspect_ratio,
            min_compactness: config.min_compactness,
        }
    }

    /// First failed rule, or `None` when the component is accepted.
    pub fn check(&self, c: &ComponentStats) -> Option<Rejection> {
        if c.area < self.min_area {
            return Some(Rejection::TooSmall);
        }
        if c.area > self.max_area {
            return Some(Rejection::TooLarge);
        }
        if c.mean_intensity() < self.intensity_ratio * self.background_median {
            return Some(Rejection::TooDim);
        }
        if c.aspect_ratio() > self.max_aspect_ratio {
            return Some(Rejection::Elongated);
        }
        if c.compactness() < self.min_compactness {
            return Some(Rejection::Ragged);
        }
        None
    }

    pub fn accepts(&self, c: &ComponentStats) -> bool {
        self.check(c).is_none()
    }
}
