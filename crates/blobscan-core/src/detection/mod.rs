pub mod bbox;
pub mod components;
pub mod config;
pub mod detect;
pub mod morphology;
pub mod rules;
pub mod threshold;

pub use bbox::{BoundingBox, Detection};
pub use config::{ContrastMethod, DetectionConfig, PreprocessConfig};
pub use detect::detect_in_tile;
