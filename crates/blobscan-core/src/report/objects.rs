use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::detection::{BoundingBox, Detection};
use crate::error::Result;
use crate::scene::SceneClass;

/// Column names of the bounding-box table, in [`ObjectRecord`] field order.
pub const OBJECT_COLUMNS: [&str; 12] = [
    "image",
    "x1",
    "y1",
    "x2",
    "y2",
    "width",
    "height",
    "area",
    "mean_intensity",
    "aspect_ratio",
    "compactness",
    "scene_class",
];

/// One row of a per-image bounding-box table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub image: String,
    pub x1: usize,
    pub y1: usize,
    pub x2: usize,
    pub y2: usize,
    pub width: usize,
    pub height: usize,
    pub area: usize,
    pub mean_intensity: f32,
    pub aspect_ratio: f32,
    pub compactness: f32,
    pub scene_class: SceneClass,
}

impl ObjectRecord {
    pub fn from_detection(image: &str, scene: SceneClass, det: &Detection) -> Self {
        Self {
            image: image.to_string(),
            x1: det.bbox.x1,
            y1: det.bbox.y1,
            x2: det.bbox.x2,
            y2: det.bbox.y2,
            width: det.bbox.width(),
            height: det.bbox.height(),
            area: det.area,
            mean_intensity: det.mean_intensity,
            aspect_ratio: det.aspect_ratio,
            compactness: det.compactness,
            scene_class: scene,
        }
    }

    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::new(self.x1, self.y1, self.x2, self.y2)
    }
}

/// Write the bounding-box table for one image. The header is always written,
/// even when there are no detections.
pub fn write_detections_csv(
    path: &Path,
    image: &str,
    scene: SceneClass,
    detections: &[Detection],
) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
    wtr.write_record(OBJECT_COLUMNS)?;
    for det in detections {
        wtr.serialize(ObjectRecord::from_detection(image, scene, det))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Parse a bounding-box table written by [`write_detections_csv`].
pub fn read_object_records(path: &Path) -> Result<Vec<ObjectRecord>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in rdr.deserialize() {
        records.push(row?);
    }
    Ok(records)
}
