use serde::{Deserialize, Serialize};

/// Axis-aligned box with inclusive pixel corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: usize,
    pub y1: usize,
    pub x2: usize,
    pub y2: usize,
}

impl BoundingBox {
    pub fn new(x1: usize, y1: usize, x2: usize, y2: usize) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    /// Build from a component bbox tuple `(min_row, max_row, min_col, max_col)`.
    pub fn from_row_col(bbox: (usize, usize, usize, usize)) -> Self {
        let (min_row, max_row, min_col, max_col) = bbox;
        Self::new(min_col, min_row, max_col, max_row)
    }

    pub fn width(&self) -> usize {
        self.x2 - self.x1 + 1
    }

    pub fn height(&self) -> usize {
        self.y2 - self.y1 + 1
    }

    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    /// Translate by a tile origin.
    pub fn offset(&self, dx: usize, dy: usize) -> Self {
        Self {
            x1: self.x1 + dx,
            y1: self.y1 + dy,
            x2: self.x2 + dx,
            y2: self.y2 + dy,
        }
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }
}

/// A detected object: its box in full-image coordinates plus the shape and
/// intensity measurements that let it through the filter.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub bbox: BoundingBox,
    /// Component pixel count.
    pub area: usize,
    /// Mean preprocessed intensity in [0, 1].
    pub mean_intensity: f32,
    pub aspect_ratio: f32,
    pub compactness: f32,
}
