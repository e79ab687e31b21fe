use std::path::{Path, PathBuf};

use crate::detection::Detection;
use crate::report::SummaryRow;
use crate::scene::SceneClass;

/// Per-image processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Loading,
    Detecting,
    Writing,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "Loading image"),
            Self::Detecting => write!(f, "Detecting objects"),
            Self::Writing => write!(f, "Writing output"),
        }
    }
}

/// Detection result for one frame.
#[derive(Clone, Debug)]
pub struct FrameAnalysis {
    pub width: usize,
    pub height: usize,
    pub tile_count: usize,
    /// Pixel-weighted dark ratio over all tiles, in [0, 1].
    pub dark_ratio: f64,
    /// Scene class of the whole image.
    pub scene: SceneClass,
    /// Detections in full-image coordinates, tile by tile in row-major order.
    pub detections: Vec<Detection>,
}

/// An image the batch skipped.
#[derive(Clone, Debug)]
pub struct ImageFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of a whole batch.
#[derive(Clone, Debug, Default)]
pub struct BatchReport {
    /// Summary rows for every image that completed.
    pub processed: Vec<SummaryRow>,
    pub failures: Vec<ImageFailure>,
    pub summary_path: PathBuf,
}

impl BatchReport {
    pub fn total_objects(&self) -> usize {
        self.processed.iter().map(|r| r.object_count).sum()
    }
}

/// Progress reporting for a batch run.
///
/// Implementors can use this to drive progress bars or logging. All methods
/// have default no-op implementations.
pub trait ProgressReporter {
    /// The batch is starting with `total_images` inputs.
    fn begin_batch(&self, _total_images: usize) {}

    /// Work on one image has started.
    fn begin_image(&self, _path: &Path) {}

    /// The current image moved to a new stage.
    fn stage(&self, _stage: PipelineStage) {}

    /// `images_done` images (succeeded or failed) are finished.
    fn advance(&self, _images_done: usize) {}

    /// The batch is finished.
    fn finish_batch(&self) {}
}

/// No-op progress reporter, used when `run_batch` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
