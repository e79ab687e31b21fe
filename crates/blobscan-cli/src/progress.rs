use std::cell::RefCell;
use std::path::Path;

use anyhow::Result;
use blobscan_core::pipeline::{PipelineStage, ProgressReporter};
use indicatif::{ProgressBar, ProgressStyle};

/// Drives a per-image progress bar from batch events.
pub struct BarReporter {
    pb: ProgressBar,
    current: RefCell<String>,
}

impl BarReporter {
    pub fn new() -> Result<Self> {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg:40} [{bar:40}] {pos}/{len}")?
                .progress_chars("=> "),
        );
        Ok(Self {
            pb,
            current: RefCell::new(String::new()),
        })
    }
}

impl ProgressReporter for BarReporter {
    fn begin_batch(&self, total_images: usize) {
        self.pb.set_length(total_images as u64);
        self.pb.set_position(0);
    }

    fn begin_image(&self, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.pb.set_message(name.clone());
        *self.current.borrow_mut() = name;
    }

    fn stage(&self, stage: PipelineStage) {
        self.pb
            .set_message(format!("{}: {stage}", self.current.borrow()));
    }

    fn advance(&self, images_done: usize) {
        self.pb.set_position(images_done as u64);
    }

    fn finish_batch(&self) {
        self.pb.finish_with_message("Done");
    }
}
