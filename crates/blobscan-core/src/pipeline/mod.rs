pub mod config;
mod orchestrator;
mod types;

pub use orchestrator::{analyze_frame, process_image, run_batch, run_batch_reported};
pub use types::{BatchReport, FrameAnalysis, ImageFailure, PipelineStage, ProgressReporter};
