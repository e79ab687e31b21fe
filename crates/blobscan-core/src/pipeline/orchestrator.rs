use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::consts::SUMMARY_FILE_NAME;
use crate::detection::detect_in_tile;
use crate::error::{BlobscanError, Result};
use crate::frame::Frame;
use crate::io::annotate::annotate;
use crate::io::image_io::{list_images, load_image, save_rgb_png};
use crate::report::{write_detections_csv, SummaryRow, SummaryWriter};
use crate::scene::tune;
use crate::tiling::split_into_tiles;

use super::config::PipelineConfig;
use super::types::{
    BatchReport, FrameAnalysis, ImageFailure, NoOpReporter, PipelineStage, ProgressReporter,
};

/// Tile a frame, tune parameters per tile and collect detections in
/// full-image coordinates.
pub fn analyze_frame(frame: &Frame, config: &PipelineConfig) -> Result<FrameAnalysis> {
    let tiles = split_into_tiles(frame, config.max_tile_size)?;

    let mut detections = Vec::new();
    let mut dark_weighted = 0.0_f64;

    for tile in &tiles {
        let params = tune(
            &tile.data,
            &config.scene,
            &config.parameters,
            config.dark_level,
        );
        dark_weighted += params.dark_ratio * tile.pixel_count() as f64;
        detections.extend(detect_in_tile(
            tile,
            &params,
            &config.preprocess,
            &config.detection,
        ));
    }

    let dark_ratio = (dark_weighted / frame.pixel_count() as f64).clamp(0.0, 1.0);
    let scene = config.scene.classify(dark_ratio);

    debug!(
        tiles = tiles.len(),
        dark_ratio,
        scene = %scene,
        objects = detections.len(),
        "Frame analyzed"
    );

    Ok(FrameAnalysis {
        width: frame.width(),
        height: frame.height(),
        tile_count: tiles.len(),
        dark_ratio,
        scene,
        detections,
    })
}

/// Load one image and analyze it.
pub fn process_image(path: &Path, config: &PipelineConfig) -> Result<(Frame, FrameAnalysis)> {
    let frame = load_image(path)?;
    let analysis = analyze_frame(&frame, config)?;
    Ok((frame, analysis))
}

/// Run a batch with no progress reporting.
pub fn run_batch(config: &PipelineConfig) -> Result<BatchReport> {
    run_batch_reported(config, &NoOpReporter)
}

/// Process every supported image in the input directory, one at a time.
///
/// A failing image is logged and recorded in [`BatchReport::failures`]; the
/// batch carries on with the next one. Listing the input directory, creating
/// the output directory and appending to the summary table are fatal.
pub fn run_batch_reported(
    config: &PipelineConfig,
    reporter: &dyn ProgressReporter,
) -> Result<BatchReport> {
    config.validate()?;

    let images = list_images(&config.input)?;
    std::fs::create_dir_all(&config.output)?;
    let summary_path = config.output.join(SUMMARY_FILE_NAME);

    let mut report = BatchReport {
        summary_path: summary_path.clone(),
        ..Default::default()
    };

    if images.is_empty() {
        warn!(input = %config.input.display(), "No supported images found");
        return Ok(report);
    }

    info!(
        images = images.len(),
        input = %config.input.display(),
        output = %config.output.display(),
        "Starting batch"
    );

    let mut summary = SummaryWriter::open(&summary_path)?;
    reporter.begin_batch(images.len());

    for (i, path) in images.iter().enumerate() {
        reporter.begin_image(path);
        match process_and_write(path, config, reporter) {
            Ok(row) => {
                info!(
                    image = %row.filename,
                    objects = row.object_count,
                    scene = %row.scene_class,
                    dark_percentage = row.dark_percentage,
                    "Image processed"
                );
                summary.append(&row)?;
                report.processed.push(row);
            }
            Err(e) => {
                warn!(image = %path.display(), error = %e, "Skipping image");
                report.failures.push(ImageFailure {
                    path: path.clone(),
                    error: e.to_string(),
                });
            }
        }
        reporter.advance(i + 1);
    }

    reporter.finish_batch();
    info!(
        processed = report.processed.len(),
        failed = report.failures.len(),
        objects = report.total_objects(),
        "Batch complete"
    );

    Ok(report)
}

/// Analyze one image and write its annotated copy and bounding-box table.
fn process_and_write(
    path: &Path,
    config: &PipelineConfig,
    reporter: &dyn ProgressReporter,
) -> Result<SummaryRow> {
    reporter.stage(PipelineStage::Loading);
    let frame = load_image(path)?;

    reporter.stage(PipelineStage::Detecting);
    let analysis = analyze_frame(&frame, config)?;

    reporter.stage(PipelineStage::Writing);
    let name = file_name(path)?;
    let (annotated_path, boxes_path) = output_paths(&config.output, path)?;

    let canvas = annotate(&frame, &analysis.detections, config.box_color);
    save_rgb_png(&canvas, &annotated_path)?;
    write_detections_csv(&boxes_path, &name, analysis.scene, &analysis.detections)?;

    Ok(SummaryRow {
        filename: name,
        dark_percentage: round2(analysis.dark_ratio * 100.0),
        object_count: analysis.detections.len(),
        scene_class: analysis.scene,
        output_path: annotated_path.display().to_string(),
    })
}

/// `<stem>_detected.png` and `<stem>_boxes.csv` inside the output directory.
pub(crate) fn output_paths(output_dir: &Path, input: &Path) -> Result<(PathBuf, PathBuf)> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| malformed_path(input))?;
    Ok((
        output_dir.join(format!("{stem}_detected.png")),
        output_dir.join(format!("{stem}_boxes.csv")),
    ))
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .ok_or_else(|| malformed_path(path))
}

fn malformed_path(path: &Path) -> BlobscanError {
    BlobscanError::InvalidConfig(format!("malformed image path {}", path.display()))
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
