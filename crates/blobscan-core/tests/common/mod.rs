use std::path::Path;

use image::{GrayImage, Luma};
use ndarray::Array2;

use blobscan_core::frame::Frame;

/// Uniform frame at `level`.
pub fn flat_frame(h: usize, w: usize, level: f32) -> Frame {
    Frame::new(Array2::from_elem((h, w), level), 8)
}

/// Fill a `w`x`h` rectangle with top-left corner at (x, y).
pub fn paint_rect(frame: &mut Frame, x: usize, y: usize, w: usize, h: usize, level: f32) {
    for row in y..y + h {
        for col in x..x + w {
            frame.data[[row, col]] = level;
        }
    }
}

/// Dark 96x96 scene with two bright squares:
/// 12x12 at (18, 18) and 10x10 at (62, 64).
pub fn two_blob_scene() -> Frame {
    let mut frame = flat_frame(96, 96, 0.1);
    paint_rect(&mut frame, 18, 18, 12, 12, 0.9);
    paint_rect(&mut frame, 62, 64, 10, 10, 0.8);
    frame
}

/// Ramp frame: values increase row-major from 0 towards 1.
pub fn ramp_frame(h: usize, w: usize) -> Frame {
    let data = Array2::from_shape_fn((h, w), |(row, col)| (row * w + col) as f32 / (h * w) as f32);
    Frame::new(data, 8)
}

/// Write a frame as an 8-bit grayscale PNG.
pub fn write_gray_png(frame: &Frame, path: &Path) {
    let img = GrayImage::from_fn(frame.width() as u32, frame.height() as u32, |x, y| {
        let v = frame.data[[y as usize, x as usize]].clamp(0.0, 1.0);
        Luma([(v * 255.0).round() as u8])
    });
    img.save(path).expect("write test png");
}
