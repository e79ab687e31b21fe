use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

use crate::detection::Detection;
use crate::frame::Frame;

/// Render a grayscale frame as RGB and outline every detection.
pub fn annotate(frame: &Frame, detections: &[Detection], color: [u8; 3]) -> RgbImage {
    let (h, w) = frame.data.dim();
    let mut canvas = RgbImage::from_fn(w as u32, h as u32, |x, y| {
        let v = (frame.data[[y as usize, x as usize]].clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgb([v, v, v])
    });

    for det in detections {
        let b = det.bbox;
        let rect = Rect::at(b.x1 as i32, b.y1 as i32).of_size(b.width() as u32, b.height() as u32);
        draw_hollow_rect_mut(&mut canvas, rect, Rgb(color));
    }

    canvas
}
