use image::{GrayImage, Luma};
use imageproc::filter::box_filter;

/// Foreground level in binary masks.
pub const FOREGROUND: u8 = 255;

/// Adaptive mean thresholding.
///
/// A pixel is foreground when it exceeds the mean of its
/// `(2 * block_radius + 1)^2` neighborhood by more than `offset` levels.
pub fn adaptive_threshold(img: &GrayImage, block_radius: u32, offset: i16) -> GrayImage {
    let local_mean = box_filter(img, block_radius, block_radius);
    let mut mask = GrayImage::new(img.width(), img.height());

    for (x, y, p) in mask.enumerate_pixels_mut() {
        let v = i32::from(img.get_pixel(x, y).0[0]);
        let mean = i32::from(local_mean.get_pixel(x, y).0[0]);
        *p = if v > mean + i32::from(offset) {
            Luma([FOREGROUND])
        } else {
            Luma([0])
        };
    }

    mask
}

/// Number of foreground pixels in a mask.
pub fn foreground_count(mask: &GrayImage) -> usize {
    mask.pixels().filter(|p| p.0[0] != 0).count()
}
