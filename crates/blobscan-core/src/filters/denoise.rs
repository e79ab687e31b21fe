use image::GrayImage;
use imageproc::filter::gaussian_blur_f32;

/// Suppress speckle with a Gaussian blur of sigma `strength`.
///
/// Non-positive (or non-finite) strength disables the step.
pub fn denoise(img: &GrayImage, strength: f32) -> GrayImage {
    if !(strength.is_finite() && strength > 0.0) {
        return img.clone();
    }
    gaussian_blur_f32(img, strength)
}
