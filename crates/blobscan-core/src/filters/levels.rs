use image::{GrayImage, Luma};

/// Multiply every 8-bit level by `gain`, saturating at 255.
///
/// A gain of 1.0 is the identity.
pub fn apply_gain(img: &GrayImage, gain: f32) -> GrayImage {
    let gain = gain.max(0.0);
    let mut out = img.clone();
    for p in out.pixels_mut() {
        let v = (p.0[0] as f32 * gain).round().clamp(0.0, 255.0);
        *p = Luma([v as u8]);
    }
    out
}
