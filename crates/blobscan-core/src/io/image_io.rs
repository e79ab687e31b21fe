use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbImage};
use ndarray::Array2;

use crate::consts::SUPPORTED_EXTENSIONS;
use crate::error::{BlobscanError, Result};
use crate::frame::Frame;

/// Load an image file as a grayscale Frame.
///
/// Color inputs are reduced to luminance. Decode failures are reported as
/// [`BlobscanError::UnreadableImage`] carrying the offending path.
pub fn load_image(path: &Path) -> Result<Frame> {
    let img = image::open(path).map_err(|source| BlobscanError::UnreadableImage {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(frame_from_dynamic(&img))
}

/// Convert a decoded image into a grayscale Frame.
pub fn frame_from_dynamic(img: &DynamicImage) -> Frame {
    let bit_depth = match img {
        DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_)
        | DynamicImage::ImageRgb16(_)
        | DynamicImage::ImageRgba16(_) => 16,
        _ => 8,
    };

    let gray = img.to_luma16();
    let (w, h) = gray.dimensions();
    let mut data = Array2::<f32>::zeros((h as usize, w as usize));

    for (col, row, pixel) in gray.enumerate_pixels() {
        data[[row as usize, col as usize]] = pixel.0[0] as f32 / 65535.0;
    }

    Frame::new(data, bit_depth)
}

/// Save an RGB image as 8-bit PNG.
pub fn save_rgb_png(img: &RgbImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Returns true if the path has one of the supported image extensions.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

/// List supported image files directly inside `dir`, sorted by path.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_supported_image(&path) {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}
