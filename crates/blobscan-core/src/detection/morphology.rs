use std::collections::HashSet;

use image::{GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::morphology::{close, open};
use imageproc::region_labelling::{connected_components, Connectivity};

use super::threshold::FOREGROUND;

/// Morphological opening followed by closing with a square structuring
/// element of the given radius.
///
/// Opening removes isolated foreground specks; closing then fills pinholes
/// and small gaps inside the surviving blobs. Radius 0 returns the mask as is.
pub fn clean(mask: &GrayImage, radius: u8) -> GrayImage {
    if radius == 0 {
        return mask.clone();
    }
    let opened = open(mask, Norm::LInf, radius);
    close(&opened, Norm::LInf, radius)
}

/// Set every background region that does not reach the mask border to
/// foreground.
///
/// Adaptive thresholding marks only the rim of a blob wider than its
/// neighborhood window, so shape is measured on the filled outline.
pub fn fill_holes(mask: &GrayImage) -> GrayImage {
    let (width, height) = mask.dimensions();
    if width == 0 || height == 0 {
        return mask.clone();
    }

    let inverted = GrayImage::from_fn(width, height, |x, y| {
        if mask.get_pixel(x, y).0[0] == 0 {
            Luma([FOREGROUND])
        } else {
            Luma([0])
        }
    });
    // 4-connected background pairs with 8-connected foreground
    let regions = connected_components(&inverted, Connectivity::Four, Luma([0u8]));

    let mut outside = HashSet::new();
    for x in 0..width {
        outside.insert(regions.get_pixel(x, 0).0[0]);
        outside.insert(regions.get_pixel(x, height - 1).0[0]);
    }
    for y in 0..height {
        outside.insert(regions.get_pixel(0, y).0[0]);
        outside.insert(regions.get_pixel(width - 1, y).0[0]);
    }

    let mut filled = mask.clone();
    for (x, y, p) in filled.enumerate_pixels_mut() {
        let region = regions.get_pixel(x, y).0[0];
        if region != 0 && !outside.contains(&region) {
            *p = Luma([FOREGROUND]);
        }
    }
    filled
}
