#[allow(dead_code)]
mod common;

use image::{ImageBuffer, Luma, Rgb, RgbImage};
use ndarray::Array2;

use blobscan_core::detection::{BoundingBox, Detection};
use blobscan_core::error::BlobscanError;
use blobscan_core::frame::Frame;
use blobscan_core::io::image_io::{is_supported_image, list_images, load_image, save_rgb_png};
use blobscan_core::io::annotate;

fn detection(x1: usize, y1: usize, x2: usize, y2: usize) -> Detection {
    Detection {
        bbox: BoundingBox::new(x1, y1, x2, y2),
        area: 1,
        mean_intensity: 1.0,
        aspect_ratio: 1.0,
        compactness: 1.0,
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[test]
fn test_load_8bit_png() {
    let mut data = Array2::<f32>::zeros((4, 4));
    data[[0, 1]] = 0.5;
    data[[1, 0]] = 1.0;
    data[[2, 3]] = 0.25;
    let frame = Frame::new(data, 8);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.png");
    common::write_gray_png(&frame, &path);

    let loaded = load_image(&path).unwrap();
    assert_eq!(loaded.width(), 4);
    assert_eq!(loaded.height(), 4);
    assert_eq!(loaded.original_bit_depth, 8);
    assert!((loaded.data[[0, 0]] - 0.0).abs() < 1e-4);
    assert!((loaded.data[[0, 1]] - 0.5).abs() < 3e-3);
    assert!((loaded.data[[1, 0]] - 1.0).abs() < 1e-4);
    assert!((loaded.data[[2, 3]] - 0.25).abs() < 3e-3);
}

#[test]
fn test_load_16bit_png() {
    let img: ImageBuffer<Luma<u16>, Vec<u16>> =
        ImageBuffer::from_fn(3, 2, |x, y| Luma([(x + 3 * y) as u16 * 10_000]));
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deep.png");
    img.save(&path).unwrap();

    let loaded = load_image(&path).unwrap();
    assert_eq!(loaded.original_bit_depth, 16);
    assert_eq!((loaded.width(), loaded.height()), (3, 2));
    approx::assert_abs_diff_eq!(loaded.data[[1, 2]], 50_000.0 / 65_535.0, epsilon = 1e-6);
}

#[test]
fn test_load_color_image_as_luminance() {
    let img = RgbImage::from_pixel(2, 2, Rgb([200, 200, 200]));
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("color.png");
    img.save(&path).unwrap();

    let loaded = load_image(&path).unwrap();
    assert!((loaded.data[[0, 0]] - 200.0 / 255.0).abs() < 3e-3);
}

#[test]
fn test_load_corrupt_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"not a png").unwrap();

    match load_image(&path) {
        Err(BlobscanError::UnreadableImage { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected UnreadableImage, got {other:?}"),
    }
}

#[test]
fn test_load_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_image(&dir.path().join("missing.png")).is_err());
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[test]
fn test_supported_extensions_case_insensitive() {
    assert!(is_supported_image("a.png".as_ref()));
    assert!(is_supported_image("a.JPG".as_ref()));
    assert!(is_supported_image("dir/a.Jpeg".as_ref()));
    assert!(is_supported_image("a.bmp".as_ref()));
    assert!(!is_supported_image("a.txt".as_ref()));
    assert!(!is_supported_image("png".as_ref()));
}

#[test]
fn test_list_images_filters_and_sorts() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["c.png", "a.JPG", "b.bmp", "notes.txt", "d.csv"] {
        std::fs::write(dir.path().join(name), b"").unwrap();
    }
    std::fs::create_dir(dir.path().join("nested.png")).unwrap();

    let names: Vec<String> = list_images(dir.path())
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.JPG", "b.bmp", "c.png"]);
}

#[test]
fn test_list_images_missing_dir_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        list_images(&dir.path().join("absent")),
        Err(BlobscanError::Io(_))
    ));
}

// ---------------------------------------------------------------------------
// Annotation
// ---------------------------------------------------------------------------

#[test]
fn test_annotate_draws_outline_only() {
    let frame = common::flat_frame(20, 20, 0.5);
    let canvas = annotate(&frame, &[detection(4, 5, 10, 12)], [255, 0, 0]);

    assert_eq!(canvas.dimensions(), (20, 20));
    let red = Rgb([255, 0, 0]);
    assert_eq!(*canvas.get_pixel(4, 5), red);
    assert_eq!(*canvas.get_pixel(10, 12), red);
    assert_eq!(*canvas.get_pixel(7, 5), red);
    assert_eq!(*canvas.get_pixel(4, 9), red);

    // Interior and exterior keep the gray level.
    assert_eq!(*canvas.get_pixel(7, 9), Rgb([128, 128, 128]));
    assert_eq!(*canvas.get_pixel(0, 0), Rgb([128, 128, 128]));
    assert_eq!(*canvas.get_pixel(11, 12), Rgb([128, 128, 128]));
}

#[test]
fn test_annotate_without_detections_is_gray_copy() {
    let frame = common::ramp_frame(6, 6);
    let canvas = annotate(&frame, &[], [0, 255, 0]);
    for (x, y, p) in canvas.enumerate_pixels() {
        let v = (frame.data[[y as usize, x as usize]] * 255.0).round() as u8;
        assert_eq!(*p, Rgb([v, v, v]));
    }
}

#[test]
fn test_save_rgb_png() {
    let frame = common::flat_frame(8, 8, 0.25);
    let canvas = annotate(&frame, &[detection(1, 1, 3, 3)], [0, 0, 255]);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("annotated.png");
    save_rgb_png(&canvas, &path).unwrap();

    let reread = image::open(&path).unwrap().to_rgb8();
    assert_eq!(reread, canvas);
}
