pub mod annotate;
pub mod image_io;

pub use annotate::annotate;
pub use image_io::{list_images, load_image};
