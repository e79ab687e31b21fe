use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlobscanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unreadable image {path}: {source}")]
    UnreadableImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No input: {0}")]
    EmptyInput(String),

    #[error("Clustering error: {0}")]
    Clustering(String),
}

pub type Result<T> = std::result::Result<T, BlobscanError>;
