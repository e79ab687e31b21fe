use ndarray::{s, Array2};

use crate::error::{BlobscanError, Result};
use crate::frame::Frame;

/// A rectangular sub-region of a frame plus its top-left origin in
/// full-image coordinates.
#[derive(Clone, Debug)]
pub struct Tile {
    /// Column of the tile's top-left pixel in the full image.
    pub x: usize,
    /// Row of the tile's top-left pixel in the full image.
    pub y: usize,
    /// Owned copy of the tile pixels, shape = (height, width).
    pub data: Array2<f32>,
}

impl Tile {
    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }
}

/// Split a frame into a row-major grid of tiles no larger than
/// `max_tile_size` on either side. Edge tiles take whatever remains.
///
/// A frame that already fits yields a single tile at (0, 0).
pub fn split_into_tiles(frame: &Frame, max_tile_size: usize) -> Result<Vec<Tile>> {
    if max_tile_size == 0 {
        return Err(BlobscanError::InvalidConfig(
            "max tile size must be at least 1".into(),
        ));
    }

    let (h, w) = frame.data.dim();
    if h == 0 || w == 0 {
        return Err(BlobscanError::InvalidDimensions {
            width: w,
            height: h,
        });
    }

    let mut tiles = Vec::with_capacity(h.div_ceil(max_tile_size) * w.div_ceil(max_tile_size));
    for y in (0..h).step_by(max_tile_size) {
        let y_end = (y + max_tile_size).min(h);
        for x in (0..w).step_by(max_tile_size) {
            let x_end = (x + max_tile_size).min(w);
            tiles.push(Tile {
                x,
                y,
                data: frame.data.slice(s![y..y_end, x..x_end]).to_owned(),
            });
        }
    }

    Ok(tiles)
}

/// Paste tiles back into a (height, width) array. Inverse of
/// [`split_into_tiles`]; pixels no tile covers stay zero.
pub fn reassemble(tiles: &[Tile], height: usize, width: usize) -> Array2<f32> {
    let mut out = Array2::<f32>::zeros((height, width));
    for tile in tiles {
        if tile.y >= height || tile.x >= width {
            continue;
        }
        let y_end = (tile.y + tile.height()).min(height);
        let x_end = (tile.x + tile.width()).min(width);
        out.slice_mut(s![tile.y..y_end, tile.x..x_end]).assign(
            &tile
                .data
                .slice(s![..y_end - tile.y, ..x_end - tile.x]),
        );
    }
    out
}
