//! Convenience helpers for loading grids via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::OwnedGrid;
use crate::util::{PixHomError, PixHomResult};
use std::path::Path;

/// Creates an owned grid from a grayscale image buffer.
pub fn grid_from_gray_image(img: &image::GrayImage) -> PixHomResult<OwnedGrid> {
    let rows = img.height() as usize;
    let cols = img.width() as usize;
    OwnedGrid::from_u8(img.as_raw(), rows, cols)
}

/// Converts a dynamic image to luma and returns its intensity grid.
pub fn grid_from_dynamic_image(img: &image::DynamicImage) -> PixHomResult<OwnedGrid> {
    let gray = img.to_luma8();
    grid_from_gray_image(&gray)
}

/// Loads an image from disk as a grayscale intensity grid in `[0, 255]`.
pub fn load_gray_grid<P: AsRef<Path>>(path: P) -> PixHomResult<OwnedGrid> {
    let img = image::open(path).map_err(|err| PixHomError::ImageIo {
        reason: err.to_string(),
    })?;
    grid_from_dynamic_image(&img)
}
