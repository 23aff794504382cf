//! Decode and encode between image files and in-memory sample grids.
//!
//! A decoded image is an `ndarray::Array3<u8>` of shape `(height, width,
//! channels)`: RGB (3 channels) coming in, grayscale (1 channel) or RGB
//! going out. Output format is inferred from the output path's extension by
//! the `image` crate, which also covers the common camera/screenshot input
//! formats on the decode side.

use std::path::Path;

use image::{DynamicImage, GrayImage, RgbImage};
use ndarray::{Array3, ArrayView3};

use crate::error::SketchError;

/// Decode an image file into an RGB sample grid.
///
/// # Arguments
/// * `path` - Input image path
///
/// # Returns
/// Grid of shape (height, width, 3), or `SketchError::Decode` if the file
/// is unreadable or corrupt.
pub fn decode(path: &Path) -> Result<Array3<u8>, SketchError> {
    let img = image::open(path).map_err(|source| SketchError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(dynamic_to_grid(img))
}

/// Decode an in-memory encoded image into an RGB sample grid.
///
/// Used for remote-enhancement responses; failures are reported with the
/// same error kind as file decoding.
pub fn decode_bytes(data: &[u8]) -> Result<Array3<u8>, image::ImageError> {
    let img = image::load_from_memory(data)?;
    Ok(dynamic_to_grid(img))
}

fn dynamic_to_grid(img: DynamicImage) -> Array3<u8> {
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    Array3::from_shape_vec((height as usize, width as usize, 3), rgb.into_raw())
        .expect("raw RGB buffer length matches dimensions")
}

/// Encode a sample grid and write it to `path`.
///
/// Single-channel grids are written as grayscale, 3-channel grids as RGB.
/// The format is chosen from the path extension.
///
/// # Arguments
/// * `grid` - Grid of shape (height, width, 1) or (height, width, 3)
/// * `path` - Output image path
pub fn encode(grid: ArrayView3<u8>, path: &Path) -> Result<(), SketchError> {
    let (height, width, channels) = grid.dim();
    let data: Vec<u8> = grid.iter().copied().collect();

    let save_result = match channels {
        1 => GrayImage::from_raw(width as u32, height as u32, data)
            .expect("grid length matches dimensions")
            .save(path),
        3 => RgbImage::from_raw(width as u32, height as u32, data)
            .expect("grid length matches dimensions")
            .save(path),
        c => return Err(SketchError::UnsupportedShape(c)),
    };

    save_result.map_err(|source| SketchError::Encode {
        path: path.to_path_buf(),
        source,
    })
}
