//! Pencil sketch filter: clean, line-only rendering via blur-divide edge
//! extraction.
//!
//! The pipeline is grayscale -> invert -> Gaussian blur -> invert -> dodge
//! divide, with an optional contrast/sharpen boost for thickness above 3.
//! The sharpening kernel is deliberately unnormalized (its sum is
//! `thickness + 1`), so output brightness scales with thickness; that drift
//! is part of the look and must not be normalized away.

use ndarray::{Array3, ArrayView3};

use crate::error::SketchError;

use super::blur::gaussian_blur_sized;
use super::core::{convolve3x3_reflect, invert};
use super::grayscale::to_grayscale;

/// Valid line-thickness range.
pub const THICKNESS_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Render a pencil sketch of `input`.
///
/// The blur kernel size is `7 + 2 * thickness` (9-17). For thickness above 3
/// a linear contrast stretch and a 3x3 sharpen pass are applied on top.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
/// * `thickness` - Line thickness, 1-5
///
/// # Returns
/// Single-channel sketch of shape (height, width, 1), or
/// `SketchError::InvalidThickness` when `thickness` is out of range.
pub fn pencil_sketch(input: ArrayView3<u8>, thickness: u8) -> Result<Array3<u8>, SketchError> {
    if !THICKNESS_RANGE.contains(&thickness) {
        return Err(SketchError::InvalidThickness(thickness));
    }

    let gray = to_grayscale(input);
    let inverted = invert(gray.view());

    let kernel_size = 7 + 2 * thickness as usize;
    let blurred = gaussian_blur_sized(inverted.view(), kernel_size);
    let inverted_blurred = invert(blurred.view());

    let mut sketch = dodge_divide(gray.view(), inverted_blurred.view());

    if thickness > 3 {
        sketch = stretch_contrast(sketch.view(), contrast_alpha(thickness));

        let center = sharpen_center_weight(thickness);
        let kernel = [
            [-1.0, -1.0, -1.0],
            [-1.0, center, -1.0],
            [-1.0, -1.0, -1.0],
        ];
        // Unnormalized: divisor stays 1
        sketch = convolve3x3_reflect(sketch.view(), &kernel, 1.0);
    }

    Ok(sketch)
}

/// Color-dodge style division: `clamp(gray * 256 / max(denom, 1), 0, 255)`.
///
/// The denominator is floor-clamped to 1 before dividing, so a fully dark
/// blurred layer can never divide by zero.
fn dodge_divide(gray: ArrayView3<u8>, inverted_blurred: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, _) = gray.dim();
    let mut output = Array3::<u8>::zeros((height, width, 1));

    for y in 0..height {
        for x in 0..width {
            let denom = inverted_blurred[[y, x, 0]].max(1) as u32;
            let v = gray[[y, x, 0]] as u32 * 256 / denom;
            output[[y, x, 0]] = v.min(255) as u8;
        }
    }
    output
}

/// Linear contrast stretch: `clamp(v * alpha, 0, 255)`.
fn stretch_contrast(input: ArrayView3<u8>, alpha: f32) -> Array3<u8> {
    input.mapv(|v| (v as f32 * alpha).clamp(0.0, 255.0) as u8)
}

/// Contrast stretch factor for a thickness: `1.0 + (thickness - 3) * 0.2`
/// above 3, identity otherwise.
fn contrast_alpha(thickness: u8) -> f32 {
    if thickness > 3 {
        1.0 + (thickness - 3) as f32 * 0.2
    } else {
        1.0
    }
}

/// Center weight of the sharpening kernel: `9 + (thickness - 3)` above 3.
fn sharpen_center_weight(thickness: u8) -> f32 {
    9.0 + thickness.saturating_sub(3) as f32
}
