//! Luma-weighted grayscale conversion.
//!
//! Uses ITU-R BT.601 luminosity coefficients, the weighting applied by the
//! common camera/photo toolchains this pipeline mirrors. Output is always a
//! single-channel grid; color inputs collapse to weighted luminance,
//! single-channel inputs pass through unchanged.

use ndarray::{Array3, ArrayView3};

/// ITU-R BT.601 luminosity coefficients
const LUMA_R: f32 = 0.299;
const LUMA_G: f32 = 0.587;
const LUMA_B: f32 = 0.114;

/// Convert an image to single-channel grayscale (luminosity method).
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels);
///   a 4th (alpha) channel is ignored
///
/// # Returns
/// Grayscale image of shape (height, width, 1)
pub fn to_grayscale(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 1));

    for y in 0..height {
        for x in 0..width {
            let gray = if channels == 1 {
                input[[y, x, 0]]
            } else {
                let r = input[[y, x, 0]] as f32;
                let g = input[[y, x, 1]] as f32;
                let b = input[[y, x, 2]] as f32;
                (LUMA_R * r + LUMA_G * g + LUMA_B * b) as u8
            };
            output[[y, x, 0]] = gray;
        }
    }

    output
}
