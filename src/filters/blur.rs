//! Separable Gaussian blur over single-channel grids.
//!
//! Two entry points cover the two callers in the sketch pipelines: a
//! sigma-driven blur (radius-style, 6-sigma support) and a kernel-size-driven
//! blur (OpenCV-style, sigma derived from the size). Both run the classic
//! horizontal + vertical pass in f32 with clamped borders; rows are
//! processed in parallel with rayon.

use ndarray::{Array3, ArrayView3};
use rayon::prelude::*;

use super::core::{gaussian_kernel_1d, gaussian_kernel_sized};

/// Apply Gaussian blur with a given standard deviation.
///
/// # Arguments
/// * `input` - Single-channel image (height, width, 1)
/// * `sigma` - Standard deviation of the Gaussian; <= 0 returns a copy
///
/// # Returns
/// Blurred single-channel image, same dimensions
pub fn gaussian_blur(input: ArrayView3<u8>, sigma: f32) -> Array3<u8> {
    blur_with_kernel(input, &gaussian_kernel_1d(sigma))
}

/// Apply Gaussian blur with an explicit kernel size.
///
/// The size is forced to the nearest odd integer >= 1; sigma is derived
/// from the final size (see [`gaussian_kernel_sized`]).
///
/// # Arguments
/// * `input` - Single-channel image (height, width, 1)
/// * `kernel_size` - Requested kernel size in samples
///
/// # Returns
/// Blurred single-channel image, same dimensions
pub fn gaussian_blur_sized(input: ArrayView3<u8>, kernel_size: usize) -> Array3<u8> {
    blur_with_kernel(input, &gaussian_kernel_sized(kernel_size))
}

fn blur_with_kernel(input: ArrayView3<u8>, kernel: &[f32]) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let half = kernel.len() / 2;

    // Horizontal pass
    let temp: Vec<Vec<f32>> = (0..height)
        .into_par_iter()
        .map(|y| {
            let mut row = vec![0.0f32; width];
            for x in 0..width {
                let mut sum = 0.0f32;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let sx = (x as isize + ki as isize - half as isize)
                        .clamp(0, width as isize - 1) as usize;
                    sum += input[[y, sx, 0]] as f32 * kv;
                }
                row[x] = sum;
            }
            row
        })
        .collect();

    // Vertical pass
    let blurred: Vec<Vec<f32>> = (0..height)
        .into_par_iter()
        .map(|y| {
            let mut row = vec![0.0f32; width];
            for x in 0..width {
                let mut sum = 0.0f32;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let sy = (y as isize + ki as isize - half as isize)
                        .clamp(0, height as isize - 1) as usize;
                    sum += temp[sy][x] * kv;
                }
                row[x] = sum;
            }
            row
        })
        .collect();

    let mut output = Array3::<u8>::zeros((height, width, 1));
    for y in 0..height {
        for x in 0..width {
            output[[y, x, 0]] = blurred[y][x].clamp(0.0, 255.0) as u8;
        }
    }
    output
}
