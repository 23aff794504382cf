//! Core utilities shared by the sketch filters:
//! - Gaussian kernel generation (sigma-driven and kernel-size-driven)
//! - Border index helpers
//! - 3x3 convolution over single-channel grids
//! - Grid statistics

use ndarray::{Array3, ArrayView3};

// ============================================================================
// Gaussian Kernels
// ============================================================================

/// Generate a 1D Gaussian kernel from a standard deviation.
///
/// Kernel support is 6 sigma (covers 99.7% of the distribution), forced odd.
///
/// # Arguments
/// * `sigma` - Standard deviation of the Gaussian
///
/// # Returns
/// Normalized 1D kernel as Vec<f32>
pub fn gaussian_kernel_1d(sigma: f32) -> Vec<f32> {
    if sigma <= 0.0 {
        return vec![1.0];
    }

    let kernel_size = ((sigma * 6.0).ceil() as usize) | 1;
    gaussian_weights(kernel_size, sigma)
}

/// Generate a 1D Gaussian kernel from an explicit kernel size.
///
/// The size is forced to the nearest odd integer >= 1. Sigma is derived from
/// the size the way OpenCV does when called with `sigma = 0`:
/// `0.3 * ((size - 1) * 0.5 - 1) + 0.8`.
///
/// # Arguments
/// * `size` - Requested kernel size in samples
///
/// # Returns
/// Normalized 1D kernel as Vec<f32>, of odd length >= 1
pub fn gaussian_kernel_sized(size: usize) -> Vec<f32> {
    let size = size.max(1);
    let size = if size % 2 == 0 { size + 1 } else { size };

    let sigma = 0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8;
    gaussian_weights(size, sigma.max(0.001))
}

fn gaussian_weights(size: usize, sigma: f32) -> Vec<f32> {
    let half = size / 2;

    let mut kernel: Vec<f32> = (0..size)
        .map(|i| {
            let x = i as f32 - half as f32;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for v in kernel.iter_mut() {
        *v /= sum;
    }

    kernel
}

// ============================================================================
// Border Handling
// ============================================================================

/// Reflect an out-of-range index back into `0..size`.
///
/// Reflect mode: (d c b a | a b c d | d c b a), matching scipy/OpenCV
/// reflect borders.
#[inline]
pub fn reflect_index(i: i32, size: usize) -> usize {
    let s = size as i32;
    if i < 0 {
        (-i - 1).rem_euclid(s) as usize
    } else if i >= s {
        (2 * s - i - 1).rem_euclid(s) as usize
    } else {
        i as usize
    }
}

// ============================================================================
// 3x3 Convolution
// ============================================================================

/// Convolve a single-channel grid with a 3x3 kernel, reflect borders.
///
/// The accumulated sum is divided by `divisor` before clamping; pass 1.0 for
/// an unnormalized kernel.
///
/// # Arguments
/// * `input` - Single-channel image (height, width, 1)
/// * `kernel` - 3x3 weights, row-major
/// * `divisor` - Post-sum divisor
///
/// # Returns
/// Convolved single-channel image, same dimensions
pub fn convolve3x3_reflect(
    input: ArrayView3<u8>,
    kernel: &[[f32; 3]; 3],
    divisor: f32,
) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 1));

    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0f32;
            for (ky, row) in kernel.iter().enumerate() {
                let sy = reflect_index(y as i32 + ky as i32 - 1, height);
                for (kx, &kv) in row.iter().enumerate() {
                    let sx = reflect_index(x as i32 + kx as i32 - 1, width);
                    sum += input[[sy, sx, 0]] as f32 * kv;
                }
            }
            output[[y, x, 0]] = (sum / divisor).clamp(0.0, 255.0) as u8;
        }
    }

    output
}

/// Convolve a single-channel grid with a 3x3 kernel, copying the 1-px border
/// from the input unchanged (PIL kernel-filter behavior).
///
/// # Arguments
/// * `input` - Single-channel image (height, width, 1)
/// * `kernel` - 3x3 weights, row-major
/// * `divisor` - Post-sum divisor
///
/// # Returns
/// Convolved single-channel image, same dimensions
pub fn convolve3x3_copy_border(
    input: ArrayView3<u8>,
    kernel: &[[f32; 3]; 3],
    divisor: f32,
) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 1));

    for y in 1..height.saturating_sub(1) {
        for x in 1..width.saturating_sub(1) {
            let mut sum = 0.0f32;
            for (ky, row) in kernel.iter().enumerate() {
                for (kx, &kv) in row.iter().enumerate() {
                    sum += input[[y + ky - 1, x + kx - 1, 0]] as f32 * kv;
                }
            }
            output[[y, x, 0]] = (sum / divisor).clamp(0.0, 255.0) as u8;
        }
    }

    // Copy edges
    for x in 0..width {
        output[[0, x, 0]] = input[[0, x, 0]];
        if height > 1 {
            output[[height - 1, x, 0]] = input[[height - 1, x, 0]];
        }
    }
    for y in 0..height {
        output[[y, 0, 0]] = input[[y, 0, 0]];
        if width > 1 {
            output[[y, width - 1, 0]] = input[[y, width - 1, 0]];
        }
    }

    output
}

// ============================================================================
// Per-Sample Operations
// ============================================================================

/// Invert a grid (`255 - v` per sample).
pub fn invert(input: ArrayView3<u8>) -> Array3<u8> {
    input.mapv(|v| 255 - v)
}

// ============================================================================
// Statistics
// ============================================================================

/// Mean intensity of a single-channel grid.
pub fn mean_intensity(input: ArrayView3<u8>) -> f32 {
    let (height, width, _) = input.dim();
    if height == 0 || width == 0 {
        return 0.0;
    }

    let mut sum = 0u64;
    for y in 0..height {
        for x in 0..width {
            sum += input[[y, x, 0]] as u64;
        }
    }
    sum as f32 / (height * width) as f32
}
