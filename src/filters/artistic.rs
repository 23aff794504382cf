//! Artistic sketch filter: softly shaded rendering driven by a named mood.
//!
//! A mood selects three scalar factors (contrast, brightness, detail). The
//! grid is contrast-enhanced around its mean, brightness-scaled, optionally
//! run through detail/edge-enhancement kernels, and finished with a dodge
//! blend against a blurred inversion of itself.

use ndarray::{Array3, ArrayView3};

use super::blur::gaussian_blur;
use super::core::{convolve3x3_copy_border, invert, mean_intensity};
use super::grayscale::to_grayscale;

/// Blur radius (standard deviation) of the dodge-blend inversion layer.
const DODGE_BLUR_SIGMA: f32 = 10.0;

/// Blend strength applied to the blurred layer in the dodge denominator.
const DODGE_ALPHA: f32 = 1.0;

/// Floor for the dodge denominator. Deliberately 0.1 rather than 1: small
/// enough to avoid visible banding, still large enough to block NaN/inf.
const DODGE_DENOM_FLOOR: f32 = 0.1;

/// Local-contrast kernel (3x3, divisor 6).
const DETAIL_KERNEL: [[f32; 3]; 3] = [
    [0.0, -1.0, 0.0],
    [-1.0, 10.0, -1.0],
    [0.0, -1.0, 0.0],
];
const DETAIL_DIVISOR: f32 = 6.0;

/// Edge-enhancement kernel (3x3, divisor 2).
const EDGE_ENHANCE_KERNEL: [[f32; 3]; 3] = [
    [-1.0, -1.0, -1.0],
    [-1.0, 10.0, -1.0],
    [-1.0, -1.0, -1.0],
];
const EDGE_ENHANCE_DIVISOR: f32 = 2.0;

// ============================================================================
// Mood Table
// ============================================================================

/// Artistic mood selector.
///
/// Parsing is total: any string that is not a known mood resolves to
/// [`Mood::Neutral`], so the lookup step can never fail.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mood {
    #[default]
    Neutral,
    Excited,
    Curious,
    Stressed,
    Frustrated,
}

/// Scalar adjustment factors selected by a mood.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoodFactors {
    pub contrast: f32,
    pub brightness: f32,
    pub detail: f32,
}

impl Mood {
    /// Parse a mood tag, case-insensitively. Unknown tags fall back to
    /// neutral rather than failing.
    pub fn parse(tag: &str) -> Mood {
        match tag.to_ascii_lowercase().as_str() {
            "excited" => Mood::Excited,
            "curious" => Mood::Curious,
            "stressed" => Mood::Stressed,
            "frustrated" => Mood::Frustrated,
            _ => Mood::Neutral,
        }
    }

    /// The fixed mood-to-factor table.
    pub fn factors(self) -> MoodFactors {
        match self {
            Mood::Neutral => MoodFactors { contrast: 1.5, brightness: 1.0, detail: 1.0 },
            Mood::Excited => MoodFactors { contrast: 1.8, brightness: 1.2, detail: 1.3 },
            Mood::Curious => MoodFactors { contrast: 1.6, brightness: 1.1, detail: 1.5 },
            Mood::Stressed => MoodFactors { contrast: 2.0, brightness: 0.8, detail: 1.4 },
            Mood::Frustrated => MoodFactors { contrast: 2.1, brightness: 0.7, detail: 1.2 },
        }
    }
}

// ============================================================================
// Filter
// ============================================================================

/// Render an artistic (shaded) sketch of `input`.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
/// * `mood` - Mood selecting the adjustment factors
///
/// # Returns
/// Single-channel sketch of shape (height, width, 1)
pub fn artistic_sketch(input: ArrayView3<u8>, mood: Mood) -> Array3<u8> {
    let gray = to_grayscale(input);
    let factors = mood.factors();

    let mut img = enhance_contrast(gray.view(), factors.contrast);
    img = enhance_brightness(img.view(), factors.brightness);

    if factors.detail > 1.0 {
        img = convolve3x3_copy_border(img.view(), &DETAIL_KERNEL, DETAIL_DIVISOR);
        if factors.detail > 1.3 {
            img = convolve3x3_copy_border(img.view(), &EDGE_ENHANCE_KERNEL, EDGE_ENHANCE_DIVISOR);
        }
    }

    dodge_blend(img.view())
}

/// Contrast enhancement around the grid mean:
/// `clamp(mean + (v - mean) * factor, 0, 255)`. The mean is rounded to the
/// nearest integer before use.
fn enhance_contrast(input: ArrayView3<u8>, factor: f32) -> Array3<u8> {
    let mean = mean_intensity(input).round();
    input.mapv(|v| (mean + (v as f32 - mean) * factor).clamp(0.0, 255.0) as u8)
}

/// Multiplicative brightness: `clamp(v * factor, 0, 255)`.
fn enhance_brightness(input: ArrayView3<u8>, factor: f32) -> Array3<u8> {
    input.mapv(|v| (v as f32 * factor).clamp(0.0, 255.0) as u8)
}

/// Dodge blend: divide the grid by the inverse of a blurred inversion of
/// itself, lightening everything except edges and deep shading.
///
/// `out = clamp(img / max(255 - blurred * alpha, 0.1) * 255, 0, 255)`.
/// Non-finite intermediates are substituted (NaN and -inf to 0, +inf to
/// 255) before clamping, so the encoder can never see a degenerate sample.
fn dodge_blend(img: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, _) = img.dim();

    let inverted = invert(img);
    let blurred = gaussian_blur(inverted.view(), DODGE_BLUR_SIGMA);

    let mut output = Array3::<u8>::zeros((height, width, 1));
    for y in 0..height {
        for x in 0..width {
            let denom = (255.0 - blurred[[y, x, 0]] as f32 * DODGE_ALPHA).max(DODGE_DENOM_FLOOR);
            let mut v = img[[y, x, 0]] as f32 / denom * 255.0;

            if v.is_nan() {
                v = 0.0;
            } else if v == f32::INFINITY {
                v = 255.0;
            } else if v == f32::NEG_INFINITY {
                v = 0.0;
            }

            output[[y, x, 0]] = v.clamp(0.0, 255.0) as u8;
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn uniform(height: usize, width: usize, value: u8) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((height, width, 1));
        for y in 0..height {
            for x in 0..width {
                img[[y, x, 0]] = value;
            }
        }
        img
    }

    /// Horizontal gradient, 0 at the left edge.
    fn gradient(size: usize) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((size, size, 1));
        for y in 0..size {
            for x in 0..size {
                img[[y, x, 0]] = ((x * 255) / (size - 1)) as u8;
            }
        }
        img
    }

    fn mean(img: &Array3<u8>) -> f64 {
        let n = (img.dim().0 * img.dim().1) as f64;
        img.iter().map(|&v| v as f64).sum::<f64>() / n
    }

    // ========================================================================
    // Mood Table Tests
    // ========================================================================

    #[test]
    fn test_mood_parse_case_insensitive() {
        assert_eq!(Mood::parse("excited"), Mood::Excited);
        assert_eq!(Mood::parse("EXCITED"), Mood::Excited);
        assert_eq!(Mood::parse("Curious"), Mood::Curious);
        assert_eq!(Mood::parse("sTReSSed"), Mood::Stressed);
        assert_eq!(Mood::parse("frustrated"), Mood::Frustrated);
    }

    #[test]
    fn test_mood_parse_unknown_falls_back_to_neutral() {
        assert_eq!(Mood::parse("melancholic"), Mood::Neutral);
        assert_eq!(Mood::parse(""), Mood::Neutral);
        assert_eq!(Mood::parse("neutral"), Mood::Neutral);
    }

    #[test]
    fn test_mood_factor_table() {
        let n = Mood::Neutral.factors();
        assert_eq!((n.contrast, n.brightness, n.detail), (1.5, 1.0, 1.0));

        let e = Mood::Excited.factors();
        assert_eq!((e.contrast, e.brightness, e.detail), (1.8, 1.2, 1.3));

        let c = Mood::Curious.factors();
        assert_eq!((c.contrast, c.brightness, c.detail), (1.6, 1.1, 1.5));

        let s = Mood::Stressed.factors();
        assert_eq!((s.contrast, s.brightness, s.detail), (2.0, 0.8, 1.4));

        let f = Mood::Frustrated.factors();
        assert_eq!((f.contrast, f.brightness, f.detail), (2.1, 0.7, 1.2));
    }

    // ========================================================================
    // Contract Tests
    // ========================================================================

    #[test]
    fn test_dimensions_preserved_for_all_moods() {
        let mut img = Array3::<u8>::zeros((15, 25, 3));
        for y in 0..15 {
            for x in 0..25 {
                img[[y, x, 0]] = (x * 10) as u8;
                img[[y, x, 1]] = (y * 16) as u8;
                img[[y, x, 2]] = 200;
            }
        }

        for mood in [
            Mood::Neutral,
            Mood::Excited,
            Mood::Curious,
            Mood::Stressed,
            Mood::Frustrated,
        ] {
            let result = artistic_sketch(img.view(), mood);
            assert_eq!(result.dim(), (15, 25, 1));
        }
    }

    #[test]
    fn test_deterministic() {
        let img = gradient(32);

        let a = artistic_sketch(img.view(), Mood::Stressed);
        let b = artistic_sketch(img.view(), Mood::Stressed);

        assert_eq!(a, b);
    }

    // ========================================================================
    // Degenerate Inputs
    // ========================================================================

    #[test]
    fn test_all_black_input_survives_degenerate_denominator() {
        // Black input inverts to a solid 255 layer, driving the dodge
        // denominator to its minimum; output must stay finite and black.
        let img = uniform(16, 16, 0);

        for mood in [Mood::Neutral, Mood::Frustrated] {
            let result = artistic_sketch(img.view(), mood);
            for &v in result.iter() {
                assert_eq!(v, 0);
            }
        }
    }

    #[test]
    fn test_all_white_input_stays_in_range() {
        let img = uniform(16, 16, 255);

        let result = artistic_sketch(img.view(), Mood::Excited);

        assert_eq!(result.dim(), (16, 16, 1));
    }

    // ========================================================================
    // Mood Separation
    // ========================================================================

    #[test]
    fn test_excited_renders_brighter_than_frustrated() {
        let img = gradient(128);

        let excited = artistic_sketch(img.view(), Mood::Excited);
        let frustrated = artistic_sketch(img.view(), Mood::Frustrated);

        // The brightness gap (1.2 vs 0.7) plus the harsher frustrated
        // contrast must show up in the mean output intensity.
        assert!(mean(&excited) > mean(&frustrated) + 2.0);
    }
}
