//! Filter modules for the two sketch rendering pipelines.
//!
//! ## Sample Grids
//!
//! Every filter works on `ndarray` grids of shape (height, width, channels)
//! with u8 samples (0-255):
//!
//! | Format | Shape | Description |
//! |--------|-------|-------------|
//! | Grayscale | (H, W, 1) | Single luminance channel |
//! | RGB | (H, W, 3) | Red, green, blue |
//!
//! Color inputs are collapsed to luminance as the first stage of either
//! pipeline; everything downstream is single-channel.
//!
//! ## Architecture
//!
//! - **Pure stages** - Every stage takes a view and returns a fresh grid;
//!   nothing is mutated in place, so stages compose and runs are reentrant.
//! - **Fixed dimensions** - No stage changes the spatial dimensions.
//! - **Saturating output** - Intermediate float math is clamped (and
//!   NaN/inf-substituted where division is involved) before narrowing back
//!   to u8.
//! - **Row-parallel blur** - The Gaussian blur distributes rows with rayon;
//!   all other stages are simple per-pixel loops.

pub mod core;

pub mod grayscale;

pub mod blur;

pub mod pencil;
pub mod artistic;
