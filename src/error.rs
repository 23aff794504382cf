//! Error types for the sketch pipeline.
//!
//! Only decode/encode problems and invalid user parameters are surfaced;
//! numeric edge cases inside the filters are corrected in place and remote
//! enhancement failures are recovered by falling back to local processing.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal pipeline errors.
#[derive(Debug, Error)]
pub enum SketchError {
    #[error("failed to decode input image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode output image {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("unknown mode {0:?} (expected \"pencil\" or \"art\")")]
    InvalidMode(String),

    #[error("invalid thickness {0} (expected 1-5)")]
    InvalidThickness(u8),

    #[error("unsupported sample grid shape: {0} channels")]
    UnsupportedShape(usize),
}
