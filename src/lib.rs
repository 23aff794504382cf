//! sketchify
//!
//! Convert a raster photo into a stylized line-art rendering. Two
//! independent, stateless pipelines are selected by a mode flag:
//!
//! - **pencil** - clean, line-only rendering from a grayscale derivative
//!   using blur-divide edge extraction, with an optional contrast/sharpen
//!   boost controlled by a line thickness (1-5).
//! - **art** - softly shaded rendering: mood-driven contrast, brightness
//!   and detail adjustments followed by a dodge blend between the image and
//!   a blurred inversion of itself.
//!
//! The filters operate on in-memory sample grids (`ndarray::Array3<u8>`);
//! [`codec`] moves between image files and grids, [`pipeline::Processor`]
//! wires decoding, the optional remote enhancement collaborator, the
//! selected filter and encoding together.

pub mod codec;
pub mod config;
pub mod enhance;
pub mod error;
pub mod filters;
pub mod pipeline;

pub use config::Config;
pub use error::SketchError;
pub use filters::artistic::{artistic_sketch, Mood};
pub use filters::pencil::pencil_sketch;
pub use pipeline::{Mode, Processor};
