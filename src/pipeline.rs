//! Mode selection and the processing dispatcher.
//!
//! The dispatcher owns the peripheral flow around the filters: decode the
//! input, offer it to the (usually disabled) remote enhancement provider,
//! run the local filter selected by the mode, encode the result. Both
//! `InvalidMode` and decode failures abort before anything is written to
//! the output path; remote failures never abort at all.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use ndarray::Array3;

use crate::codec;
use crate::config::Config;
use crate::enhance::{provider_from_config, EnhancementProvider, Unavailable};
use crate::error::SketchError;
use crate::filters::artistic::{artistic_sketch, Mood};
use crate::filters::pencil::pencil_sketch;

/// Rendering mode selected on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Pencil,
    Art,
}

impl FromStr for Mode {
    type Err = SketchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pencil" => Ok(Mode::Pencil),
            "art" => Ok(Mode::Art),
            _ => Err(SketchError::InvalidMode(s.to_string())),
        }
    }
}

/// Stateless processing dispatcher.
///
/// Holds only the enhancement collaborator; every [`Processor::run`] call is
/// independent, so one processor can serve any number of images.
pub struct Processor {
    provider: Box<dyn EnhancementProvider>,
}

impl Default for Processor {
    fn default() -> Self {
        Processor::new()
    }
}

impl Processor {
    /// Processor with remote enhancement disabled.
    pub fn new() -> Self {
        Processor {
            provider: Box::new(Unavailable),
        }
    }

    /// Processor with an explicit enhancement collaborator.
    pub fn with_provider(provider: Box<dyn EnhancementProvider>) -> Self {
        Processor { provider }
    }

    /// Processor with the collaborator implied by `config`.
    pub fn from_config(config: &Config) -> Self {
        Processor::with_provider(provider_from_config(config))
    }

    /// Process one image: decode `input`, render it in `mode`, write the
    /// result to `output`.
    ///
    /// `thickness` applies to pencil mode (1-5); `mood` applies to art mode
    /// and falls back to neutral when unrecognized.
    pub fn run(
        &self,
        input: &Path,
        output: &Path,
        mode: &str,
        thickness: u8,
        mood: &str,
    ) -> Result<(), SketchError> {
        let mode = Mode::from_str(mode)?;

        let raw = fs::read(input).map_err(|err| SketchError::Decode {
            path: input.to_path_buf(),
            source: image::ImageError::IoError(err),
        })?;
        let grid = codec::decode_bytes(&raw).map_err(|source| SketchError::Decode {
            path: input.to_path_buf(),
            source,
        })?;
        log::debug!(
            "decoded {} ({}x{})",
            input.display(),
            grid.dim().1,
            grid.dim().0
        );

        let result = match self.try_remote(&raw, mode) {
            Some(enhanced) => enhanced,
            None => match mode {
                Mode::Pencil => pencil_sketch(grid.view(), thickness)?,
                Mode::Art => artistic_sketch(grid.view(), Mood::parse(mood)),
            },
        };

        codec::encode(result.view(), output)?;
        log::info!("processed {} -> {}", input.display(), output.display());
        Ok(())
    }

    /// Offer the raw input to the enhancement collaborator. Any failure,
    /// including an undecodable response, falls back to local processing.
    fn try_remote(&self, raw: &[u8], mode: Mode) -> Option<Array3<u8>> {
        match self.provider.enhance(raw, mode) {
            Ok(Some(bytes)) => match codec::decode_bytes(&bytes) {
                Ok(grid) => {
                    log::info!("using remotely enhanced image");
                    Some(grid)
                }
                Err(err) => {
                    log::warn!("remote enhancement returned an undecodable image: {err}");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                log::warn!("remote enhancement failed, falling back to local filters: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enhance::EnhanceError;
    use ndarray::Array3;

    fn write_test_image(path: &Path, size: usize) {
        let mut grid = Array3::<u8>::zeros((size, size, 3));
        for y in 0..size {
            for x in 0..size {
                grid[[y, x, 0]] = ((x * 255) / size) as u8;
                grid[[y, x, 1]] = ((y * 255) / size) as u8;
                grid[[y, x, 2]] = 90;
            }
        }
        codec::encode(grid.view(), path).unwrap();
    }

    // ========================================================================
    // Mode Parsing
    // ========================================================================

    #[test]
    fn test_mode_from_str() {
        assert_eq!("pencil".parse::<Mode>().unwrap(), Mode::Pencil);
        assert_eq!("PENCIL".parse::<Mode>().unwrap(), Mode::Pencil);
        assert_eq!("Art".parse::<Mode>().unwrap(), Mode::Art);
    }

    #[test]
    fn test_mode_from_str_unknown() {
        assert!(matches!(
            "xyz".parse::<Mode>(),
            Err(SketchError::InvalidMode(s)) if s == "xyz"
        ));
    }

    // ========================================================================
    // Dispatcher
    // ========================================================================

    #[test]
    fn test_run_pencil_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        write_test_image(&input, 16);

        Processor::new()
            .run(&input, &output, "pencil", 3, "neutral")
            .unwrap();

        let result = codec::decode(&output).unwrap();
        assert_eq!(result.dim(), (16, 16, 3));
    }

    #[test]
    fn test_run_art_with_unknown_mood_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        write_test_image(&input, 16);

        Processor::new()
            .run(&input, &output, "art", 3, "contemplative")
            .unwrap();

        assert!(output.exists());
    }

    #[test]
    fn test_run_invalid_mode_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        write_test_image(&input, 8);

        let result = Processor::new().run(&input, &output, "xyz", 3, "neutral");

        assert!(matches!(result, Err(SketchError::InvalidMode(_))));
        assert!(!output.exists());
    }

    #[test]
    fn test_run_missing_input_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing.png");
        let output = dir.path().join("out.png");

        let result = Processor::new().run(&input, &output, "pencil", 3, "neutral");

        assert!(matches!(result, Err(SketchError::Decode { .. })));
        assert!(!output.exists());
    }

    // ========================================================================
    // Remote Fallback
    // ========================================================================

    struct FailingProvider;

    impl EnhancementProvider for FailingProvider {
        fn enhance(&self, _image: &[u8], _mode: Mode) -> Result<Option<Vec<u8>>, EnhanceError> {
            Err(EnhanceError::Status(500))
        }
    }

    struct CannedProvider {
        bytes: Vec<u8>,
    }

    impl EnhancementProvider for CannedProvider {
        fn enhance(&self, _image: &[u8], _mode: Mode) -> Result<Option<Vec<u8>>, EnhanceError> {
            Ok(Some(self.bytes.clone()))
        }
    }

    #[test]
    fn test_remote_failure_falls_back_to_local() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        write_test_image(&input, 8);

        Processor::with_provider(Box::new(FailingProvider))
            .run(&input, &output, "pencil", 2, "neutral")
            .unwrap();

        assert!(output.exists());
    }

    #[test]
    fn test_remote_result_is_used_when_available() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        let remote = dir.path().join("remote.png");
        write_test_image(&input, 8);
        write_test_image(&remote, 4);

        let provider = CannedProvider {
            bytes: fs::read(&remote).unwrap(),
        };
        Processor::with_provider(Box::new(provider))
            .run(&input, &output, "art", 3, "neutral")
            .unwrap();

        // Output carries the remote rendition, not a local 8x8 render
        let result = codec::decode(&output).unwrap();
        assert_eq!(result.dim(), (4, 4, 3));
    }

    #[test]
    fn test_undecodable_remote_result_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        write_test_image(&input, 8);

        let provider = CannedProvider {
            bytes: vec![0xde, 0xad, 0xbe, 0xef],
        };
        Processor::with_provider(Box::new(provider))
            .run(&input, &output, "pencil", 3, "neutral")
            .unwrap();

        let result = codec::decode(&output).unwrap();
        assert_eq!(result.dim(), (8, 8, 3));
    }
}
