//! Writers that turn a rendered frame sequence into files on disk.

mod error;
mod gif;
mod png_sequence;

pub use error::ExportError;
pub use gif::GifExporter;
pub use png_sequence::PngSequenceExporter;

use std::path::{Path, PathBuf};

use image::RgbaImage;

/// Encodes an ordered frame sequence at a frame rate.
pub trait FrameEncoder {
    /// Write `frames` to `path` and return the files produced.
    fn encode(&self, frames: &[RgbaImage], fps: u32, path: &Path)
    -> Result<Vec<PathBuf>, ExportError>;
}

/// Shared argument checks: at least one frame, a non-zero rate, and equal
/// frame sizes.
pub(crate) fn check_frames(frames: &[RgbaImage], fps: u32) -> Result<(u32, u32), ExportError> {
    if fps == 0 {
        return Err(ExportError::InvalidFrameRate);
    }
    let first = frames.first().ok_or(ExportError::NoFrames)?;
    let size = first.dimensions();
    for (index, frame) in frames.iter().enumerate() {
        if frame.dimensions() != size {
            return Err(ExportError::FrameSizeMismatch {
                index,
                expected: size,
                actual: frame.dimensions(),
            });
        }
    }
    Ok(size)
}
