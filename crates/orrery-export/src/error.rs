use std::path::PathBuf;

/// Errors that can occur while writing frames.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("PNG encoding error: {0}")]
    Png(#[from] png::EncodingError),

    #[error("no frames to export")]
    NoFrames,

    #[error("frame rate must be at least 1")]
    InvalidFrameRate,

    #[error("frame {index} is {actual:?}, expected {expected:?}")]
    FrameSizeMismatch {
        index: usize,
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("output directory {0} is a file")]
    NotADirectory(PathBuf),
}
