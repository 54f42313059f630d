//! Numbered PNG frames in a directory, for external video tools.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use tracing::{debug, info};

use crate::error::ExportError;
use crate::{FrameEncoder, check_frames};

/// Writes `frame_00000.png`, `frame_00001.png`, ... into a directory.
/// The frame rate is only validated; PNG has no timing.
#[derive(Clone, Debug)]
pub struct PngSequenceExporter {
    pub prefix: String,
}

impl Default for PngSequenceExporter {
    fn default() -> Self {
        Self {
            prefix: "frame".to_string(),
        }
    }
}

impl PngSequenceExporter {
    fn write_frame(path: &Path, frame: &RgbaImage) -> Result<(), ExportError> {
        let writer = BufWriter::new(File::create(path)?);
        let mut encoder = png::Encoder::new(writer, frame.width(), frame.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(frame.as_raw())?;
        writer.finish()?;
        Ok(())
    }
}

impl FrameEncoder for PngSequenceExporter {
    fn encode(
        &self,
        frames: &[RgbaImage],
        fps: u32,
        path: &Path,
    ) -> Result<Vec<PathBuf>, ExportError> {
        check_frames(frames, fps)?;
        if path.is_file() {
            return Err(ExportError::NotADirectory(path.to_path_buf()));
        }
        fs::create_dir_all(path)?;

        let mut written = Vec::with_capacity(frames.len());
        for (i, frame) in frames.iter().enumerate() {
            let file = path.join(format!("{}_{:05}.png", self.prefix, i));
            Self::write_frame(&file, frame)?;
            debug!("wrote {}", file.display());
            written.push(file);
        }
        info!("Wrote {} PNG frames to {}", written.len(), path.display());
        Ok(written)
    }
}
