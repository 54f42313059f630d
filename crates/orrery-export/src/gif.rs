//! Looping animated GIF output.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use tracing::info;

use crate::error::ExportError;
use crate::{FrameEncoder, check_frames};

/// Writes one looping GIF.
#[derive(Clone, Copy, Debug)]
pub struct GifExporter {
    /// Quantization speed, 1 (best) to 30 (fastest).
    pub speed: i32,
}

impl Default for GifExporter {
    fn default() -> Self {
        Self { speed: 10 }
    }
}

impl FrameEncoder for GifExporter {
    fn encode(
        &self,
        frames: &[RgbaImage],
        fps: u32,
        path: &Path,
    ) -> Result<Vec<PathBuf>, ExportError> {
        let (width, height) = check_frames(frames, fps)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let writer = BufWriter::new(File::create(path)?);
        let mut encoder = GifEncoder::new_with_speed(writer, self.speed.clamp(1, 30));
        encoder.set_repeat(Repeat::Infinite)?;
        let delay = Delay::from_numer_denom_ms(1000, fps);
        encoder.encode_frames(
            frames
                .iter()
                .map(|frame| Frame::from_parts(frame.clone(), 0, 0, delay)),
        )?;

        info!(
            "Wrote {} frames ({}x{} @ {} fps) to {}",
            frames.len(),
            width,
            height,
            fps,
            path.display()
        );
        Ok(vec![path.to_path_buf()])
    }
}
