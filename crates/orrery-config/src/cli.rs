//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Procedural planet animation renderer.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "orrery", about = "Render an animated procedural planet system")]
pub struct CliArgs {
    /// Seed text for all terrain.
    #[arg(long)]
    pub seed: Option<String>,

    /// Subdivision passes per body.
    #[arg(long)]
    pub complexity: Option<u32>,

    /// Number of frames to render.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Playback frame rate.
    #[arg(long)]
    pub fps: Option<u32>,

    /// Canvas width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Canvas height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Output file (GIF) or directory (PNG sequence).
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Draw mesh edges over the terrain.
    #[arg(long)]
    pub wireframe: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref seed) = args.seed {
            self.generation.seed = seed.clone();
        }
        if let Some(c) = args.complexity {
            self.generation.complexity = c;
        }
        if let Some(f) = args.frames {
            self.render.frames = f;
        }
        if let Some(fps) = args.fps {
            self.render.fps = fps;
        }
        if let Some(w) = args.width {
            self.render.width = w;
        }
        if let Some(h) = args.height {
            self.render.height = h;
        }
        if let Some(ref path) = args.output {
            self.output.path = path.clone();
        }
        if args.wireframe {
            self.render.wireframe = true;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
