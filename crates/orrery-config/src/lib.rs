//! Run configuration for the orrery renderer.
//!
//! Settings persist to disk as a RON file and can be overridden from the
//! command line. Every section carries defaults, so partial files load.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    BodyConfig, BodyKind, Config, DebugConfig, GenerationConfig, OutputConfig, OutputFormat,
    PlacementConfig, RenderConfig, SceneConfig,
};
pub use error::ConfigError;
