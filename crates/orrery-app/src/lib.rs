//! Orrery application: turns a [`orrery_config::Config`] into a rendered
//! animation on disk.

pub mod build;
pub mod platform;

pub use build::{AppError, build_background, build_scene, generate_bodies, render_to_disk};
pub use platform::{AppDirs, PlatformError};
