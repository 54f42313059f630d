//! Flat per-face shading under a single directional light.

mod directional;

pub use directional::{DEFAULT_AMBIENT, DirectionalLight, LightingError, outward_normal, shade};
