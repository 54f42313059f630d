//! Backdrops painted behind the bodies of a scene.

mod starfield;

pub use starfield::{Star, Starfield, star_tint};
