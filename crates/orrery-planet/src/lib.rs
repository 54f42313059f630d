//! A generated celestial body: mesh, terrain, biomes and cloud shell,
//! produced by one ordered pipeline from a textual seed.

mod body;
mod error;

pub use body::{Body, HeightBounds};
pub use error::BodyError;
