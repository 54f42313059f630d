//! Scene driver: places generated bodies, advances rotation and orbits each
//! frame, and renders the resulting frame sequence.

mod error;
mod scene;

pub use error::SceneError;
pub use scene::{BodyId, Placement, Scene};
