//! Software rasterization of generated bodies: a 2-D drawing surface, and a
//! painter's-algorithm renderer with a translucent cloud layer.

mod canvas;
mod renderer;
mod surface;

pub use canvas::Canvas;
pub use renderer::{DrawFace, Layer, RenderBody, Renderer};
pub use surface::{Point, Surface, alpha_composite};

#[cfg(test)]
mod renderer_tests;
