//! Procedural starfield: deterministic star placement on the canvas, painted
//! once into the background image every frame is drawn over.

use image::RgbaImage;
use orrery_mesh::Rgba;
use orrery_render::{Canvas, Surface};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// A single star.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    /// Pixel position.
    pub position: (f64, f64),
    /// In `[0, 1]`; most stars are dim.
    pub brightness: f64,
    /// Radius in pixels.
    pub radius: f64,
    pub color: Rgba,
}

/// A deterministic star catalog for one canvas size.
#[derive(Clone, Debug)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    /// Scatter `count` stars over a `width` x `height` canvas.
    pub fn generate(seed: u64, count: u32, width: u32, height: u32) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let stars = (0..count)
            .map(|_| {
                let x = rng.random::<f64>() * width as f64;
                let y = rng.random::<f64>() * height as f64;
                // Power law: many faint stars, a handful of bright ones.
                let brightness = rng.random::<f64>().powi(4);
                Star {
                    position: (x, y),
                    brightness,
                    radius: 0.3 + brightness * 1.2,
                    color: star_tint(brightness),
                }
            })
            .collect();
        debug!("Starfield with {count} stars for {width}x{height}");
        Self { stars }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Draw every star onto `surface`.
    pub fn paint<S: Surface>(&self, surface: &mut S) {
        for star in &self.stars {
            surface.draw_ellipse(star.position, (star.radius, star.radius), star.color);
        }
    }

    /// A `width` x `height` image of `color` with the stars painted on.
    pub fn background(&self, width: u32, height: u32, color: Rgba) -> RgbaImage {
        let mut canvas = Canvas::new(width, height, color);
        self.paint(&mut canvas);
        canvas.into_image()
    }
}

/// Opaque star color for a brightness: faint stars are dim and warm, bright
/// ones approach blue-white.
pub fn star_tint(brightness: f64) -> Rgba {
    let b = brightness.clamp(0.0, 1.0);
    let level = 90.0 + 165.0 * b.sqrt();
    let channel = |warmth: f64| (level * warmth).round().clamp(0.0, 255.0) as u8;
    let (r, g, bl) = if b < 0.2 {
        (1.0, 0.86, 0.72)
    } else if b < 0.6 {
        (1.0, 0.97, 0.92)
    } else {
        (0.86, 0.92, 1.0)
    };
    [channel(r), channel(g), channel(bl), 255]
}
