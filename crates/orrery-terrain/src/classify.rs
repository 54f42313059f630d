//! Per-face biome assignment from quantized elevation and moisture.

use glam::DVec3;
use orrery_mesh::{GeodesicMesh, Rgba, triangle_centroid};
use rayon::prelude::*;
use tracing::info;

use crate::noise_field::NoiseField;
use crate::setting::BodySetting;

/// `ceil(levels * (height - min) / range)`. Heights at or below `min` give
/// a level of zero or less, which no table assigns.
pub fn elevation_level(height: f64, min_height: f64, height_range: f64, levels: u32) -> i32 {
    (levels as f64 * (height - min_height) / height_range).ceil() as i32
}

/// S-curve remap of a raw moisture sample in `[0, levels]`: values above
/// 55% are pushed up, values below 45% are pushed down.
pub fn remap_moisture(moisture: f64, levels: u32) -> f64 {
    let l = levels as f64;
    let mut m = moisture;
    if m > 0.55 * l {
        m *= 2.0 - m / l;
    }
    if m < 0.45 * l {
        m = l - (l - m) * (1.0 + m / l);
    }
    m
}

/// Quantized moisture level of a remapped sample.
pub fn moisture_level(moisture: f64, levels: u32) -> i32 {
    remap_moisture(moisture, levels).ceil() as i32
}

/// Assigns a biome color to every face of a displaced mesh.
pub struct BiomeClassifier<'a, N: NoiseField + ?Sized> {
    setting: &'a BodySetting,
    noise: &'a N,
}

impl<'a, N: NoiseField + ?Sized> BiomeClassifier<'a, N> {
    pub fn new(setting: &'a BodySetting, noise: &'a N) -> Self {
        Self { setting, noise }
    }

    /// Classify a single centroid.
    pub fn color_at(&self, centroid: DVec3, moisture_seed: u32) -> Rgba {
        let s = self.setting;
        let elevation = elevation_level(
            centroid.length(),
            s.min_height,
            s.height_range(),
            s.elevation_levels,
        );
        let raw = self.noise.sample(
            centroid,
            s.moisture_period,
            s.moisture_levels as f64,
            moisture_seed,
        );
        let moisture = moisture_level(raw, s.moisture_levels);
        s.biomes.lookup(elevation, moisture).color
    }

    /// Write a biome color onto every face. Faces are independent and are
    /// classified in parallel.
    pub fn classify(&self, mesh: &mut GeodesicMesh, moisture_seed: u32) {
        let colors: Vec<Rgba> = (0..mesh.faces().len())
            .into_par_iter()
            .map(|face| {
                let [a, b, c] = mesh.face_corners(face);
                self.color_at(triangle_centroid(a, b, c), moisture_seed)
            })
            .collect();

        for (face, color) in mesh.faces_mut().iter_mut().zip(colors) {
            face.biome = Some(color);
        }
        info!(
            "Classified {} faces of {} body",
            mesh.faces().len(),
            self.setting.kind
        );
    }
}
