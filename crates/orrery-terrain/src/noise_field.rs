//! Deterministic scalar noise fields over 3D space.

use dashmap::DashMap;
use glam::DVec3;
use noise::{NoiseFn, Perlin};

/// A deterministic scalar field `f(position, period, amplitude, seed)`.
///
/// Implementations must return values in `[0, amplitude]` and must be pure:
/// identical arguments always produce the identical `f64`.
pub trait NoiseField: Send + Sync {
    /// Sample the field at `position`. `period` is the spatial wavelength in
    /// the same units as `position`.
    fn sample(&self, position: DVec3, period: f64, amplitude: f64, seed: u32) -> f64;
}

/// Gradient noise backed by [`noise::Perlin`], remapped from `[-1, 1]` to
/// `[0, amplitude]`.
///
/// Permutation tables are built once per seed and shared across threads.
#[derive(Default)]
pub struct PerlinField {
    tables: DashMap<u32, Perlin>,
}

impl PerlinField {
    pub fn new() -> Self {
        Self::default()
    }

    fn perlin(&self, seed: u32) -> Perlin {
        self.tables
            .entry(seed)
            .or_insert_with(|| Perlin::new(seed))
            .clone()
    }
}

impl NoiseField for PerlinField {
    fn sample(&self, position: DVec3, period: f64, amplitude: f64, seed: u32) -> f64 {
        let p = position / period;
        let raw = self.perlin(seed).get([p.x, p.y, p.z]);
        ((raw + 1.0) * 0.5).clamp(0.0, 1.0) * amplitude
    }
}
