//! Directional light: a single infinitely distant light source shared by
//! every body in a scene.
//!
//! Shading is flat (one intensity per face) and Lambertian with an ambient
//! floor, so faces turned away from the light darken but never go black.

use glam::DVec3;
use orrery_mesh::{Rgba, triangle_normal};

/// Fraction of the base color kept by faces that receive no direct light.
pub const DEFAULT_AMBIENT: f64 = 0.35;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LightingError {
    #[error("light direction must not be zero")]
    ZeroDirection,
}

/// A light at infinity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector pointing from the surface toward the light.
    direction: DVec3,
    /// Intensity floor in `[0, 1]`.
    ambient: f64,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        // Light from behind the viewer.
        Self {
            direction: DVec3::Z,
            ambient: DEFAULT_AMBIENT,
        }
    }
}

impl DirectionalLight {
    /// Create a light shining from `direction`, normalizing the input.
    pub fn new(direction: DVec3) -> Result<Self, LightingError> {
        let mut light = Self::default();
        light.set_direction(direction)?;
        Ok(light)
    }

    /// Set the light direction, normalizing the input.
    pub fn set_direction(&mut self, direction: DVec3) -> Result<(), LightingError> {
        let len = direction.length();
        if !(len > 1e-12 && len.is_finite()) {
            return Err(LightingError::ZeroDirection);
        }
        self.direction = direction / len;
        Ok(())
    }

    /// Set the ambient floor, clamped to `[0, 1]`.
    pub fn with_ambient(mut self, ambient: f64) -> Self {
        self.ambient = ambient.clamp(0.0, 1.0);
        self
    }

    pub fn direction(&self) -> DVec3 {
        self.direction
    }

    pub fn ambient(&self) -> f64 {
        self.ambient
    }

    /// Lambert intensity for a surface normal, in `[ambient, 1]`.
    /// Degenerate normals get the ambient floor.
    pub fn intensity(&self, normal: DVec3) -> f64 {
        self.ambient + (1.0 - self.ambient) * self.lambert(normal)
    }

    /// Intensity for the triangle `(a, b, c)` of a body centered at the origin.
    pub fn face_intensity(&self, a: DVec3, b: DVec3, c: DVec3) -> f64 {
        self.intensity(outward_normal(a, b, c))
    }

    /// `color` shaded for a surface with `normal`.
    ///
    /// Any surface receiving direct light keeps each non-zero channel at
    /// least one step above the ambient-only shade, so grazing faces never
    /// round down to the color of faces turned away.
    pub fn shade_normal(&self, color: Rgba, normal: DVec3) -> Rgba {
        let floor = shade(color, self.ambient);
        if self.lambert(normal) <= 0.0 {
            return floor;
        }
        let lit = shade(color, self.intensity(normal));
        let channel = |i: usize| {
            if color[i] == 0 {
                lit[i]
            } else {
                lit[i].max(floor[i].saturating_add(1))
            }
        };
        [channel(0), channel(1), channel(2), color[3]]
    }

    /// Shaded color for the triangle `(a, b, c)` of a body centered at the
    /// origin.
    pub fn face_color(&self, color: Rgba, a: DVec3, b: DVec3, c: DVec3) -> Rgba {
        self.shade_normal(color, outward_normal(a, b, c))
    }

    fn lambert(&self, normal: DVec3) -> f64 {
        normal.normalize_or_zero().dot(self.direction).max(0.0)
    }
}

/// Triangle normal, flipped if needed so it points away from the origin.
/// This makes shading independent of the order the corners are listed in.
pub fn outward_normal(a: DVec3, b: DVec3, c: DVec3) -> DVec3 {
    let normal = triangle_normal(a, b, c);
    if normal.dot(a + b + c) < 0.0 {
        -normal
    } else {
        normal
    }
}

/// Scale a color's RGB channels by `intensity`, clamped to `[0, 255]`.
/// Alpha is left alone.
pub fn shade(color: Rgba, intensity: f64) -> Rgba {
    let scale = |c: u8| (c as f64 * intensity).round().clamp(0.0, 255.0) as u8;
    [scale(color[0]), scale(color[1]), scale(color[2]), color[3]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_is_normalized() {
        let light = DirectionalLight::new(DVec3::new(3.0, -4.0, 0.0)).unwrap();
        let len = light.direction().length();
        assert!((len - 1.0).abs() < 1e-12, "direction must be unit length, got {len}");
    }

    #[test]
    fn test_zero_direction_rejected() {
        assert_eq!(
            DirectionalLight::new(DVec3::ZERO),
            Err(LightingError::ZeroDirection)
        );
        let mut light = DirectionalLight::default();
        assert!(light.set_direction(DVec3::splat(f64::NAN)).is_err());
        assert_eq!(light.direction(), DVec3::Z, "failed update leaves the light untouched");
    }

    #[test]
    fn test_intensity_range() {
        let light = DirectionalLight::default();
        assert!((light.intensity(DVec3::Z) - 1.0).abs() < 1e-12);
        assert!((light.intensity(-DVec3::Z) - DEFAULT_AMBIENT).abs() < 1e-12);
        assert!((light.intensity(DVec3::X) - DEFAULT_AMBIENT).abs() < 1e-12);
        assert_eq!(light.intensity(DVec3::ZERO), DEFAULT_AMBIENT);
    }

    #[test]
    fn test_facing_light_is_brighter() {
        let light = DirectionalLight::default();
        let lit = light.intensity(DVec3::new(0.2, 0.1, 1.0));
        let unlit = light.intensity(DVec3::new(0.2, 0.1, -1.0));
        assert!(lit > unlit, "lit {lit} must exceed unlit {unlit}");
    }

    #[test]
    fn test_outward_normal_ignores_winding() {
        let a = DVec3::new(1.0, 0.0, 5.0);
        let b = DVec3::new(0.0, 1.0, 5.0);
        let c = DVec3::new(-1.0, -1.0, 5.0);
        let n1 = outward_normal(a, b, c);
        let n2 = outward_normal(a, c, b);
        assert!(n1.z > 0.0 && n2.z > 0.0, "normals must point away from the origin");
        assert!((n1 - n2).length() < 1e-12);
    }

    #[test]
    fn test_shade_scales_and_clamps() {
        assert_eq!(shade([200, 100, 50, 185], 0.5), [100, 50, 25, 185]);
        assert_eq!(shade([200, 100, 50, 255], 2.0), [255, 200, 100, 255]);
        assert_eq!(shade([200, 100, 50, 255], -1.0), [0, 0, 0, 255]);
        assert_eq!(shade([10, 20, 30, 40], 1.0), [10, 20, 30, 40]);
    }

    #[test]
    fn test_grazing_light_still_brighter_than_shadow() {
        let light = DirectionalLight::default();
        let ocean = [63, 156, 255, 255];
        let grazing = light.shade_normal(ocean, DVec3::new(1.0, 0.0, 0.001));
        let away = light.shade_normal(ocean, DVec3::new(1.0, 0.0, -0.5));
        assert_eq!(away, shade(ocean, DEFAULT_AMBIENT));
        for i in 0..3 {
            assert!(
                away[i] < grazing[i],
                "channel {i}: shadow {away:?} must be darker than grazing {grazing:?}"
            );
        }
        assert_eq!(grazing[3], 255);
    }

    #[test]
    fn test_shade_normal_matches_shade_when_well_lit() {
        let light = DirectionalLight::default();
        let color = [200, 0, 50, 185];
        assert_eq!(light.shade_normal(color, DVec3::Z), color);
        let lit = light.shade_normal(color, DVec3::new(0.0, 0.0, -1.0));
        assert_eq!(lit[1], 0, "empty channels stay empty");
    }

    #[test]
    fn test_ambient_clamped() {
        let light = DirectionalLight::default().with_ambient(3.0);
        assert_eq!(light.ambient(), 1.0);
        assert_eq!(light.intensity(-DVec3::Z), 1.0);
    }
}
