//! Rigid rotations about the coordinate axes.
//!
//! Rotations are applied one axis at a time (x, then y, then z) rather than
//! through a combined matrix or quaternion. The composition is
//! order-dependent and frame-to-frame output depends on this exact sequence.

use glam::DVec3;

/// A coordinate axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Per-frame rotation increments in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RotationStep {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationStep {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl Default for RotationStep {
    fn default() -> Self {
        Self {
            x: 0.25,
            y: 0.75,
            z: 0.5,
        }
    }
}

/// Rotate a single point about `axis` by `degrees`.
#[inline]
pub fn rotate_point(p: DVec3, axis: Axis, degrees: f64) -> DVec3 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    match axis {
        Axis::X => DVec3::new(p.x, cos * p.y - sin * p.z, sin * p.y + cos * p.z),
        Axis::Y => DVec3::new(cos * p.x - sin * p.z, p.y, sin * p.x + cos * p.z),
        Axis::Z => DVec3::new(cos * p.x - sin * p.y, sin * p.x + cos * p.y, p.z),
    }
}

/// Rotate every node in place by `step`, x then y then z.
pub fn rotate_nodes(nodes: &mut [DVec3], step: RotationStep) {
    for (axis, degrees) in [(Axis::X, step.x), (Axis::Y, step.y), (Axis::Z, step.z)] {
        if degrees == 0.0 {
            continue;
        }
        for node in nodes.iter_mut() {
            *node = rotate_point(*node, axis, degrees);
        }
    }
}
