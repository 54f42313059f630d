//! Body placement, per-frame state updates and the animation loop.

use std::fmt;
use std::path::{Path, PathBuf};

use glam::{DQuat, DVec2, DVec3};
use image::RgbaImage;
use orrery_export::FrameEncoder;
use orrery_lighting::DirectionalLight;
use orrery_mesh::RotationStep;
use orrery_planet::Body;
use orrery_render::{RenderBody, Renderer};
use tracing::{debug, info};

use crate::error::SceneError;

/// Identity of a body within one scene. Never reused after removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(u32);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

/// How a body's position is found each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    /// Fixed pixel position of the body's center, at depth zero.
    Absolute(DVec2),
    /// `offset` from the primary's position, swept around `axis` once per
    /// animation run.
    Orbiting {
        primary: BodyId,
        offset: DVec3,
        axis: DVec3,
    },
}

#[derive(Debug)]
struct Entry {
    id: BodyId,
    body: Body,
    placement: Placement,
}

/// A set of bodies on a shared background.
///
/// The scene owns its bodies. Orbits refer to their primary by [`BodyId`]
/// and are resolved by lookup every frame.
#[derive(Debug)]
pub struct Scene {
    background: RgbaImage,
    entries: Vec<Entry>,
    next_id: u32,
    renderer: Renderer,
    rotation: RotationStep,
}

impl Scene {
    /// An empty scene drawn over `background`, lit from the viewer.
    pub fn new(background: RgbaImage) -> Self {
        Self {
            background,
            entries: Vec::new(),
            next_id: 0,
            renderer: Renderer::default(),
            rotation: RotationStep::default(),
        }
    }

    /// Per-frame body rotation.
    pub fn with_rotation(mut self, rotation: RotationStep) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.renderer = self.renderer.with_wireframe(wireframe);
        self
    }

    /// Add a body. Orbiting placements must name a body already present.
    pub fn add_body(&mut self, body: Body, placement: Placement) -> Result<BodyId, SceneError> {
        if let Placement::Orbiting { primary, axis, .. } = placement {
            if !self.contains(primary) {
                return Err(SceneError::UnknownPrimary(primary));
            }
            if axis.length_squared() == 0.0 || !axis.is_finite() {
                return Err(SceneError::ZeroOrbitAxis);
            }
        }
        let id = BodyId(self.next_id);
        self.next_id += 1;
        info!("Added '{}' as {} ({:?})", body.name(), id, placement);
        self.entries.push(Entry {
            id,
            body,
            placement,
        });
        Ok(id)
    }

    /// Add `body` orbiting `primary` at `offset`, around `axis`.
    pub fn add_orbiting(
        &mut self,
        body: Body,
        primary: BodyId,
        offset: DVec3,
        axis: DVec3,
    ) -> Result<BodyId, SceneError> {
        self.add_body(
            body,
            Placement::Orbiting {
                primary,
                offset,
                axis,
            },
        )
    }

    /// Remove a body and, transitively, everything orbiting it. Returns the
    /// removed body itself.
    pub fn remove_body(&mut self, id: BodyId) -> Result<Body, SceneError> {
        let index = self.index_of(id).ok_or(SceneError::UnknownBody(id))?;

        let mut doomed = vec![id];
        // Satellites always come after their primary, so one forward pass
        // collects whole orbit chains.
        for entry in &self.entries[index + 1..] {
            if let Placement::Orbiting { primary, .. } = entry.placement
                && doomed.contains(&primary)
            {
                doomed.push(entry.id);
            }
        }

        let mut removed = None;
        let mut kept = Vec::with_capacity(self.entries.len());
        for entry in self.entries.drain(..) {
            if entry.id == id {
                removed = Some(entry.body);
            } else if doomed.contains(&entry.id) {
                debug!("Removed satellite {} with its primary", entry.id);
            } else {
                kept.push(entry);
            }
        }
        self.entries = kept;
        info!("Removed {} ({} bodies total)", id, doomed.len());
        removed.ok_or(SceneError::UnknownBody(id))
    }

    pub fn set_light_direction(&mut self, direction: DVec3) -> Result<(), SceneError> {
        self.renderer
            .light_mut()
            .set_direction(direction)
            .map_err(|_| SceneError::ZeroLightDirection)
    }

    pub fn light(&self) -> &DirectionalLight {
        self.renderer.light()
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.index_of(id).map(|i| &self.entries[i].body)
    }

    pub fn placement(&self, id: BodyId) -> Option<Placement> {
        self.index_of(id).map(|i| self.entries[i].placement)
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> Vec<BodyId> {
        self.entries.iter().map(|e| e.id).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn background(&self) -> &RgbaImage {
        &self.background
    }

    /// Resolved position: pixel x/y plus depth.
    pub fn position(&self, id: BodyId) -> Option<DVec3> {
        let entry = &self.entries[self.index_of(id)?];
        match entry.placement {
            Placement::Absolute(p) => Some(p.extend(0.0)),
            Placement::Orbiting {
                primary, offset, ..
            } => Some(self.position(primary)? + offset),
        }
    }

    /// Advance one frame: rotate every body, then move every satellite
    /// `360 / total_frames` degrees along its orbit.
    pub fn step(&mut self, total_frames: u32) {
        let sweep = 360.0_f64.to_radians() / total_frames.max(1) as f64;
        for entry in &mut self.entries {
            entry.body.rotate(self.rotation);
            if let Placement::Orbiting { offset, axis, .. } = &mut entry.placement {
                *offset = DQuat::from_axis_angle(axis.normalize(), sweep) * *offset;
            }
        }
    }

    /// Render the current state without advancing it.
    pub fn render_frame(&self) -> RgbaImage {
        let targets: Vec<RenderBody<'_>> = self
            .entries
            .iter()
            .filter_map(|entry| {
                Some(RenderBody {
                    body: &entry.body,
                    offset: self.position(entry.id)?,
                })
            })
            .collect();
        self.renderer.render(&self.background, &targets)
    }

    /// Step and render `frames` times, returning the frames in order.
    pub fn run(&mut self, frames: u32) -> Vec<RgbaImage> {
        let mut sequence = Vec::with_capacity(frames as usize);
        for i in 0..frames {
            self.step(frames);
            sequence.push(self.render_frame());
            if (i + 1) % 50 == 0 || i + 1 == frames {
                info!("Finished frame {}/{}", i + 1, frames);
            } else {
                debug!("Finished frame {}/{}", i + 1, frames);
            }
        }
        sequence
    }

    /// Run the animation and hand the frames to `encoder`.
    pub fn run_to_file(
        &mut self,
        frames: u32,
        fps: u32,
        path: &Path,
        encoder: &dyn FrameEncoder,
    ) -> Result<Vec<PathBuf>, SceneError> {
        let sequence = self.run(frames);
        Ok(encoder.encode(&sequence, fps, path)?)
    }

    fn index_of(&self, id: BodyId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }
}
