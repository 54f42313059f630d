//! Painter's-algorithm renderer.
//!
//! Every frame is drawn in layers. Terrain faces of all bodies are gathered
//! into one list, sorted by centroid depth (ascending, so nearer faces land
//! last), and painted over the background. Cloud faces go through the same
//! process on a transparent layer that is then alpha-composited on top.

use glam::DVec3;
use image::RgbaImage;
use orrery_lighting::DirectionalLight;
use orrery_mesh::{Rgba, triangle_centroid};
use orrery_planet::Body;
use tracing::trace;

use crate::canvas::Canvas;
use crate::surface::{Point, Surface, alpha_composite};

const WIRE_LOW: Rgba = [0, 0, 200, 255];
const WIRE_HIGH: Rgba = [0, 200, 0, 255];

/// A body together with where it sits in the frame. `offset.x`/`offset.y`
/// are added to node coordinates to get pixels; `offset.z` shifts the body's
/// depth so satellites can pass in front of and behind their primary.
#[derive(Clone, Copy, Debug)]
pub struct RenderBody<'a> {
    pub body: &'a Body,
    pub offset: DVec3,
}

/// Which layer a draw record belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    Terrain,
    Cloud,
}

/// One shaded triangle, ready to paint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawFace {
    /// Index of the body in the slice passed to the renderer.
    pub body: usize,
    /// Index of the face in that body's mesh.
    pub face: usize,
    /// World-space centroid depth; larger is nearer the viewer.
    pub depth: f64,
    pub points: [Point; 3],
    pub color: Rgba,
    pub intensity: f64,
}

#[derive(Clone, Debug, Default)]
pub struct Renderer {
    light: DirectionalLight,
    wireframe: bool,
}

impl Renderer {
    pub fn new(light: DirectionalLight) -> Self {
        Self {
            light,
            wireframe: false,
        }
    }

    /// Also draw front-facing mesh edges over the terrain layer.
    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = wireframe;
        self
    }

    pub fn light(&self) -> &DirectionalLight {
        &self.light
    }

    pub fn light_mut(&mut self) -> &mut DirectionalLight {
        &mut self.light
    }

    /// Render one frame over `background`.
    pub fn render(&self, background: &RgbaImage, bodies: &[RenderBody<'_>]) -> RgbaImage {
        let mut terrain = Canvas::from_image(background.clone());
        let faces = self.draw_list(bodies, Layer::Terrain);
        paint(&mut terrain, &faces);
        if self.wireframe {
            for target in bodies {
                draw_wireframe(&mut terrain, target);
            }
        }

        let clouds = self.draw_list(bodies, Layer::Cloud);
        trace!("painted {} terrain faces, {} cloud faces", faces.len(), clouds.len());
        if clouds.is_empty() {
            return terrain.into_image();
        }
        let mut sky = Canvas::transparent(background.width(), background.height());
        paint(&mut sky, &clouds);
        alpha_composite(terrain.image(), sky.image())
    }

    /// Shaded faces of one layer for all bodies, sorted back to front.
    pub fn draw_list(&self, bodies: &[RenderBody<'_>], layer: Layer) -> Vec<DrawFace> {
        let mut faces = Vec::new();
        for (index, target) in bodies.iter().enumerate() {
            match layer {
                Layer::Terrain => self.collect_terrain(index, target, &mut faces),
                Layer::Cloud => self.collect_clouds(index, target, &mut faces),
            }
        }
        faces.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        faces
    }

    fn collect_terrain(&self, index: usize, target: &RenderBody<'_>, out: &mut Vec<DrawFace>) {
        let mesh = target.body.mesh();
        let fallback = target.body.setting().biomes.fallback().color;
        for (face, record) in mesh.faces().iter().enumerate() {
            let corners = mesh.face_corners(face);
            let base = record.biome.unwrap_or(fallback);
            out.push(self.draw_face(index, face, corners, target.offset, base));
        }
    }

    fn collect_clouds(&self, index: usize, target: &RenderBody<'_>, out: &mut Vec<DrawFace>) {
        let Some(shell) = target.body.cloud_shell_radius() else {
            return;
        };
        let nodes = target.body.mesh().nodes();
        for cloud in target.body.clouds() {
            let corners = cloud.nodes.map(|n| nodes[n].normalize_or_zero() * shell);
            let [a, b, c] = corners;
            if triangle_centroid(a, b, c).z <= 0.0 {
                continue;
            }
            out.push(self.draw_face(index, cloud.face, corners, target.offset, cloud.color));
        }
    }

    fn draw_face(
        &self,
        body: usize,
        face: usize,
        [a, b, c]: [DVec3; 3],
        offset: DVec3,
        base: Rgba,
    ) -> DrawFace {
        let intensity = self.light.face_intensity(a, b, c);
        DrawFace {
            body,
            face,
            depth: triangle_centroid(a, b, c).z + offset.z,
            points: [a, b, c].map(|p| (p.x + offset.x, p.y + offset.y)),
            color: self.light.face_color(base, a, b, c),
            intensity,
        }
    }
}

fn paint<S: Surface>(surface: &mut S, faces: &[DrawFace]) {
    for face in faces {
        surface.draw_polygon(&face.points, face.color);
    }
}

/// Edges whose midpoint faces the viewer: blue below the base radius,
/// green above it.
fn draw_wireframe<S: Surface>(surface: &mut S, target: &RenderBody<'_>) {
    let mesh = target.body.mesh();
    let nodes = mesh.nodes();
    for edge in mesh.edges() {
        let (a, b) = (nodes[edge.a], nodes[edge.b]);
        let mid = (a + b) * 0.5;
        if mid.z <= 0.0 {
            continue;
        }
        let color = if mid.length() < mesh.radius() {
            WIRE_LOW
        } else {
            WIRE_HIGH
        };
        let o = target.offset;
        surface.draw_line((a.x + o.x, a.y + o.y), (b.x + o.x, b.y + o.y), color);
    }
}
