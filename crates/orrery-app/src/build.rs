//! Config to scene to frames on disk.

use std::path::PathBuf;

use glam::{DVec2, DVec3};
use image::RgbaImage;
use orrery_config::{BodyConfig, BodyKind, Config, OutputFormat, PlacementConfig};
use orrery_export::{FrameEncoder, GifExporter, PngSequenceExporter};
use orrery_mesh::RotationStep;
use orrery_planet::{Body, BodyError};
use orrery_scene::{BodyId, Placement, Scene, SceneError};
use orrery_space::Starfield;
use orrery_terrain::{Archetype, derive_seed};
use rayon::prelude::*;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] orrery_config::ConfigError),

    #[error("failed to generate body `{name}`: {source}")]
    Body {
        name: String,
        #[source]
        source: BodyError,
    },

    #[error(transparent)]
    Scene(#[from] SceneError),

    /// An orbiting body names a primary that is not listed before it.
    #[error("body `{body}` orbits `{primary}`, which is not listed before it")]
    UnknownPrimary { body: String, primary: String },
}

fn archetype(kind: BodyKind) -> Archetype {
    match kind {
        BodyKind::TerrestrialOceans => Archetype::TerrestrialOceans,
        BodyKind::TerrestrialIronOxide => Archetype::TerrestrialIronOxide,
        BodyKind::ClassicMoon => Archetype::ClassicMoon,
    }
}

fn generate_one(body: &BodyConfig, seed: &str, complexity: u32) -> Result<Body, AppError> {
    let wrap = |source: BodyError| AppError::Body {
        name: body.name.clone(),
        source,
    };
    let setting = archetype(body.kind)
        .setting(body.diameter)
        .map_err(|e| wrap(e.into()))?;
    Body::generate(&body.name, setting, seed, complexity).map_err(wrap)
}

/// Generate every configured body, in parallel, keeping config order.
pub fn generate_bodies(config: &Config) -> Result<Vec<Body>, AppError> {
    let generation = &config.generation;
    config
        .scene
        .bodies
        .par_iter()
        .map(|body| generate_one(body, &generation.seed, generation.complexity))
        .collect()
}

/// Starfield over the configured color, or a flat fill without stars.
pub fn build_background(config: &Config) -> RgbaImage {
    let render = &config.render;
    if render.star_count == 0 {
        return RgbaImage::from_pixel(render.width, render.height, image::Rgba(render.background));
    }
    Starfield::generate(
        derive_seed(&config.generation.seed),
        render.star_count,
        render.width,
        render.height,
    )
    .background(render.width, render.height, render.background)
}

/// Build the full scene described by `config`.
pub fn build_scene(config: &Config) -> Result<Scene, AppError> {
    let render = &config.render;
    let [rx, ry, rz] = render.rotation_degrees;
    let mut scene = Scene::new(build_background(config))
        .with_rotation(RotationStep::new(rx, ry, rz))
        .with_wireframe(render.wireframe);
    scene.set_light_direction(DVec3::from_array(render.light_direction))?;

    let bodies = generate_bodies(config)?;
    let center = DVec2::new(render.width as f64 / 2.0, render.height as f64 / 2.0);
    let mut ids: Vec<(String, BodyId)> = Vec::with_capacity(bodies.len());

    for (entry, body) in config.scene.bodies.iter().zip(bodies) {
        let placement = match &entry.placement {
            PlacementConfig::Centered => Placement::Absolute(center),
            PlacementConfig::Absolute { x, y } => Placement::Absolute(DVec2::new(*x, *y)),
            PlacementConfig::Orbiting {
                primary,
                x,
                y,
                z,
                axis,
            } => {
                let primary_id = ids
                    .iter()
                    .find(|(name, _)| name == primary)
                    .map(|(_, id)| *id)
                    .ok_or_else(|| AppError::UnknownPrimary {
                        body: entry.name.clone(),
                        primary: primary.clone(),
                    })?;
                Placement::Orbiting {
                    primary: primary_id,
                    offset: DVec3::new(*x, *y, *z),
                    axis: DVec3::from_array(*axis),
                }
            }
        };
        let id = scene.add_body(body, placement)?;
        ids.push((entry.name.clone(), id));
    }

    info!(
        "Scene ready: {} bodies on a {}x{} canvas",
        scene.len(),
        render.width,
        render.height
    );
    Ok(scene)
}

/// Build, animate and export. Returns the files written.
pub fn render_to_disk(config: &Config) -> Result<Vec<PathBuf>, AppError> {
    let mut scene = build_scene(config)?;
    let encoder: Box<dyn FrameEncoder> = match config.output.format {
        OutputFormat::Gif => Box::new(GifExporter::default()),
        OutputFormat::PngSequence => Box::new(PngSequenceExporter::default()),
    };
    let written = scene.run_to_file(
        config.render.frames,
        config.render.fps,
        &config.output.path,
        encoder.as_ref(),
    )?;
    info!("Wrote {} file(s) to {}", written.len(), config.output.path.display());
    Ok(written)
}
