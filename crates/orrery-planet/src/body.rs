//! Body construction pipeline and per-frame state.

use orrery_mesh::{GeodesicMesh, RotationStep};
use orrery_terrain::{
    BiomeClassifier, BodySetting, CloudFace, CloudLayerBuilder, Island, NoiseField, PerlinField,
    TerrainSynthesizer, body_rng, derive_seed,
};
use rand::Rng;
use tracing::info;

use crate::error::BodyError;

/// Smallest and largest node distance from the body's center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightBounds {
    pub min: f64,
    pub max: f64,
}

/// A fully generated body.
///
/// Topology is frozen once [`Body::generate`] returns; only node positions
/// change afterwards, through [`Body::rotate`].
#[derive(Clone, Debug)]
pub struct Body {
    name: String,
    setting: BodySetting,
    mesh: GeodesicMesh,
    clouds: Vec<CloudFace>,
    islands: Vec<Island>,
    bounds: HeightBounds,
}

impl Body {
    /// Generate a body with the default Perlin noise field.
    pub fn generate(
        name: &str,
        setting: BodySetting,
        seed: &str,
        complexity: u32,
    ) -> Result<Self, BodyError> {
        Self::generate_with(name, setting, seed, complexity, &PerlinField::new())
    }

    /// Generate a body: build and subdivide the mesh, displace terrain,
    /// classify biomes, then select cloud faces.
    ///
    /// All randomness comes from one stream keyed by `seed` and `name`, read
    /// in a fixed order (terrain draws, moisture seed, cloud seed).
    pub fn generate_with<N: NoiseField + ?Sized>(
        name: &str,
        setting: BodySetting,
        seed: &str,
        complexity: u32,
        noise: &N,
    ) -> Result<Self, BodyError> {
        setting.validate()?;
        let mut mesh = GeodesicMesh::build(setting.diameter, complexity)?;
        let mut rng = body_rng(derive_seed(seed), name);

        let islands = TerrainSynthesizer::new(&setting, noise).displace(&mut mesh, &mut rng);

        let moisture_seed: u32 = rng.random();
        BiomeClassifier::new(&setting, noise).classify(&mut mesh, moisture_seed);

        let cloud_seed: u32 = rng.random();
        let clouds = CloudLayerBuilder::new(setting.clouds.as_ref(), noise).build(&mut mesh, cloud_seed);

        let bounds = mesh.nodes().iter().map(|n| n.length()).fold(
            HeightBounds {
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
            },
            |b, h| HeightBounds {
                min: b.min.min(h),
                max: b.max.max(h),
            },
        );

        info!(
            "Generated {} '{}': {} faces, {} clouds, heights {:.2}..{:.2}",
            setting.kind,
            name,
            mesh.faces().len(),
            clouds.len(),
            bounds.min,
            bounds.max
        );

        Ok(Self {
            name: name.to_string(),
            setting,
            mesh,
            clouds,
            islands,
            bounds,
        })
    }

    /// Rotate every node by one frame's increments.
    pub fn rotate(&mut self, step: RotationStep) {
        self.mesh.rotate(step);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn setting(&self) -> &BodySetting {
        &self.setting
    }

    pub fn mesh(&self) -> &GeodesicMesh {
        &self.mesh
    }

    pub fn clouds(&self) -> &[CloudFace] {
        &self.clouds
    }

    pub fn islands(&self) -> &[Island] {
        &self.islands
    }

    /// Node height range measured right after generation.
    pub fn bounds(&self) -> HeightBounds {
        self.bounds
    }

    pub fn diameter(&self) -> f64 {
        self.setting.diameter
    }

    /// Radius the cloud shell is drawn at, if the body has one.
    pub fn cloud_shell_radius(&self) -> Option<f64> {
        self.setting.clouds.as_ref().map(|c| c.shell_radius)
    }
}
