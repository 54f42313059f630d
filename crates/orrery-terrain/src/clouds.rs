//! Cloud shell selection: which faces carry a translucent cloud patch.

use orrery_mesh::{GeodesicMesh, Rgba, triangle_centroid};
use tracing::info;

use crate::noise_field::NoiseField;
use crate::setting::CloudSetting;

/// A cloud patch over one terrain face. It shares the terrain's nodes and is
/// only pushed out to the shell radius when drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CloudFace {
    /// Index of the terrain face underneath.
    pub face: usize,
    pub nodes: [usize; 3],
    pub color: Rgba,
}

pub struct CloudLayerBuilder<'a, N: NoiseField + ?Sized> {
    setting: Option<&'a CloudSetting>,
    noise: &'a N,
}

impl<'a, N: NoiseField + ?Sized> CloudLayerBuilder<'a, N> {
    pub fn new(setting: Option<&'a CloudSetting>, noise: &'a N) -> Self {
        Self { setting, noise }
    }

    /// Select the cloud faces of `mesh` and flag them on the face table.
    /// Returns an empty list for airless bodies.
    pub fn build(&self, mesh: &mut GeodesicMesh, seed: u32) -> Vec<CloudFace> {
        let Some(setting) = self.setting else {
            return Vec::new();
        };

        let clouds: Vec<CloudFace> = (0..mesh.faces().len())
            .filter_map(|face| {
                let [a, b, c] = mesh.face_corners(face);
                let cover = self
                    .noise
                    .sample(triangle_centroid(a, b, c), setting.period, 1.0, seed);
                (cover > setting.cutoff).then(|| CloudFace {
                    face,
                    nodes: mesh.face_nodes(face),
                    color: setting.color,
                })
            })
            .collect();

        let faces = mesh.faces_mut();
        for cloud in &clouds {
            faces[cloud.face].cloud = true;
        }
        info!("Cloud layer covers {} of {} faces", clouds.len(), faces.len());
        clouds
    }
}
