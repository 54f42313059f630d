use orrery_mesh::TopologyError;
use orrery_terrain::SettingError;

/// Failure to construct a [`crate::Body`].
#[derive(Debug, thiserror::Error)]
pub enum BodyError {
    /// The body configuration is invalid.
    #[error("invalid body setting: {0}")]
    Setting(#[from] SettingError),

    /// Mesh construction broke a topology invariant.
    #[error("mesh topology violated: {0}")]
    Topology(#[from] TopologyError),
}
