use orrery_export::ExportError;

use crate::scene::BodyId;

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// An orbit names a primary that is not in the scene.
    #[error("cannot orbit {0}: no such body in the scene")]
    UnknownPrimary(BodyId),

    #[error("no body {0} in the scene")]
    UnknownBody(BodyId),

    #[error("orbit axis must not be zero")]
    ZeroOrbitAxis,

    #[error("light direction must not be zero")]
    ZeroLightDirection,

    #[error("failed to write frames: {0}")]
    Export(#[from] ExportError),
}
