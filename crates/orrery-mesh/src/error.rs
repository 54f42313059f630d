//! Mesh construction error types.

/// Errors raised while building or subdividing a geodesic mesh.
///
/// Any of these indicates either bad input or an internal bookkeeping bug;
/// downstream terrain and rendering code assumes a well-formed shell.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TopologyError {
    /// The requested diameter cannot produce a sphere.
    #[error("diameter must be positive and finite, got {0}")]
    InvalidDiameter(f64),

    /// Node/edge/face counts diverged from the subdivision recurrence.
    #[error(
        "subdivision level {level}: expected {expected:?} (nodes, edges, faces), got {actual:?}"
    )]
    InvariantViolated {
        /// Subdivision level at which the check failed (1-based).
        level: u32,
        /// Counts predicted by `N' = N + E`, `E' = 2E + 3F`, `F' = 4F`.
        expected: (usize, usize, usize),
        /// Counts actually present in the mesh.
        actual: (usize, usize, usize),
    },

    /// A face's three edges do not close into a triangle.
    #[error("face {face} does not form a triangle (edges {edges:?})")]
    MalformedFace {
        /// Index of the offending face.
        face: usize,
        /// The edge indices referenced by that face.
        edges: [usize; 3],
    },

    /// Splitting one face yielded the wrong number of child triangles.
    #[error("face {face} split into {found} triangles instead of 4")]
    SplitMismatch {
        /// Index of the parent face in the previous level.
        face: usize,
        /// Number of triangles recovered among its nine child edges.
        found: usize,
    },
}
