//! Geodesic sphere meshes: icosahedron construction, edge-midpoint subdivision,
//! combinatorial face recovery, and rigid rotation of node arrays.

mod error;
mod geodesic;
mod rotation;
mod topology;

pub use error::TopologyError;
pub use geodesic::{GeodesicMesh, expected_counts};
pub use rotation::{Axis, RotationStep, rotate_nodes, rotate_point};
pub use topology::{Edge, Face, Rgba, detect_faces, is_triangle, triangle_centroid, triangle_normal};
