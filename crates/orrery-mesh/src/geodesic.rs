//! Icosahedron construction and recursive edge-midpoint subdivision.

use glam::DVec3;
use tracing::{debug, info};

use crate::error::TopologyError;
use crate::rotation::{RotationStep, rotate_nodes};
use crate::topology::{Edge, Face, detect_faces, is_triangle};

/// Node pairs of the 30 icosahedron edges, indexing [`base_nodes`].
const BASE_EDGES: [(usize, usize); 30] = [
    (0, 2),
    (1, 3),
    (4, 6),
    (5, 7),
    (8, 10),
    (9, 11),
    (0, 4),
    (0, 6),
    (1, 4),
    (1, 6),
    (2, 5),
    (2, 7),
    (3, 5),
    (3, 7),
    (0, 8),
    (0, 9),
    (1, 10),
    (1, 11),
    (2, 8),
    (2, 9),
    (3, 10),
    (3, 11),
    (6, 9),
    (6, 11),
    (7, 9),
    (7, 11),
    (4, 8),
    (4, 10),
    (5, 8),
    (5, 10),
];

/// The 12 icosahedron corners as cyclic permutations of `(0, ±1, ±φ)`.
fn base_nodes() -> [DVec3; 12] {
    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
    [
        DVec3::new(0.0, -1.0, -phi),
        DVec3::new(0.0, -1.0, phi),
        DVec3::new(0.0, 1.0, -phi),
        DVec3::new(0.0, 1.0, phi),
        DVec3::new(-1.0, -phi, 0.0),
        DVec3::new(-1.0, phi, 0.0),
        DVec3::new(1.0, -phi, 0.0),
        DVec3::new(1.0, phi, 0.0),
        DVec3::new(-phi, 0.0, -1.0),
        DVec3::new(phi, 0.0, -1.0),
        DVec3::new(-phi, 0.0, 1.0),
        DVec3::new(phi, 0.0, 1.0),
    ]
}

/// `(nodes, edges, faces)` after `levels` subdivisions of the icosahedron.
pub fn expected_counts(levels: u32) -> (usize, usize, usize) {
    (0..levels).fold((12, 30, 20), |(n, e, f), _| (n + e, 2 * e + 3 * f, 4 * f))
}

/// A closed triangulated sphere derived from the icosahedron.
///
/// Node indices, edge indices and face indices are stable identities: nodes
/// are only ever appended, and only their coordinates change afterwards
/// (terrain displacement, rotation).
#[derive(Clone, Debug)]
pub struct GeodesicMesh {
    nodes: Vec<DVec3>,
    edges: Vec<Edge>,
    faces: Vec<Face>,
    radius: f64,
    level: u32,
}

impl GeodesicMesh {
    /// Build the 12-node icosahedron with every node at `diameter / 2`.
    pub fn icosahedron(diameter: f64) -> Result<Self, TopologyError> {
        if !(diameter > 0.0 && diameter.is_finite()) {
            return Err(TopologyError::InvalidDiameter(diameter));
        }
        let radius = diameter / 2.0;

        let nodes: Vec<DVec3> = base_nodes().iter().map(|n| n.normalize() * radius).collect();
        let edges: Vec<Edge> = BASE_EDGES.iter().map(|&(a, b)| Edge::new(a, b)).collect();
        let all: Vec<usize> = (0..edges.len()).collect();
        let faces: Vec<Face> = detect_faces(&edges, &all).into_iter().map(Face::new).collect();

        let mesh = Self {
            nodes,
            edges,
            faces,
            radius,
            level: 0,
        };
        mesh.check_counts()?;
        Ok(mesh)
    }

    /// Build an icosahedron and subdivide it `levels` times.
    pub fn build(diameter: f64, levels: u32) -> Result<Self, TopologyError> {
        Self::icosahedron(diameter)?.subdivide(levels)
    }

    /// Apply `levels` subdivision passes. Level 0 returns the mesh unchanged.
    pub fn subdivide(mut self, levels: u32) -> Result<Self, TopologyError> {
        for _ in 0..levels {
            self.subdivide_once()?;
            info!("Complexity level {} completed", self.level);
        }
        Ok(self)
    }

    /// Split every edge at its (re-normalized) midpoint and every face into four.
    fn subdivide_once(&mut self) -> Result<(), TopologyError> {
        let n = self.nodes.len();
        let e_count = self.edges.len();
        let f_count = self.faces.len();

        self.nodes.reserve(e_count);
        for edge in &self.edges {
            let mid = (self.nodes[edge.a] + self.nodes[edge.b]) * 0.5;
            self.nodes.push(mid.normalize() * self.radius);
        }

        // Edge `e` becomes half-edges `2e` (a side) and `2e + 1` (b side),
        // followed by three inner edges per face.
        let mut edges = Vec::with_capacity(2 * e_count + 3 * f_count);
        for (i, edge) in self.edges.iter().enumerate() {
            edges.push(Edge::new(edge.a, n + i));
            edges.push(Edge::new(edge.b, n + i));
        }

        let mut faces = Vec::with_capacity(4 * f_count);
        for (f, face) in self.faces.iter().enumerate() {
            let [e0, e1, e2] = face.edges;
            let inner = edges.len();
            edges.push(Edge::new(n + e0, n + e1));
            edges.push(Edge::new(n + e0, n + e2));
            edges.push(Edge::new(n + e1, n + e2));

            let local = [
                2 * e0,
                2 * e0 + 1,
                2 * e1,
                2 * e1 + 1,
                2 * e2,
                2 * e2 + 1,
                inner,
                inner + 1,
                inner + 2,
            ];
            let children = detect_faces(&edges, &local);
            if children.len() != 4 {
                return Err(TopologyError::SplitMismatch {
                    face: f,
                    found: children.len(),
                });
            }
            faces.extend(children.into_iter().map(Face::new));
        }

        self.edges = edges;
        self.faces = faces;
        self.level += 1;
        self.check_counts()?;
        debug!(
            level = self.level,
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            faces = self.faces.len(),
            "subdivided"
        );
        Ok(())
    }

    fn check_counts(&self) -> Result<(), TopologyError> {
        let expected = expected_counts(self.level);
        let actual = self.counts();
        if expected != actual {
            return Err(TopologyError::InvariantViolated {
                level: self.level,
                expected,
                actual,
            });
        }
        Ok(())
    }

    /// Verify that every face references a closed triangle.
    pub fn validate(&self) -> Result<(), TopologyError> {
        self.check_counts()?;
        for (i, face) in self.faces.iter().enumerate() {
            if !is_triangle(face.edges.map(|e| self.edges[e])) {
                return Err(TopologyError::MalformedFace {
                    face: i,
                    edges: face.edges,
                });
            }
        }
        Ok(())
    }

    /// The three node indices of a face: both ends of its first edge, then
    /// the far end of its second edge.
    pub fn face_nodes(&self, face: usize) -> [usize; 3] {
        let [e0, e1, _] = self.faces[face].edges;
        let first = self.edges[e0];
        let second = self.edges[e1];
        let apex = if first.touches(second.a) {
            second.b
        } else {
            second.a
        };
        [first.a, first.b, apex]
    }

    /// The three corner positions of a face.
    pub fn face_corners(&self, face: usize) -> [DVec3; 3] {
        self.face_nodes(face).map(|i| self.nodes[i])
    }

    /// Rotate every node about the origin, x then y then z.
    pub fn rotate(&mut self, step: RotationStep) {
        rotate_nodes(&mut self.nodes, step);
    }

    /// Replace all node positions at once.
    ///
    /// # Panics
    ///
    /// Panics if `nodes` does not hold exactly one position per existing
    /// node, since edges and faces refer to nodes by index.
    pub fn replace_nodes(&mut self, nodes: Vec<DVec3>) {
        assert_eq!(
            nodes.len(),
            self.nodes.len(),
            "node replacement must preserve node identities"
        );
        self.nodes = nodes;
    }

    /// Node positions, indexed by node identity.
    pub fn nodes(&self) -> &[DVec3] {
        &self.nodes
    }

    /// Edge table.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Face table.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Mutable face table; topology stays frozen, only face attributes change.
    pub fn faces_mut(&mut self) -> &mut [Face] {
        &mut self.faces
    }

    /// Base sphere radius (`diameter / 2`).
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Number of subdivision passes applied.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// `(nodes, edges, faces)`.
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.nodes.len(), self.edges.len(), self.faces.len())
    }
}
