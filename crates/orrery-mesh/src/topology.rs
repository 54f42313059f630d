//! Edge/face records and combinatorial triangle recovery.
//!
//! Faces are stored as triples of edge indices rather than node indices, so
//! recovering a face's corners (and checking that it is a real triangle)
//! goes through the edge table.

use glam::DVec3;
use hashbrown::HashMap;

/// An 8-bit RGBA color.
pub type Rgba = [u8; 4];

/// An undirected edge between two distinct nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    /// First endpoint (node index).
    pub a: usize,
    /// Second endpoint (node index).
    pub b: usize,
}

impl Edge {
    /// Create an edge between two nodes.
    ///
    /// Self-loops are a construction bug, never valid input.
    pub fn new(a: usize, b: usize) -> Self {
        debug_assert_ne!(a, b, "edge endpoints must be distinct");
        Self { a, b }
    }

    /// Order-independent key, smallest endpoint first.
    pub fn key(&self) -> (usize, usize) {
        if self.a < self.b {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }

    /// Returns `true` if `node` is one of the endpoints.
    pub fn touches(&self, node: usize) -> bool {
        self.a == node || self.b == node
    }

    /// The endpoint opposite `node`. `node` must be an endpoint.
    pub fn other(&self, node: usize) -> usize {
        if self.a == node { self.b } else { self.a }
    }
}

/// A triangular face: three edge indices plus the classification results
/// written onto it later in the pipeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    /// Indices into the owning mesh's edge table.
    pub edges: [usize; 3],
    /// Biome color, assigned by classification.
    pub biome: Option<Rgba>,
    /// Whether this face carries a cloud patch.
    pub cloud: bool,
}

impl Face {
    /// An unclassified face over the given edges.
    pub fn new(edges: [usize; 3]) -> Self {
        Self {
            edges,
            biome: None,
            cloud: false,
        }
    }
}

/// Returns `true` if the three edges close into a triangle: exactly three
/// distinct endpoints, each shared by exactly two of the edges.
pub fn is_triangle(edges: [Edge; 3]) -> bool {
    let mut counts: [(usize, u8); 3] = [(usize::MAX, 0); 3];
    let mut distinct = 0;

    for edge in edges {
        if edge.a == edge.b {
            return false;
        }
        for node in [edge.a, edge.b] {
            if let Some(slot) = counts[..distinct].iter_mut().find(|(n, _)| *n == node) {
                slot.1 += 1;
            } else if distinct < 3 {
                counts[distinct] = (node, 1);
                distinct += 1;
            } else {
                return false;
            }
        }
    }

    distinct == 3 && counts.iter().all(|&(_, c)| c == 2)
}

/// Recover every triangle formed among `candidates` (indices into `edges`).
///
/// Builds a node -> incident-edge table once, then for each edge walks the
/// edges incident at either endpoint and looks up the closing edge. Each
/// triangle is reported once, with its edge indices in ascending order, so
/// the output order is a pure function of the input.
pub fn detect_faces(edges: &[Edge], candidates: &[usize]) -> Vec<[usize; 3]> {
    let mut incident: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut by_nodes: HashMap<(usize, usize), usize> = HashMap::with_capacity(candidates.len());

    let mut ordered = candidates.to_vec();
    ordered.sort_unstable();

    for &e in &ordered {
        let edge = edges[e];
        incident.entry(edge.a).or_default().push(e);
        incident.entry(edge.b).or_default().push(e);
        by_nodes.insert(edge.key(), e);
    }

    let mut faces = Vec::new();
    for &i in &ordered {
        let edge = edges[i];
        for (pivot, far) in [(edge.a, edge.b), (edge.b, edge.a)] {
            for &j in incident.get(&pivot).into_iter().flatten() {
                if j <= i {
                    continue;
                }
                let apex = edges[j].other(pivot);
                if apex == far {
                    continue;
                }
                if let Some(&k) = by_nodes.get(&Edge::new(far, apex).key())
                    && k > j
                {
                    faces.push([i, j, k]);
                }
            }
        }
    }

    faces
}

/// Arithmetic mean of three points.
#[inline]
pub fn triangle_centroid(a: DVec3, b: DVec3, c: DVec3) -> DVec3 {
    (a + b + c) / 3.0
}

/// Unnormalized face normal `(b - a) x (c - a)`. Its sign follows the
/// vertex order.
#[inline]
pub fn triangle_normal(a: DVec3, b: DVec3, c: DVec3) -> DVec3 {
    (b - a).cross(c - a)
}
