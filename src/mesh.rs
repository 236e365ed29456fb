//! Mesh data model: vertices plus a symmetric adjacency relation.
//!
//! Edges and quadrilateral faces are not stored by the caller; both are
//! *derived* from the adjacency relation exactly once at construction.
//! Rigid transforms afterwards move vertices (and the centroid) but never
//! touch adjacency, edges, or faces, so only linear/affine maps are sound.

use crate::colors::{self, Color};
use crate::math::mat3::Mat3;
use crate::math::vec3::Vec3;

/// Symmetric boolean relation over vertex indices.
///
/// Self-loops are rejected by [`Adjacency::connect`], and symmetry is
/// enforced by construction; face extraction depends on both properties.
#[derive(Clone, Debug)]
pub struct Adjacency {
    size: usize,
    cells: Vec<bool>,
}

impl Adjacency {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    /// Builds the relation from a square 0/1 matrix, symmetrizing as it
    /// goes (an entry on either side of the diagonal connects the pair).
    pub fn from_matrix(rows: &[&[u8]]) -> Self {
        let mut adjacency = Self::new(rows.len());
        for (i, row) in rows.iter().enumerate() {
            for (j, &cell) in row.iter().enumerate() {
                if cell != 0 {
                    adjacency.connect(i, j);
                }
            }
        }
        adjacency
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Connects `i` and `j` in both directions. Self-loops are ignored.
    pub fn connect(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        self.cells[i * self.size + j] = true;
        self.cells[j * self.size + i] = true;
    }

    pub fn connected(&self, i: usize, j: usize) -> bool {
        self.cells[i * self.size + j]
    }
}

/// A scene object: vertex positions, the adjacency relation, and the edge
/// and face lists derived from it.
#[derive(Clone, Debug)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    adjacency: Adjacency,
    edges: Vec<(usize, usize)>,
    faces: Vec<[usize; 4]>,
    centroid: Vec3,
    color: Color,
}

impl Mesh {
    /// Builds a mesh and derives its edge and face lists.
    ///
    /// Face extraction enumerates every 4-combination of vertex indices,
    /// `O(C(N,4))` — fine for hand-built meshes of tens of vertices, not
    /// for large ones.
    ///
    /// # Panics
    /// Panics if the adjacency size does not match the vertex count.
    pub fn new(vertices: Vec<Vec3>, adjacency: Adjacency) -> Self {
        assert_eq!(
            vertices.len(),
            adjacency.len(),
            "adjacency size must match vertex count"
        );

        let edges = Self::derive_edges(&adjacency);
        let faces = Self::derive_faces(&adjacency);
        let centroid = Self::mean(&vertices);

        Self {
            vertices,
            adjacency,
            edges,
            faces,
            centroid,
            color: colors::WHITE,
        }
    }

    fn mean(vertices: &[Vec3]) -> Vec3 {
        if vertices.is_empty() {
            return Vec3::ZERO;
        }
        let sum = vertices.iter().fold(Vec3::ZERO, |acc, &v| acc + v);
        sum / vertices.len() as f32
    }

    /// All unordered connected pairs `(i, j)` with `i < j`.
    fn derive_edges(adjacency: &Adjacency) -> Vec<(usize, usize)> {
        let n = adjacency.len();
        let mut edges = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                if adjacency.connected(i, j) {
                    edges.push((i, j));
                }
            }
        }
        edges
    }

    /// Every 4-subset of vertices whose induced subgraph is a 4-cycle:
    /// each of the four has exactly two neighbors within the subset.
    /// Results are stored in cycle order (consecutive entries adjacent).
    fn derive_faces(adjacency: &Adjacency) -> Vec<[usize; 4]> {
        let n = adjacency.len();
        let mut faces = Vec::new();

        for a in 0..n {
            for b in (a + 1)..n {
                for c in (b + 1)..n {
                    for d in (c + 1)..n {
                        let candidate = [a, b, c, d];
                        if Self::is_four_cycle(adjacency, candidate) {
                            faces.push(Self::cycle_order(adjacency, candidate));
                        }
                    }
                }
            }
        }
        faces
    }

    fn is_four_cycle(adjacency: &Adjacency, candidate: [usize; 4]) -> bool {
        candidate.iter().all(|&v| {
            let degree = candidate
                .iter()
                .filter(|&&w| adjacency.connected(v, w))
                .count();
            degree == 2
        })
    }

    /// Reorders a known 4-cycle so consecutive entries are adjacent:
    /// first vertex, one neighbor, the opposite vertex, the other neighbor.
    fn cycle_order(adjacency: &Adjacency, candidate: [usize; 4]) -> [usize; 4] {
        let first = candidate[0];
        let mut neighbors = candidate[1..].iter().filter(|&&v| adjacency.connected(first, v));
        let near = *neighbors.next().expect("4-cycle vertex has two neighbors");
        let far = *neighbors.next().expect("4-cycle vertex has two neighbors");
        let opposite = *candidate[1..]
            .iter()
            .find(|&&v| v != near && v != far)
            .expect("4-cycle has an opposite vertex");
        [first, near, opposite, far]
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn vertex(&self, index: usize) -> Vec3 {
        self.vertices[index]
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn faces(&self) -> &[[usize; 4]] {
        &self.faces
    }

    pub fn centroid(&self) -> Vec3 {
        self.centroid
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// The world positions of a face's corners, in cycle order.
    pub fn face_vertices(&self, face: [usize; 4]) -> [Vec3; 4] {
        face.map(|i| self.vertices[i])
    }

    /// The adjacency relation restricted to a face's four corners.
    pub fn face_adjacency(&self, face: [usize; 4]) -> [[bool; 4]; 4] {
        let mut restricted = [[false; 4]; 4];
        for (r, &i) in face.iter().enumerate() {
            for (c, &j) in face.iter().enumerate() {
                restricted[r][c] = self.adjacency.connected(i, j);
            }
        }
        restricted
    }

    // =========================================================================
    // Rigid transforms — vertices and centroid only
    // =========================================================================

    pub fn translate(&mut self, offset: Vec3) {
        for vertex in &mut self.vertices {
            *vertex = *vertex + offset;
        }
        self.centroid = self.centroid + offset;
    }

    /// Applies a linear map about the world origin.
    pub fn apply(&mut self, transform: Mat3) {
        for vertex in &mut self.vertices {
            *vertex = transform * *vertex;
        }
        self.centroid = transform * self.centroid;
    }

    /// Applies a linear map about the mesh centroid (an affine transform),
    /// e.g. spinning an object in place.
    pub fn apply_about_centroid(&mut self, transform: Mat3) {
        let pivot = self.centroid;
        for vertex in &mut self.vertices {
            *vertex = pivot + transform * (*vertex - pivot);
        }
    }

    /// Moves the centroid to `position`.
    pub fn set_position(&mut self, position: Vec3) {
        let offset = position - self.centroid;
        self.translate(offset);
    }
}

// =============================================================================
// Tests
// =============================================================================
