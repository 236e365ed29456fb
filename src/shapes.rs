//! Reference mesh generators.
//!
//! Three hand-built shapes drive the renderer: an 8-vertex cube with an
//! explicit adjacency matrix, a latitude/longitude sphere approximation
//! whose adjacency is built procedurally from a resolution parameter, and a
//! 4-connected planar grid surface. All three produce symmetric, loop-free
//! adjacency, which face extraction requires.

use crate::math::vec3::Vec3;
use crate::mesh::{Adjacency, Mesh};

/// An axis-aligned cube of the given side length centered on `position`.
///
/// The adjacency matrix connects each corner to its three axis neighbors,
/// so the derived face list is exactly the six sides.
pub fn cube(side_length: f32, position: Vec3) -> Mesh {
    let s = side_length;
    let vertices = vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(s, 0.0, 0.0),
        Vec3::new(0.0, s, 0.0),
        Vec3::new(0.0, 0.0, s),
        Vec3::new(s, s, 0.0),
        Vec3::new(0.0, s, s),
        Vec3::new(s, 0.0, s),
        Vec3::new(s, s, s),
    ];

    let adjacency = Adjacency::from_matrix(&[
        &[0, 1, 1, 1, 0, 0, 0, 0],
        &[1, 0, 0, 0, 1, 0, 1, 0],
        &[1, 0, 0, 0, 1, 1, 0, 0],
        &[1, 0, 0, 0, 0, 1, 1, 0],
        &[0, 1, 1, 0, 0, 0, 0, 1],
        &[0, 0, 1, 1, 0, 0, 0, 1],
        &[0, 1, 0, 1, 0, 0, 0, 1],
        &[0, 0, 0, 0, 1, 1, 1, 0],
    ]);

    let mut mesh = Mesh::new(vertices, adjacency);
    mesh.set_position(position);
    mesh
}

/// A latitude/longitude sphere approximation centered on `position`.
///
/// `resolution` controls tessellation: `4 * resolution` meridians and
/// `2 * resolution - 1` latitude rings between the poles. Adjacency runs
/// along meridians and rings, with the poles stitched to the first and
/// last rings. Quadrilateral faces fall out of the ring/meridian lattice;
/// the pole caps stay wireframe (their cells are triangles).
pub fn sphere(radius: f32, resolution: usize, position: Vec3) -> Mesh {
    let resolution = resolution.max(1);
    let meridians = 4 * resolution;
    let rings = 2 * resolution - 1;
    let step = std::f32::consts::PI / (2 * resolution) as f32;

    // north pole, then ring points meridian by meridian, then south pole
    let mut vertices = Vec::with_capacity(meridians * rings + 2);
    vertices.push(position + Vec3::Z * radius);
    for m in 0..meridians {
        let longitude = step * m as f32;
        for k in 1..=rings {
            let polar = step * k as f32;
            vertices.push(
                position
                    + Vec3::new(
                        radius * polar.sin() * longitude.cos(),
                        radius * polar.sin() * longitude.sin(),
                        radius * polar.cos(),
                    ),
            );
        }
    }
    let south = vertices.len();
    vertices.push(position - Vec3::Z * radius);

    let ring_index = |m: usize, k: usize| 1 + m * rings + (k - 1);

    let mut adjacency = Adjacency::new(vertices.len());
    for m in 0..meridians {
        adjacency.connect(0, ring_index(m, 1));
        adjacency.connect(south, ring_index(m, rings));

        for k in 1..=rings {
            if k < rings {
                adjacency.connect(ring_index(m, k), ring_index(m, k + 1));
            }
            adjacency.connect(ring_index(m, k), ring_index((m + 1) % meridians, k));
        }
    }

    Mesh::new(vertices, adjacency)
}

/// A flat `size x size` grid surface in the XY plane, 4-connected, centered
/// on the origin. Every unit cell becomes a quadrilateral face.
pub fn grid_surface(size: usize, spacing: f32) -> Mesh {
    grid_surface_with(size, spacing, |_, _| 0.0)
}

/// A grid surface with heights sampled from `f(x, y)` at construction.
/// Heights are baked into the vertices before edge/face derivation, so the
/// usual transform restrictions do not apply to `f`.
pub fn grid_surface_with(size: usize, spacing: f32, f: impl Fn(f32, f32) -> f32) -> Mesh {
    let half = (size.saturating_sub(1)) as f32 / 2.0;

    let mut vertices = Vec::with_capacity(size * size);
    for i in 0..size {
        for j in 0..size {
            let x = (i as f32 - half) * spacing;
            let y = (j as f32 - half) * spacing;
            vertices.push(Vec3::new(x, y, f(x, y)));
        }
    }

    let index = |i: usize, j: usize| i * size + j;
    let mut adjacency = Adjacency::new(vertices.len());
    for i in 0..size {
        for j in 0..size {
            if i + 1 < size {
                adjacency.connect(index(i, j), index(i + 1, j));
            }
            if j + 1 < size {
                adjacency.connect(index(i, j), index(i, j + 1));
            }
        }
    }

    Mesh::new(vertices, adjacency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cube_is_centered_on_its_position() {
        let mesh = cube(4.0, Vec3::new(10.0, -2.0, 3.0));
        assert_relative_eq!(mesh.centroid().x, 10.0, epsilon = 1e-4);
        assert_relative_eq!(mesh.centroid().y, -2.0, epsilon = 1e-4);
        assert_relative_eq!(mesh.centroid().z, 3.0, epsilon = 1e-4);
    }

    #[test]
    fn cube_faces_are_planar_squares() {
        let mesh = cube(2.0, Vec3::ZERO);
        for face in mesh.faces() {
            let [a, b, c, d] = mesh.face_vertices(*face);
            // Cycle-ordered corners of an axis-aligned cube side: all four
            // edges have the side length.
            for (p, q) in [(a, b), (b, c), (c, d), (d, a)] {
                assert_relative_eq!((q - p).magnitude(), 2.0, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn sphere_vertices_lie_on_the_sphere() {
        let radius = 5.0;
        let center = Vec3::new(1.0, 2.0, 3.0);
        let mesh = sphere(radius, 2, center);
        for &vertex in mesh.vertices() {
            assert_relative_eq!((vertex - center).magnitude(), radius, epsilon = 1e-3);
        }
    }

    #[test]
    fn sphere_vertex_count_matches_resolution() {
        let resolution = 2;
        let mesh = sphere(1.0, resolution, Vec3::ZERO);
        let meridians = 4 * resolution;
        let rings = 2 * resolution - 1;
        assert_eq!(mesh.vertices().len(), meridians * rings + 2);
    }

    #[test]
    fn sphere_lattice_produces_quads() {
        let mesh = sphere(1.0, 2, Vec3::ZERO);
        assert!(!mesh.faces().is_empty());
    }

    #[test]
    fn grid_is_four_connected() {
        let mesh = grid_surface(3, 1.0);
        // 3x3 grid: 2*3 horizontal runs of 2 edges each, both directions.
        assert_eq!(mesh.edges().len(), 12);
        // Four unit cells.
        assert_eq!(mesh.faces().len(), 4);
    }

    #[test]
    fn grid_heights_come_from_the_sampler() {
        let mesh = grid_surface_with(3, 2.0, |x, y| x + y);
        for &vertex in mesh.vertices() {
            assert_relative_eq!(vertex.z, vertex.x + vertex.y, epsilon = 1e-5);
        }
    }
}
