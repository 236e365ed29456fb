//! Small dense vector/matrix primitives used throughout the renderer.

pub mod mat3;
pub mod vec2;
pub mod vec3;

use vec3::Vec3;

/// Intersects the line `line_start + t * line_dir` with the plane through
/// `plane_point` with normal `plane_normal`.
///
/// Returns `None` when the line is parallel to the plane (including the
/// degenerate zero-direction case), so callers never divide by zero. Callers
/// that need a finite fallback use `unwrap_or(Vec3::ZERO)`.
pub fn line_plane_intersection(
    line_start: Vec3,
    line_dir: Vec3,
    plane_point: Vec3,
    plane_normal: Vec3,
) -> Option<Vec3> {
    let denom = line_dir.dot(plane_normal);
    if denom.abs() <= f32::EPSILON {
        return None;
    }
    let t = (plane_point - line_start).dot(plane_normal) / denom;
    Some(line_start + line_dir * t)
}
