//! Orbit camera and perspective projection.
//!
//! # Coordinate System
//!
//! The world is **z-up**: X and Y span the ground plane and +Z is vertical.
//!
//! # Model
//!
//! The camera is a pinhole behind a projection plane. The *focal point* is
//! the pinhole; the *camera plane* passes through `position` with normal
//! `normal`, at distance `focal_distance` in front of the focal point.
//! Projection intersects the ray from the focal point through a world point
//! with that plane, then reads the hit off in the plane's orthonormal basis.
//!
//! The invariant `position == focal_point + normal * focal_distance` holds
//! after every mutation; rotation pivots about the focal point.

use crate::math::mat3::Mat3;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::math::line_plane_intersection;

/// Smallest accepted focal distance. A zero focal distance would collapse
/// the camera plane onto the pinhole and make every projection degenerate,
/// so construction and `set_focus` clamp to this instead.
pub const MIN_FOCAL_DISTANCE: f32 = 1e-3;

/// Converts a horizontal field of view in degrees into the focal distance
/// that shows it across a viewport of `viewport_width` pixels (at scale 1,
/// plane coordinates are pixels). The angle is clamped to (0, 180) degrees
/// so the tangent stays finite.
pub fn focal_distance_for_fov(fov_degrees: f32, viewport_width: f32) -> f32 {
    let fov = fov_degrees.clamp(1e-2, 180.0 - 1e-2).to_radians();
    viewport_width / (2.0 * (fov / 2.0).tan())
}

#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    focal_point: Vec3,
    normal: Vec3,
    focal_distance: f32,
    plane_basis: [Vec3; 2],
}

impl Camera {
    /// Creates a camera at `position` facing along `normal` (normalized
    /// internally), with the focal point `focal_distance` behind it.
    pub fn new(normal: Vec3, position: Vec3, focal_distance: f32) -> Self {
        let normal = normal.normalize_or(Vec3::X);
        let focal_distance = focal_distance.max(MIN_FOCAL_DISTANCE);
        Self {
            position,
            focal_point: position - normal * focal_distance,
            normal,
            focal_distance,
            plane_basis: Self::derive_basis(normal),
        }
    }

    /// Orthonormal basis for the plane orthogonal to `normal`.
    ///
    /// The first basis vector is horizontal (orthogonal to the world
    /// vertical), which `rotate` relies on as its pitch axis. When the
    /// normal itself is vertical the X axis stands in.
    fn derive_basis(normal: Vec3) -> [Vec3; 2] {
        let horizontal = normal.cross(Vec3::Z).normalize_or(Vec3::X);
        let vertical = horizontal.cross(normal).normalize_or(Vec3::Z);
        [horizontal, vertical]
    }

    // =========================================================================
    // Mutation — every path re-derives position and the plane basis
    // =========================================================================

    /// Points the camera along a new facing direction, keeping the focal
    /// point fixed.
    pub fn set_facing(&mut self, normal: Vec3) {
        self.normal = normal.normalize_or(self.normal);
        self.position = self.focal_point + self.normal * self.focal_distance;
        self.plane_basis = Self::derive_basis(self.normal);
    }

    /// Orbits the camera about its focal point: `vertical` tilts about the
    /// plane's horizontal basis vector, then `horizontal` swings the result
    /// about the world vertical axis.
    pub fn rotate(&mut self, horizontal: f32, vertical: f32) {
        let rotation = self.rotation(horizontal, vertical);
        self.normal = (rotation * self.normal).normalize_or(self.normal);
        self.position = self.focal_point + self.normal * self.focal_distance;
        self.plane_basis = Self::derive_basis(self.normal);
    }

    /// The rotation matrix `rotate` applies for the given angles.
    pub fn rotation(&self, horizontal: f32, vertical: f32) -> Mat3 {
        Mat3::rotation_z(-horizontal) * Mat3::rotation_about_axis(self.plane_basis[0], vertical)
    }

    /// Changes the focal distance, clamped to [`MIN_FOCAL_DISTANCE`]. The
    /// focal point stays put and the camera plane slides along the normal.
    pub fn set_focus(&mut self, focal_distance: f32) {
        self.focal_distance = focal_distance.max(MIN_FOCAL_DISTANCE);
        self.position = self.focal_point + self.normal * self.focal_distance;
    }

    /// Moves the focal point to `point` without changing orientation.
    pub fn set_position(&mut self, point: Vec3) {
        self.focal_point = point;
        self.position = point + self.normal * self.focal_distance;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn focal_point(&self) -> Vec3 {
        self.focal_point
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn focal_distance(&self) -> f32 {
        self.focal_distance
    }

    pub fn plane_basis(&self) -> [Vec3; 2] {
        self.plane_basis
    }

    // =========================================================================
    // Projection
    // =========================================================================

    /// Projects a world point into 2D camera-plane coordinates.
    ///
    /// Intersects the ray from the focal point through `point` with the
    /// camera plane and expresses the hit in the plane basis, with the
    /// camera position as origin. A ray parallel to the plane (a point
    /// exactly level with the pinhole) projects to the origin instead of
    /// faulting; the pipeline clips such geometry before it gets here.
    pub fn project(&self, point: Vec3) -> Vec2 {
        let direction = point - self.focal_point;
        match line_plane_intersection(self.focal_point, direction, self.position, self.normal) {
            Some(hit) => {
                let in_plane = hit - self.position;
                Vec2::new(
                    self.plane_basis[0].dot(in_plane),
                    self.plane_basis[1].dot(in_plane),
                )
            }
            None => Vec2::ZERO,
        }
    }

    /// Reconstructs the world point on the camera plane for the given
    /// plane coordinates. Inverse of [`Camera::project`] for in-plane
    /// points; the smooth shader uses it to cast per-pixel rays.
    pub fn unproject(&self, plane_coords: Vec2) -> Vec3 {
        self.position
            + self.plane_basis[0] * plane_coords.x
            + self.plane_basis[1] * plane_coords.y
    }
}

// =============================================================================
// Tests
// =============================================================================
