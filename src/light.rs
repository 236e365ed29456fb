//! Lighting types for the renderer.

use crate::colors::{self, Color};
use crate::math::vec3::Vec3;

/// A point light with distance falloff.
///
/// `strength` sets the falloff scale: a surface at distance `d` receives
/// `1 / (1 + d/strength)^2` of the light, so larger strengths reach
/// farther before fading.
#[derive(Clone, Debug)]
pub struct PointLight {
    pub source: Vec3,
    pub strength: f32,
    pub color: Color,
}

impl PointLight {
    /// Creates a white point light. `strength` is clamped positive.
    pub fn new(source: Vec3, strength: f32) -> Self {
        Self {
            source,
            strength: strength.max(f32::EPSILON),
            color: colors::WHITE,
        }
    }

    /// The unit ray from the light source toward `point`, with the distance
    /// covered. A query at the source itself gets a default downward ray
    /// rather than a division fault.
    pub fn ray_to(&self, point: Vec3) -> (Vec3, f32) {
        let offset = point - self.source;
        let distance = offset.magnitude();
        (offset.normalize_or(-Vec3::Z), distance)
    }

    /// Distance falloff factor in (0, 1].
    pub fn attenuation(&self, distance: f32) -> f32 {
        let scaled = 1.0 + distance / self.strength;
        1.0 / (scaled * scaled)
    }
}
