//! A CPU-based wireframe-and-faces 3D renderer.
//!
//! Meshes are vertices plus a symmetric adjacency relation; edges and
//! quadrilateral faces are derived from the relation at construction.
//! Rendering uses the painter's algorithm instead of a depth buffer: every
//! edge and face gets a scalar depth key, the whole queue is sorted back to
//! front, and nearer primitives simply overwrite farther ones. SDL2 is used
//! only for window management and display; all drawing is on the CPU.
//!
//! # Quick Start
//!
//! ```ignore
//! use paynter::prelude::*;
//!
//! let camera = Camera::new(Vec3::new(0.5, 0.5, -1.0), Vec3::new(-300.0, -300.0, 50.0), 500.0);
//! let cube = shapes::cube(60.0, Vec3::ZERO);
//! let light = PointLight::new(Vec3::new(100.0, 0.0, 200.0), 20_000.0);
//!
//! let mut scene = Scene::new();
//! scene.add_mesh(&cube);
//! scene.add_light(&light);
//!
//! let mut raster = Rasterizer::new(800, 600, 1.0);
//! Pipeline::default().process(&scene, &camera, &mut raster);
//! ```

pub mod camera;
pub mod colors;
pub mod light;
pub mod math;
pub mod mesh;
pub mod pipeline;
pub mod render;
pub mod shapes;
pub mod snapshot;
pub mod window;

pub use camera::Camera;
pub use light::PointLight;
pub use mesh::{Adjacency, Mesh};
pub use pipeline::{Pipeline, Scene, ShadingMode};
pub use render::Rasterizer;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use paynter::prelude::*;
/// ```
pub mod prelude {
    // Scene building
    pub use crate::light::PointLight;
    pub use crate::mesh::{Adjacency, Mesh};
    pub use crate::shapes;

    // Camera
    pub use crate::camera::{focal_distance_for_fov, Camera};

    // Pipeline
    pub use crate::pipeline::{draw_world_line, Pipeline, Scene, ShadingMode};

    // Math
    pub use crate::math::mat3::Mat3;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;

    // Colors
    pub use crate::colors::{self, Color};

    // Rendering
    pub use crate::render::Rasterizer;

    // Window & Input
    pub use crate::window::{FrameLimiter, InputState, Window};
}
