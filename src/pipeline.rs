//! World-to-screen pipeline: near-plane clipping, depth ordering, shading,
//! and primitive dispatch.
//!
//! There is no depth buffer. Every frame the pipeline collects all edges
//! and faces from the scene, clips them against the plane one unit in front
//! of the camera's focal point, assigns each a scalar depth key, sorts the
//! lot back to front, and draws in that order so nearer primitives
//! overwrite farther ones.
//!
//! Depth keys are deliberately asymmetric: edges sort by the squared
//! *planar* (XY) distance of their midpoint from the focal point, faces by
//! the squared 3D distance of their centroid. Mixing the two in one sorted
//! queue matches how wireframe floors and solid objects layer in practice.

use crate::camera::Camera;
use crate::colors::Color;
use crate::light::PointLight;
use crate::math::line_plane_intersection;
use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::mesh::Mesh;
use crate::render::Rasterizer;

/// Default render distance: the fog scale beyond which edges fade out.
pub const DEFAULT_RENDER_DISTANCE: f32 = 2000.0;

/// What gets drawn: meshes and the lights that shade them. Holds borrows
/// only, so callers keep mutating their meshes between frames.
#[derive(Default)]
pub struct Scene<'a> {
    meshes: Vec<&'a Mesh>,
    lights: Vec<&'a PointLight>,
}

impl<'a> Scene<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mesh(&mut self, mesh: &'a Mesh) {
        self.meshes.push(mesh);
    }

    pub fn add_light(&mut self, light: &'a PointLight) {
        self.lights.push(light);
    }

    pub fn meshes(&self) -> &[&'a Mesh] {
        &self.meshes
    }

    pub fn lights(&self) -> &[&'a PointLight] {
        &self.lights
    }
}

/// How face brightness is sampled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShadingMode {
    /// One brightness per face, sampled at its centroid.
    Flat,
    /// Brightness recomputed per pixel by casting a ray from the focal
    /// point through the pixel onto the face plane.
    Smooth,
}

pub struct Pipeline {
    pub render_distance: f32,
    pub shading: ShadingMode,
    pub fog: bool,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            render_distance: DEFAULT_RENDER_DISTANCE,
            shading: ShadingMode::Flat,
            fog: true,
        }
    }
}

enum Kind {
    Edge {
        a: Vec2,
        b: Vec2,
        color: Color,
    },
    Face {
        points: [Vec2; 4],
        adjacency: [[bool; 4]; 4],
        base: Color,
        normal: Vec3,
        centroid: Vec3,
    },
}

struct Primitive {
    depth: f32,
    kind: Kind,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders one frame of `scene` through `camera` into `raster`.
    pub fn process(&self, scene: &Scene, camera: &Camera, raster: &mut Rasterizer) {
        let mut queue = Vec::new();

        for &mesh in scene.meshes() {
            self.collect_edges(mesh, camera, &mut queue);
            self.collect_faces(mesh, camera, &mut queue);
        }

        // Back to front; the sort is stable so ties keep scene order.
        queue.sort_by(|a, b| b.depth.total_cmp(&a.depth));

        for primitive in queue {
            match primitive.kind {
                Kind::Edge { a, b, color } => raster.draw_line(a, b, color),
                Kind::Face {
                    points,
                    adjacency,
                    base,
                    normal,
                    centroid,
                } => self.draw_face(scene, camera, raster, points, adjacency, base, normal, centroid),
            }
        }
    }

    fn collect_edges(&self, mesh: &Mesh, camera: &Camera, queue: &mut Vec<Primitive>) {
        for &(i, j) in mesh.edges() {
            let Some((a, b)) = clip_segment(camera, mesh.vertex(i), mesh.vertex(j)) else {
                continue;
            };
            let midpoint = (a + b) / 2.0;
            let depth = (midpoint - camera.focal_point()).xy_magnitude_squared();

            let mut color = mesh.color();
            if self.fog {
                color = color.darken(self.fog_factor(depth));
            }

            queue.push(Primitive {
                depth,
                kind: Kind::Edge {
                    a: camera.project(a),
                    b: camera.project(b),
                    color,
                },
            });
        }
    }

    fn collect_faces(&self, mesh: &Mesh, camera: &Camera, queue: &mut Vec<Primitive>) {
        for &face in mesh.faces() {
            let Some(corners) = clip_face(camera, mesh.face_vertices(face)) else {
                continue;
            };
            let centroid = mean4(corners);
            let depth = (centroid - camera.focal_point()).magnitude_squared();
            let normal = outward_normal(corners, mesh.centroid());

            queue.push(Primitive {
                depth,
                kind: Kind::Face {
                    points: corners.map(|c| camera.project(c)),
                    adjacency: mesh.face_adjacency(face),
                    base: mesh.color(),
                    normal,
                    centroid,
                },
            });
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_face(
        &self,
        scene: &Scene,
        camera: &Camera,
        raster: &mut Rasterizer,
        points: [Vec2; 4],
        adjacency: [[bool; 4]; 4],
        base: Color,
        normal: Vec3,
        centroid: Vec3,
    ) {
        let lights = scene.lights();
        let flat = base.darken(brightness(lights, centroid, normal));

        match self.shading {
            ShadingMode::Flat => raster.draw_quadrilateral(&adjacency, points, |_, _| flat),
            ShadingMode::Smooth => {
                let scale = raster.scale();
                raster.draw_quadrilateral(&adjacency, points, |dx, dy| {
                    let plane_coords = Vec2::new(dx as f32 / scale, -(dy as f32) / scale);
                    let through = camera.unproject(plane_coords);
                    let direction = through - camera.focal_point();
                    match line_plane_intersection(camera.focal_point(), direction, centroid, normal)
                    {
                        Some(surface) => base.darken(brightness(lights, surface, normal)),
                        None => flat,
                    }
                });
            }
        }
    }

    /// Fog falloff for an edge at squared planar distance `depth_sq`:
    /// near 1 close in, dropping to 0 past the render distance.
    fn fog_factor(&self, depth_sq: f32) -> f32 {
        let scale = 0.6 * self.render_distance;
        (-(depth_sq / (scale * scale)).powi(3)).exp()
    }
}

/// Projects and draws a single world-space segment, clipped like any mesh
/// edge. Overlays (axis markers, debug lines) use this directly.
pub fn draw_world_line(camera: &Camera, raster: &mut Rasterizer, a: Vec3, b: Vec3, color: Color) {
    if let Some((a, b)) = clip_segment(camera, a, b) {
        raster.draw_line(camera.project(a), camera.project(b), color);
    }
}

// =============================================================================
// Clipping
// =============================================================================

/// The clip plane sits one unit in front of the focal point, so geometry at
/// or behind the pinhole never reaches projection.
fn clip_plane(camera: &Camera) -> (Vec3, Vec3) {
    (camera.focal_point() + camera.normal(), camera.normal())
}

fn is_behind(camera: &Camera, point: Vec3) -> bool {
    let (clip_point, normal) = clip_plane(camera);
    (point - clip_point).dot(normal) <= 0.0
}

/// Clips a segment against the camera's clip plane: `None` when both
/// endpoints are behind it, otherwise the visible sub-segment with any
/// hidden endpoint replaced by the exact plane crossing.
fn clip_segment(camera: &Camera, a: Vec3, b: Vec3) -> Option<(Vec3, Vec3)> {
    let (clip_point, normal) = clip_plane(camera);
    match (is_behind(camera, a), is_behind(camera, b)) {
        (true, true) => None,
        (false, false) => Some((a, b)),
        (a_hidden, _) => {
            let hit = line_plane_intersection(a, b - a, clip_point, normal)?;
            if a_hidden {
                Some((hit, b))
            } else {
                Some((a, hit))
            }
        }
    }
}

/// Clips a face against the camera's clip plane. Fully visible faces pass
/// through; fully hidden faces (or faces whose centroid is hidden) drop.
/// A partially hidden face keeps four corners: each hidden corner slides
/// along its ray toward the face centroid until it reaches the plane, an
/// approximation of the true clipped polygon.
fn clip_face(camera: &Camera, corners: [Vec3; 4]) -> Option<[Vec3; 4]> {
    let hidden = corners.map(|c| is_behind(camera, c));
    if hidden.iter().all(|&h| h) {
        return None;
    }
    if !hidden.iter().any(|&h| h) {
        return Some(corners);
    }

    let centroid = mean4(corners);
    if is_behind(camera, centroid) {
        return None;
    }

    let (clip_point, normal) = clip_plane(camera);
    let mut clipped = corners;
    for (corner, &is_hidden) in clipped.iter_mut().zip(&hidden) {
        if is_hidden {
            *corner = line_plane_intersection(*corner, centroid - *corner, clip_point, normal)?;
        }
    }
    Some(clipped)
}

// =============================================================================
// Shading
// =============================================================================

fn mean4(corners: [Vec3; 4]) -> Vec3 {
    (corners[0] + corners[1] + corners[2] + corners[3]) / 4.0
}

/// Unit normal of a cycle-ordered face, flipped if necessary so it points
/// away from the owning mesh's centroid.
fn outward_normal(corners: [Vec3; 4], mesh_centroid: Vec3) -> Vec3 {
    let raw = (corners[1] - corners[0])
        .cross(corners[3] - corners[0])
        .normalize_or(Vec3::Z);
    let face_centroid = mean4(corners);
    if raw.dot(mesh_centroid - face_centroid) > 0.0 {
        -raw
    } else {
        raw
    }
}

/// Summed diffuse contribution of all lights at a surface point, clamped to
/// [0, 1]. A light only contributes when it strikes the outward side of the
/// face.
fn brightness(lights: &[&PointLight], point: Vec3, normal: Vec3) -> f32 {
    let mut total = 0.0;
    for light in lights {
        let (ray, distance) = light.ray_to(point);
        let incidence = normal.dot(ray);
        if incidence < 0.0 {
            total += -incidence * light.attenuation(distance);
        }
    }
    total.clamp(0.0, 1.0)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;
    use crate::mesh::Adjacency;
    use approx::assert_relative_eq;

    /// Camera on the +X axis looking along +X, focal point at the origin.
    fn test_camera() -> Camera {
        Camera::new(Vec3::X, Vec3::new(1.0, 0.0, 0.0), 1.0)
    }

    /// A single-face square mesh in the YZ plane at the given x.
    fn square_at(x: f32, color: Color) -> Mesh {
        let mut adjacency = Adjacency::new(4);
        adjacency.connect(0, 1);
        adjacency.connect(1, 2);
        adjacency.connect(2, 3);
        adjacency.connect(3, 0);
        let mut mesh = Mesh::new(
            vec![
                Vec3::new(x, -2.0, -2.0),
                Vec3::new(x, 2.0, -2.0),
                Vec3::new(x, 2.0, 2.0),
                Vec3::new(x, -2.0, 2.0),
            ],
            adjacency,
        );
        mesh.set_color(color);
        mesh
    }

    /// A two-vertex wire mesh spanning `a`-`b`.
    fn wire(a: Vec3, b: Vec3, color: Color) -> Mesh {
        let mut adjacency = Adjacency::new(2);
        adjacency.connect(0, 1);
        let mut mesh = Mesh::new(vec![a, b], adjacency);
        mesh.set_color(color);
        mesh
    }

    #[test]
    fn segment_behind_the_camera_is_dropped() {
        let camera = test_camera();
        let clipped = clip_segment(
            &camera,
            Vec3::new(-5.0, 0.0, 0.0),
            Vec3::new(-10.0, 3.0, 0.0),
        );
        assert!(clipped.is_none());
    }

    #[test]
    fn fully_visible_segment_passes_through() {
        let camera = test_camera();
        let a = Vec3::new(5.0, 1.0, 0.0);
        let b = Vec3::new(9.0, -2.0, 1.0);
        assert_eq!(clip_segment(&camera, a, b), Some((a, b)));
    }

    #[test]
    fn crossing_segment_is_cut_at_the_clip_plane() {
        let camera = test_camera();
        let visible = Vec3::new(10.0, 0.0, 0.0);
        let hidden = Vec3::new(-10.0, 0.0, 0.0);
        let (a, b) = clip_segment(&camera, hidden, visible).unwrap();
        assert_eq!(b, visible);
        // The replacement endpoint lies on the clip plane.
        let (clip_point, normal) = clip_plane(&camera);
        assert_relative_eq!((a - clip_point).dot(normal), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn hidden_face_is_dropped() {
        let camera = test_camera();
        let corners = square_at(-10.0, colors::WHITE).face_vertices([0, 1, 2, 3]);
        assert!(clip_face(&camera, corners).is_none());
    }

    #[test]
    fn visible_face_passes_through() {
        let camera = test_camera();
        let corners = square_at(10.0, colors::WHITE).face_vertices([0, 1, 2, 3]);
        assert_eq!(clip_face(&camera, corners), Some(corners));
    }

    #[test]
    fn partially_hidden_face_keeps_four_corners_on_the_visible_side() {
        let camera = test_camera();
        // Slanted quad: two corners in front, two behind.
        let corners = [
            Vec3::new(10.0, -2.0, -2.0),
            Vec3::new(10.0, 2.0, -2.0),
            Vec3::new(-4.0, 2.0, 2.0),
            Vec3::new(-4.0, -2.0, 2.0),
        ];
        let clipped = clip_face(&camera, corners).unwrap();
        for corner in clipped {
            assert!(!is_behind(&camera, corner) || {
                let (clip_point, normal) = clip_plane(&camera);
                (corner - clip_point).dot(normal).abs() < 1e-3
            });
        }
    }

    #[test]
    fn light_on_the_outward_side_brightens() {
        let normal = Vec3::Z;
        let above = PointLight::new(Vec3::new(0.0, 0.0, 10.0), 1000.0);
        let below = PointLight::new(Vec3::new(0.0, 0.0, -10.0), 1000.0);
        assert!(brightness(&[&above], Vec3::ZERO, normal) > 0.5);
        assert_relative_eq!(brightness(&[&below], Vec3::ZERO, normal), 0.0);
    }

    #[test]
    fn brightness_is_clamped() {
        let light = PointLight::new(Vec3::new(0.0, 0.0, 1.0), 1e9);
        let lights: Vec<&PointLight> = vec![&light; 5];
        assert!(brightness(&lights, Vec3::ZERO, Vec3::Z) <= 1.0);
    }

    #[test]
    fn outward_normal_points_away_from_the_mesh() {
        let corners = [
            Vec3::new(10.0, -2.0, -2.0),
            Vec3::new(10.0, 2.0, -2.0),
            Vec3::new(10.0, 2.0, 2.0),
            Vec3::new(10.0, -2.0, 2.0),
        ];
        // Mesh body on the -X side: the normal must face +X.
        let normal = outward_normal(corners, Vec3::new(5.0, 0.0, 0.0));
        assert!(normal.x > 0.9);
    }

    #[test]
    fn nearer_edge_wins_the_center_pixel() {
        let camera = test_camera();
        let near = wire(
            Vec3::new(10.0, 0.0, -5.0),
            Vec3::new(10.0, 0.0, 5.0),
            colors::RED,
        );
        let far = wire(
            Vec3::new(20.0, 0.0, -5.0),
            Vec3::new(20.0, 0.0, 5.0),
            colors::BLUE,
        );
        let mut scene = Scene::new();
        scene.add_mesh(&far);
        scene.add_mesh(&near);

        let pipeline = Pipeline {
            fog: false,
            ..Pipeline::default()
        };
        let mut raster = Rasterizer::new(64, 64, 40.0);
        pipeline.process(&scene, &camera, &mut raster);

        assert_eq!(raster.pixel(32, 32), Some(colors::RED));
    }

    #[test]
    fn fog_darkens_distant_edges() {
        let camera = test_camera();
        let near = wire(
            Vec3::new(5.0, -1.0, 0.0),
            Vec3::new(5.0, 1.0, 0.0),
            colors::RED,
        );
        let far = wire(
            Vec3::new(120.0, -1.0, 0.0),
            Vec3::new(120.0, 1.0, 0.0),
            colors::RED,
        );

        let pipeline = Pipeline {
            render_distance: 100.0,
            ..Pipeline::default()
        };

        let mut near_raster = Rasterizer::new(64, 64, 40.0);
        let mut near_scene = Scene::new();
        near_scene.add_mesh(&near);
        pipeline.process(&near_scene, &camera, &mut near_raster);

        let mut far_raster = Rasterizer::new(64, 64, 40.0);
        let mut far_scene = Scene::new();
        far_scene.add_mesh(&far);
        pipeline.process(&far_scene, &camera, &mut far_raster);

        let near_pixel = near_raster.pixel(32, 32).unwrap();
        let far_pixel = far_raster.pixel(32, 32).unwrap();
        assert!(near_pixel.r() > 200);
        assert!(far_pixel.r() < near_pixel.r());
    }

    #[test]
    fn lit_face_renders_in_its_base_hue() {
        let camera = test_camera();
        let mesh = square_at(10.0, colors::RED);
        let light = PointLight::new(Vec3::new(30.0, 0.0, 0.0), 100.0);
        let mut scene = Scene::new();
        scene.add_mesh(&mesh);
        scene.add_light(&light);

        let pipeline = Pipeline::default();
        let mut raster = Rasterizer::new(64, 64, 40.0);
        pipeline.process(&scene, &camera, &mut raster);

        let pixel = raster.pixel(32, 32).unwrap();
        assert!(pixel.r() > 50, "face should be lit, got {pixel:?}");
        assert_eq!(pixel.g(), 0);
        assert_eq!(pixel.b(), 0);
    }

    #[test]
    fn unlit_face_renders_black() {
        let camera = test_camera();
        let mesh = square_at(10.0, colors::RED);
        let mut scene = Scene::new();
        scene.add_mesh(&mesh);

        let pipeline = Pipeline::default();
        let mut raster = Rasterizer::new(64, 64, 40.0);
        pipeline.process(&scene, &camera, &mut raster);

        assert_eq!(raster.pixel(32, 32), Some(colors::BLACK));
    }

    #[test]
    fn smooth_shading_covers_the_same_face_region() {
        let camera = test_camera();
        let mesh = square_at(10.0, colors::RED);
        let light = PointLight::new(Vec3::new(30.0, 0.0, 0.0), 100.0);
        let mut scene = Scene::new();
        scene.add_mesh(&mesh);
        scene.add_light(&light);

        let pipeline = Pipeline {
            shading: ShadingMode::Smooth,
            ..Pipeline::default()
        };
        let mut raster = Rasterizer::new(64, 64, 40.0);
        pipeline.process(&scene, &camera, &mut raster);

        let pixel = raster.pixel(32, 32).unwrap();
        assert!(pixel.r() > 50, "face should be lit, got {pixel:?}");
    }

    #[test]
    fn rendering_is_deterministic() {
        let camera = test_camera();
        let mesh = square_at(10.0, colors::CYAN);
        let light = PointLight::new(Vec3::new(30.0, 5.0, 5.0), 500.0);

        let render = || {
            let mut scene = Scene::new();
            scene.add_mesh(&mesh);
            scene.add_light(&light);
            let mut raster = Rasterizer::new(48, 48, 30.0);
            Pipeline::default().process(&scene, &camera, &mut raster);
            raster.buffer().to_vec()
        };
        assert_eq!(render(), render());
    }

    #[test]
    fn world_line_overlay_is_clipped_too() {
        let camera = test_camera();
        let mut raster = Rasterizer::new(32, 32, 10.0);
        draw_world_line(
            &camera,
            &mut raster,
            Vec3::new(-5.0, 0.0, 0.0),
            Vec3::new(-9.0, 2.0, 0.0),
            colors::WHITE,
        );
        assert!(raster.buffer().iter().all(|&p| p == 0));
    }
}
