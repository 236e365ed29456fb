use paynter::prelude::*;
use paynter::snapshot;
use paynter::window;

const FOV_DEGREES: f32 = 90.0;
const ORBIT_SENSITIVITY: f32 = 0.005;

fn main() -> Result<(), String> {
    let mut window = Window::new("paynter", window::WINDOW_WIDTH, window::WINDOW_HEIGHT)?;
    let mut raster = Rasterizer::new(window.width(), window.height(), 1.0);

    let mut camera = Camera::new(
        Vec3::new(0.5, 0.5, -1.0),
        Vec3::new(-300.0, -300.0, 50.0),
        focal_distance_for_fov(FOV_DEGREES, window.width() as f32),
    );

    // A field of spinning cubes over a wireframe floor, with a sphere
    // hovering above and a light circling the scene.
    let mut cubes = Vec::new();
    for i in 0..3 {
        for j in 0..3 {
            let position = Vec3::new(
                i as f32 * 200.0 - 200.0,
                j as f32 * 200.0 - 200.0,
                30.0,
            );
            let mut cube = shapes::cube(60.0, position);
            cube.set_color(colors::CYAN);
            cubes.push(cube);
        }
    }

    let mut sphere = shapes::sphere(80.0, 3, Vec3::new(0.0, 0.0, 250.0));
    sphere.set_color(colors::WHITE);

    let mut floor = shapes::grid_surface(15, 100.0);
    floor.set_color(colors::GRAY);

    let mut light = PointLight::new(Vec3::new(100.0, 0.0, 200.0), 20_000.0);

    let pipeline = Pipeline::default();
    let spin = Mat3::rotation_z(std::f32::consts::PI / 128.0);

    let mut limiter = FrameLimiter::new(&window);
    let mut elapsed_ms: u64 = 0;
    let mut snapshots = 0u32;

    loop {
        let input = window.poll_input();
        if input.quit {
            break;
        }

        if let Some((w, h)) = input.resize {
            window.resize(w, h)?;
            raster = Rasterizer::new(w, h, raster.scale());
            camera.set_focus(focal_distance_for_fov(FOV_DEGREES, w as f32));
        }

        if input.orbiting {
            camera.rotate(
                input.mouse_delta.0 as f32 * ORBIT_SENSITIVITY,
                input.mouse_delta.1 as f32 * ORBIT_SENSITIVITY,
            );
        }
        if input.wheel != 0 {
            camera.set_focus(camera.focal_distance() * (1.0 + input.wheel as f32 * 0.05));
        }

        let t = elapsed_ms as f32 / 1000.0;
        light.source = Vec3::new(100.0 * (3.0 * t).cos(), 100.0 * (3.0 * t).sin(), 200.0);
        for cube in &mut cubes {
            cube.apply_about_centroid(spin);
        }

        let mut scene = Scene::new();
        for cube in &cubes {
            scene.add_mesh(cube);
        }
        scene.add_mesh(&sphere);
        scene.add_mesh(&floor);
        scene.add_light(&light);

        raster.clear(colors::BACKGROUND);
        pipeline.process(&scene, &camera, &mut raster);

        // World axis markers.
        draw_world_line(&camera, &mut raster, Vec3::ZERO, Vec3::X * 100.0, colors::RED);
        draw_world_line(&camera, &mut raster, Vec3::ZERO, Vec3::Y * 100.0, colors::GREEN);
        draw_world_line(&camera, &mut raster, Vec3::ZERO, Vec3::Z * 100.0, colors::BLUE);

        // Light position marker, skipped while the light is behind the
        // clip plane.
        if (light.source - camera.focal_point()).dot(camera.normal()) > 1.0 {
            raster.draw_circle(camera.project(light.source), 4.0, colors::WHITE);
        }

        if input.snapshot {
            snapshots += 1;
            let path = format!("snapshot_{snapshots:03}.png");
            snapshot::save_png(&raster, &path).map_err(|e| e.to_string())?;
            println!("saved {path}");
        }

        window.present(raster.as_bytes())?;
        elapsed_ms += limiter.wait_and_get_delta(&window);
    }

    Ok(())
}
