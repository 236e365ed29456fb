//! Scanline rasterizer over a CPU pixel buffer.
//!
//! All primitives take camera-plane coordinates ([`Vec2`], y-up, origin at
//! the screen center) and map them to pixels through the rasterizer's scale
//! and center. Out-of-bounds pixels are dropped silently, so callers never
//! clip against the viewport themselves. There is no depth buffer; later
//! draws overwrite earlier ones, which is exactly what the back-to-front
//! pipeline relies on.

use crate::colors::Color;
use crate::math::vec2::Vec2;
use crate::render::line::{Line, Pt};

pub struct Rasterizer {
    buffer: Vec<u32>,
    width: u32,
    height: u32,
    center: Pt,
    scale: f32,
}

impl Rasterizer {
    pub fn new(width: u32, height: u32, scale: f32) -> Self {
        Self {
            buffer: vec![0; (width * height) as usize],
            width,
            height,
            center: Pt::new(width as i32 / 2, height as i32 / 2),
            scale,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
    }

    pub fn center(&self) -> Pt {
        self.center
    }

    pub fn buffer(&self) -> &[u32] {
        &self.buffer
    }

    /// The pixel buffer as raw bytes, for handing to a streaming texture.
    pub fn as_bytes(&self) -> &[u8] {
        unsafe {
            std::slice::from_raw_parts(
                self.buffer.as_ptr() as *const u8,
                self.buffer.len() * std::mem::size_of::<u32>(),
            )
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(Color::from_packed(
            self.buffer[y as usize * self.width as usize + x as usize],
        ))
    }

    pub fn clear(&mut self, color: Color) {
        self.buffer.fill(color.packed());
    }

    /// Writes one pixel; coordinates outside the buffer are dropped.
    pub fn draw_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        self.buffer[y as usize * self.width as usize + x as usize] = color.packed();
    }

    fn to_screen(&self, p: Vec2) -> Pt {
        Pt::new(
            self.center.x + (p.x * self.scale) as i32,
            self.center.y - (p.y * self.scale) as i32,
        )
    }

    // =========================================================================
    // Lines
    // =========================================================================

    pub fn draw_line(&mut self, a: Vec2, b: Vec2, color: Color) {
        self.draw_line_px(self.to_screen(a), self.to_screen(b), color);
    }

    fn draw_line_px(&mut self, a: Pt, b: Pt, color: Color) {
        let line = Line::new(a, b);
        for i in 0..=line.len() {
            let p = line.eval(i);
            self.draw_pixel(p.x, p.y, color);
        }
    }

    // =========================================================================
    // Triangles
    // =========================================================================

    pub fn draw_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        self.fill_triangle_px(self.to_screen(a), self.to_screen(b), self.to_screen(c), color);
    }

    /// Scanline fill: sort the corners by y, then walk each scanline between
    /// the long boundary (lowest to highest corner) and whichever short
    /// boundary is active, switching at the middle corner.
    fn fill_triangle_px(&mut self, a: Pt, b: Pt, c: Pt, color: Color) {
        let mut pts = [a, b, c];
        pts.sort_by_key(|p| p.y);
        let [low, mid, high] = pts;

        let long = Line::new(low, high);
        let low_mid = Line::new(low, mid);
        let mid_high = Line::new(mid, high);

        for y in low.y..=high.y {
            let x1 = long.x_at(y);
            let x2 = if y < mid.y {
                low_mid.x_at(y)
            } else {
                mid_high.x_at(y)
            };
            for x in x1.min(x2)..=x1.max(x2) {
                self.draw_pixel(x, y, color);
            }
        }
    }

    // =========================================================================
    // Quadrilaterals
    // =========================================================================

    /// Scanline-fills a quadrilateral whose boundary is given by `adjacency`
    /// over the four `points` (each corner must touch exactly two boundary
    /// edges). `shader` is called per pixel with the pixel's offset from the
    /// screen center and returns its color.
    ///
    /// Degenerate input — corners that project to the same pixel, or an
    /// adjacency that is not a single 4-cycle — is dropped silently, same as
    /// out-of-bounds pixels.
    pub fn draw_quadrilateral(
        &mut self,
        adjacency: &[[bool; 4]; 4],
        points: [Vec2; 4],
        shader: impl Fn(i32, i32) -> Color,
    ) {
        let pts = points.map(|p| self.to_screen(p));

        // Pair each corner with its two boundary lines.
        let mut incident = [[Line::placeholder(); 2]; 4];
        for i in 0..4 {
            for j in (i + 1)..4 {
                if !adjacency[i][j] {
                    continue;
                }
                let line = Line::new(pts[i], pts[j]);
                if line.is_placeholder() {
                    // Two corners on the same pixel.
                    return;
                }
                for idx in [i, j] {
                    if incident[idx][0].is_placeholder() {
                        incident[idx][0] = line;
                    } else if incident[idx][1].is_placeholder() {
                        incident[idx][1] = line;
                    } else {
                        // Degree 3 corner: not a 4-cycle.
                        return;
                    }
                }
            }
        }
        if incident.iter().any(|pair| pair[1].is_placeholder()) {
            return;
        }

        let mut order = [0usize, 1, 2, 3];
        order.sort_by_key(|&i| pts[i].y);

        // Scan from the lowest corner's two lines; when the scan passes the
        // second and third corners, swap the boundary that ends there for
        // the corner's other line.
        let mut active = incident[order[0]];
        let mut next = 1;
        for y in pts[order[0]].y..=pts[order[3]].y {
            let x1 = active[0].x_at(y);
            let x2 = active[1].x_at(y);
            for x in x1.min(x2)..=x1.max(x2) {
                let color = shader(x - self.center.x, y - self.center.y);
                self.draw_pixel(x, y, color);
            }
            while next < 3 && y >= pts[order[next]].y {
                let replacements = incident[order[next]];
                'swap: for k in 0..2 {
                    for a in 0..2 {
                        if active[a].same_segment(&replacements[k]) {
                            active[a] = replacements[1 - k];
                            break 'swap;
                        }
                    }
                }
                next += 1;
            }
        }
    }

    // =========================================================================
    // Circles
    // =========================================================================

    /// Outlines a circle by sweeping x and reflecting `y = sqrt(r^2 - x^2)`
    /// into all four quadrants.
    pub fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let c = self.to_screen(center);
        let r = (radius * self.scale) as i32;
        for x in -r..=r {
            let y = ((r * r - x * x) as f32).sqrt() as i32;
            self.draw_pixel(c.x + x, c.y + y, color);
            self.draw_pixel(c.x + x, c.y - y, color);
            self.draw_pixel(c.x + y, c.y + x, color);
            self.draw_pixel(c.x - y, c.y + x, color);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;

    fn count_colored(raster: &Rasterizer, color: Color) -> usize {
        raster.buffer().iter().filter(|&&p| p == color.packed()).count()
    }

    #[test]
    fn out_of_bounds_pixels_are_dropped() {
        let mut raster = Rasterizer::new(8, 8, 1.0);
        raster.draw_pixel(-1, 0, colors::RED);
        raster.draw_pixel(0, -1, colors::RED);
        raster.draw_pixel(8, 0, colors::RED);
        raster.draw_pixel(0, 8, colors::RED);
        assert_eq!(count_colored(&raster, colors::RED), 0);
    }

    #[test]
    fn clear_fills_the_whole_buffer() {
        let mut raster = Rasterizer::new(4, 4, 1.0);
        raster.clear(colors::BLUE);
        assert_eq!(count_colored(&raster, colors::BLUE), 16);
    }

    #[test]
    fn later_draws_overwrite_earlier_ones() {
        let mut raster = Rasterizer::new(4, 4, 1.0);
        raster.draw_pixel(2, 2, colors::RED);
        raster.draw_pixel(2, 2, colors::GREEN);
        assert_eq!(raster.pixel(2, 2), Some(colors::GREEN));
    }

    #[test]
    fn line_covers_both_endpoints() {
        let mut raster = Rasterizer::new(64, 64, 1.0);
        raster.draw_line(Vec2::new(-10.0, 0.0), Vec2::new(10.0, 5.0), colors::WHITE);
        assert_eq!(raster.pixel(22, 32), Some(colors::WHITE));
        assert_eq!(raster.pixel(42, 27), Some(colors::WHITE));
    }

    #[test]
    fn line_partially_off_screen_draws_the_visible_part() {
        let mut raster = Rasterizer::new(16, 16, 1.0);
        raster.draw_line(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), colors::WHITE);
        assert_eq!(raster.pixel(8, 8), Some(colors::WHITE));
        assert_eq!(raster.pixel(15, 8), Some(colors::WHITE));
    }

    #[test]
    fn triangle_fill_covers_interior() {
        let mut raster = Rasterizer::new(64, 64, 1.0);
        raster.draw_triangle(
            Vec2::new(-10.0, -10.0),
            Vec2::new(10.0, -10.0),
            Vec2::new(0.0, 10.0),
            colors::CYAN,
        );
        // Screen center sits inside the triangle.
        assert_eq!(raster.pixel(32, 32), Some(colors::CYAN));
        assert!(count_colored(&raster, colors::CYAN) > 100);
    }

    #[test]
    fn degenerate_triangle_does_not_panic() {
        let mut raster = Rasterizer::new(32, 32, 1.0);
        let p = Vec2::new(1.0, 1.0);
        raster.draw_triangle(p, p, p, colors::WHITE);
        raster.draw_triangle(p, p, Vec2::new(5.0, 1.0), colors::WHITE);
    }

    #[test]
    fn quadrilateral_fill_covers_interior() {
        let mut raster = Rasterizer::new(64, 64, 1.0);
        let cycle = [
            [false, true, false, true],
            [true, false, true, false],
            [false, true, false, true],
            [true, false, true, false],
        ];
        let points = [
            Vec2::new(-10.0, -10.0),
            Vec2::new(10.0, -10.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(-10.0, 10.0),
        ];
        raster.draw_quadrilateral(&cycle, points, |_, _| colors::GREEN);
        assert_eq!(raster.pixel(32, 32), Some(colors::GREEN));
        // A 20x20 world square at scale 1 covers roughly 400 pixels.
        assert!(count_colored(&raster, colors::GREEN) > 350);
    }

    #[test]
    fn quadrilateral_shader_sees_center_offsets() {
        let mut raster = Rasterizer::new(64, 64, 1.0);
        let cycle = [
            [false, true, false, true],
            [true, false, true, false],
            [false, true, false, true],
            [true, false, true, false],
        ];
        let points = [
            Vec2::new(-5.0, -5.0),
            Vec2::new(5.0, -5.0),
            Vec2::new(5.0, 5.0),
            Vec2::new(-5.0, 5.0),
        ];
        // Color by quadrant of the offset; the center pixel has offset (0,0).
        raster.draw_quadrilateral(&cycle, points, |dx, dy| {
            if dx == 0 && dy == 0 {
                colors::RED
            } else {
                colors::GRAY
            }
        });
        assert_eq!(raster.pixel(32, 32), Some(colors::RED));
    }

    #[test]
    fn degenerate_quadrilateral_is_dropped() {
        let mut raster = Rasterizer::new(32, 32, 1.0);
        let cycle = [
            [false, true, false, true],
            [true, false, true, false],
            [false, true, false, true],
            [true, false, true, false],
        ];
        // All four corners on one pixel.
        let p = Vec2::new(2.0, 2.0);
        raster.draw_quadrilateral(&cycle, [p, p, p, p], |_, _| colors::WHITE);
        assert_eq!(count_colored(&raster, colors::WHITE), 0);
    }

    #[test]
    fn incomplete_boundary_is_dropped() {
        let mut raster = Rasterizer::new(32, 32, 1.0);
        // Only three edges: corner 3 touches a single boundary line.
        let open = [
            [false, true, false, false],
            [true, false, true, false],
            [false, true, false, true],
            [false, false, true, false],
        ];
        let points = [
            Vec2::new(-5.0, -5.0),
            Vec2::new(5.0, -5.0),
            Vec2::new(5.0, 5.0),
            Vec2::new(-5.0, 5.0),
        ];
        raster.draw_quadrilateral(&open, points, |_, _| colors::WHITE);
        assert_eq!(count_colored(&raster, colors::WHITE), 0);
    }

    #[test]
    fn circle_is_symmetric_about_its_center() {
        let mut raster = Rasterizer::new(64, 64, 1.0);
        raster.draw_circle(Vec2::ZERO, 10.0, colors::WHITE);
        assert_eq!(raster.pixel(42, 32), Some(colors::WHITE));
        assert_eq!(raster.pixel(22, 32), Some(colors::WHITE));
        assert_eq!(raster.pixel(32, 42), Some(colors::WHITE));
        assert_eq!(raster.pixel(32, 22), Some(colors::WHITE));
    }

    #[test]
    fn zero_radius_circle_is_a_point() {
        let mut raster = Rasterizer::new(16, 16, 1.0);
        raster.draw_circle(Vec2::ZERO, 0.0, colors::WHITE);
        assert_eq!(raster.pixel(8, 8), Some(colors::WHITE));
        assert_eq!(count_colored(&raster, colors::WHITE), 1);
    }
}
