/// Barycentric triangle rasterizer with a depth buffer
use std::fmt;

use crate::color::{shade, Color};
use crate::error::{Error, Result};
use crate::geometry::{Mesh, Triangle};
use crate::math::{face_normal, Mat3, Vec3, DEGENERATE_EPSILON};
use crate::projection::Viewport;
use crate::surface::{PixelBuffer, Surface};

/// Per-frame counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    pub triangles_in: usize,
    pub triangles_drawn: usize,
    /// Zero-area, zero-normal or non-finite triangles.
    pub triangles_skipped: usize,
    pub pixels_written: usize,
}

impl fmt::Display for RenderStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tris {} drawn {} skipped {} px {}",
            self.triangles_in, self.triangles_drawn, self.triangles_skipped, self.pixels_written
        )
    }
}

/// Renders triangles into a fresh [`Surface`]. One instance per frame.
pub struct Rasterizer {
    viewport: Viewport,
    surface: Surface,
    stats: RenderStats,
}

impl Rasterizer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            surface: Surface::new(viewport),
            stats: RenderStats::default(),
        }
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Draw every triangle in mesh order. Degenerate triangles are skipped
    /// and counted; they never abort the frame.
    pub fn render_mesh(&mut self, mesh: &Mesh, transform: &Mat3) {
        for triangle in &mesh.triangles {
            self.stats.triangles_in += 1;
            match self.render_triangle(triangle, transform) {
                Ok(written) => {
                    self.stats.triangles_drawn += 1;
                    self.stats.pixels_written += written;
                }
                Err(_) => self.stats.triangles_skipped += 1,
            }
        }
    }

    /// Rotate, center and fill one triangle. Returns the number of pixels
    /// that passed the depth test.
    pub fn render_triangle(&mut self, triangle: &Triangle, transform: &Mat3) -> Result<usize> {
        let screen = triangle
            .vertices
            .map(|v| self.viewport.project_to_screen(&(transform * v)));

        if screen.iter().any(|v| !v.iter().all(|c| c.is_finite())) {
            return Err(Error::DegenerateGeometry);
        }

        // Only the magnitude of the facing matters; both sides shade alike.
        let normal = face_normal(&screen[0], &screen[1], &screen[2])?;
        let color = shade(triangle.color, normal.z.abs());

        self.rasterize_triangle(&screen, color)
    }

    /// Fill a triangle already in surface coordinates with a flat color.
    pub fn rasterize_triangle(&mut self, screen: &[Vec3; 3], color: Color) -> Result<usize> {
        let [v1, v2, v3] = screen;
        let denom = barycentric_denominator(v1, v2, v3);
        if denom.abs() < DEGENERATE_EPSILON {
            return Err(Error::DegenerateGeometry);
        }

        let Some((min_x, max_x, min_y, max_y)) = self.bounding_box(screen) else {
            return Ok(0);
        };

        let mut written = 0;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let (b1, b2, b3) = barycentric(v1, v2, v3, x as f64, y as f64, denom);
                let inside = [b1, b2, b3].iter().all(|b| (0.0..=1.0).contains(b));
                if !inside {
                    continue;
                }

                let depth = b1 * v1.z + b2 * v2.z + b3 * v3.z;
                if self.surface.test_and_set(x, y, depth, color) {
                    written += 1;
                }
            }
        }

        Ok(written)
    }

    /// Integer pixel range covered by the triangle, clipped to the surface.
    /// `None` when the triangle lies entirely outside.
    fn bounding_box(&self, screen: &[Vec3; 3]) -> Option<(usize, usize, usize, usize)> {
        let xs = screen.map(|v| v.x);
        let ys = screen.map(|v| v.y);
        let x_range = clip_range(&xs, self.viewport.width())?;
        let y_range = clip_range(&ys, self.viewport.height())?;
        Some((x_range.0, x_range.1, y_range.0, y_range.1))
    }

    pub fn finish(self) -> (PixelBuffer, RenderStats) {
        (self.surface.into_pixels(), self.stats)
    }
}

/// `ceil(min)` and `floor(max)` of the coordinates, clamped to `[0, limit - 1]`.
fn clip_range(coords: &[f64; 3], limit: usize) -> Option<(usize, usize)> {
    let min = coords.iter().copied().fold(f64::INFINITY, f64::min).ceil();
    let max = coords.iter().copied().fold(f64::NEG_INFINITY, f64::max).floor();
    let last = (limit - 1) as f64;

    if max < 0.0 || min > last || min > max {
        return None;
    }
    Some((min.max(0.0) as usize, max.min(last) as usize))
}

/// Twice the signed area of the triangle's XY projection.
fn barycentric_denominator(v1: &Vec3, v2: &Vec3, v3: &Vec3) -> f64 {
    (v1.y - v3.y) * (v2.x - v3.x) + (v2.y - v3.y) * (v3.x - v1.x)
}

/// Barycentric weights of `(x, y)` relative to `v1`, `v2`, `v3`.
fn barycentric(v1: &Vec3, v2: &Vec3, v3: &Vec3, x: f64, y: f64, denom: f64) -> (f64, f64, f64) {
    let b1 = ((y - v3.y) * (v2.x - v3.x) + (v2.y - v3.y) * (v3.x - x)) / denom;
    let b2 = ((y - v1.y) * (v3.x - v1.x) + (v3.y - v1.y) * (v1.x - x)) / denom;
    let b3 = ((y - v2.y) * (v1.x - v2.x) + (v1.y - v2.y) * (v2.x - x)) / denom;
    (b1, b2, b3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec3;

    fn rasterizer(width: usize, height: usize) -> Rasterizer {
        Rasterizer::new(Viewport::new(width, height).unwrap())
    }

    /// Flat triangle at constant depth, in model space (origin at the center).
    fn flat(points: [(f64, f64); 3], z: f64, color: Color) -> Triangle {
        let [a, b, c] = points.map(|(x, y)| vec3(x, y, z));
        Triangle::new(a, b, c, color)
    }

    #[test]
    fn test_barycentric_weights() {
        let (v1, v2, v3) = (vec3(0.0, 0.0, 0.0), vec3(10.0, 0.0, 0.0), vec3(0.0, 10.0, 0.0));
        let denom = barycentric_denominator(&v1, &v2, &v3);

        let (b1, b2, b3) = barycentric(&v1, &v2, &v3, 0.0, 0.0, denom);
        assert!((b1 - 1.0).abs() < 1e-12 && b2.abs() < 1e-12 && b3.abs() < 1e-12);

        let (b1, b2, b3) = barycentric(&v1, &v2, &v3, 10.0, 0.0, denom);
        assert!(b1.abs() < 1e-12 && (b2 - 1.0).abs() < 1e-12 && b3.abs() < 1e-12);

        let (b1, b2, b3) = barycentric(&v1, &v2, &v3, 2.0, 3.0, denom);
        assert!((b1 + b2 + b3 - 1.0).abs() < 1e-12);
        assert!((b2 - 0.2).abs() < 1e-12);
        assert!((b3 - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_fill_is_edge_inclusive() {
        let mut r = rasterizer(20, 20);
        let screen = [vec3(2.0, 2.0, 0.0), vec3(12.0, 2.0, 0.0), vec3(2.0, 12.0, 0.0)];
        let written = r.rasterize_triangle(&screen, Color::WHITE).unwrap();

        // Right isosceles with legs of 10 covers 11 + 10 + ... + 1 lattice points.
        assert_eq!(written, 66);
        assert_eq!(r.surface().color_at(2, 2), Some(Color::WHITE));
        assert_eq!(r.surface().color_at(12, 2), Some(Color::WHITE));
        assert_eq!(r.surface().color_at(7, 7), Some(Color::WHITE));
        assert_eq!(r.surface().color_at(8, 7), Some(Color::BLACK));
        assert_eq!(r.surface().color_at(1, 2), Some(Color::BLACK));
    }

    #[test]
    fn test_winding_does_not_matter() {
        let mut cw = rasterizer(20, 20);
        let mut ccw = rasterizer(20, 20);
        let a = vec3(1.0, 1.0, 0.0);
        let b = vec3(15.0, 3.0, 0.0);
        let c = vec3(6.0, 17.0, 0.0);
        let n1 = cw.rasterize_triangle(&[a, b, c], Color::RED).unwrap();
        let n2 = ccw.rasterize_triangle(&[a, c, b], Color::RED).unwrap();
        assert_eq!(n1, n2);
        assert!(n1 > 0);
    }

    #[test]
    fn test_depth_test_independent_of_draw_order() {
        let near = flat([(-20.0, -20.0), (20.0, -20.0), (0.0, 20.0)], 50.0, Color::RED);
        let far = flat([(-30.0, -30.0), (30.0, -30.0), (0.0, 30.0)], -50.0, Color::BLUE);
        let identity = Mat3::identity();

        for order in [[near, far], [far, near]] {
            let mut r = rasterizer(100, 100);
            for t in &order {
                r.render_triangle(t, &identity).unwrap();
            }
            // Both faces are square-on, so shading keeps the full color.
            assert_eq!(r.surface().color_at(50, 50), Some(Color::RED));
            assert_eq!(r.surface().depth_at(50, 50), Some(50.0));
            assert_eq!(r.surface().color_at(50, 24), Some(Color::BLUE));
        }
    }

    #[test]
    fn test_equal_depth_keeps_first_triangle() {
        let first = flat([(-10.0, -10.0), (10.0, -10.0), (0.0, 10.0)], 7.0, Color::GREEN);
        let second = Triangle { color: Color::WHITE, ..first };
        let mut r = rasterizer(40, 40);
        r.render_triangle(&first, &Mat3::identity()).unwrap();
        let written = r.render_triangle(&second, &Mat3::identity()).unwrap();

        assert_eq!(written, 0);
        assert_eq!(r.surface().color_at(20, 20), Some(Color::GREEN));
    }

    #[test]
    fn test_depth_is_interpolated() {
        let t = Triangle::new(
            vec3(-10.0, 0.0, 0.0),
            vec3(10.0, 0.0, 20.0),
            vec3(-10.0, 20.0, 0.0),
            Color::WHITE,
        );
        let mut r = rasterizer(40, 40);
        r.render_triangle(&t, &Mat3::identity()).unwrap();
        // Screen (15, 25) is model (-5, 5): a quarter of the way from x=-10 to 10.
        let depth = r.surface().depth_at(15, 25).unwrap();
        assert!((depth - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_shading_uses_absolute_normal_z() {
        let tilted = Triangle::new(
            vec3(-10.0, -10.0, 0.0),
            vec3(10.0, -10.0, 0.0),
            vec3(-10.0, 10.0, 20.0),
            Color::WHITE,
        );
        let [a, b, c] = tilted.vertices;
        let flipped = Triangle::new(a, c, b, Color::WHITE);

        // Normal is (0, -1, 1) / sqrt(2) up to sign.
        let expected = shade(Color::WHITE, std::f64::consts::FRAC_1_SQRT_2);
        for t in [tilted, flipped] {
            let mut r = rasterizer(40, 40);
            r.render_triangle(&t, &Mat3::identity()).unwrap();
            assert_eq!(r.surface().color_at(18, 18), Some(expected));
        }
        assert_eq!(expected, Color::new(180, 180, 180));
    }

    #[test]
    fn test_clipped_triangle_stays_in_bounds() {
        let huge = flat([(-500.0, -500.0), (500.0, -400.0), (0.0, 600.0)], 1.0, Color::RED);
        let mut r = rasterizer(10, 8);
        let written = r.render_triangle(&huge, &Mat3::identity()).unwrap();
        assert!(written <= 80);
        assert_eq!(r.surface().color_at(5, 4), Some(Color::RED));
    }

    #[test]
    fn test_triangle_outside_surface_is_noop() {
        let mut r = rasterizer(10, 10);
        for points in [
            [(-100.0, -100.0), (-90.0, -100.0), (-100.0, -90.0)],
            [(100.0, 0.0), (110.0, 0.0), (100.0, 4.0)],
            [(0.0, 50.0), (3.0, 50.0), (0.0, 60.0)],
        ] {
            let t = flat(points, 0.0, Color::WHITE);
            assert_eq!(r.render_triangle(&t, &Mat3::identity()), Ok(0));
        }
        let (pixels, _) = r.finish();
        assert!(pixels.pixels().iter().all(|&c| c == Color::BLACK));
    }

    #[test]
    fn test_degenerate_triangles_are_skipped() {
        let point = vec3(1.0, 1.0, 1.0);
        let collapsed = Triangle::new(point, point, point, Color::WHITE);
        let collinear = Triangle::new(
            vec3(0.0, 0.0, 0.0),
            vec3(5.0, 5.0, 0.0),
            vec3(10.0, 10.0, 0.0),
            Color::WHITE,
        );
        // Non-zero normal, but seen exactly edge-on.
        let edge_on = Triangle::new(
            vec3(0.0, 0.0, 0.0),
            vec3(10.0, 0.0, 0.0),
            vec3(0.0, 0.0, 10.0),
            Color::WHITE,
        );
        let nan = Triangle::new(
            vec3(f64::NAN, 0.0, 0.0),
            vec3(1.0, 0.0, 0.0),
            vec3(0.0, 1.0, 0.0),
            Color::WHITE,
        );
        let good = flat([(-5.0, -5.0), (5.0, -5.0), (0.0, 5.0)], 0.0, Color::BLUE);

        let mesh: Mesh = [collapsed, collinear, edge_on, nan, good].into_iter().collect();
        let mut r = rasterizer(20, 20);
        r.render_mesh(&mesh, &Mat3::identity());

        let (pixels, stats) = r.finish();
        assert_eq!(stats.triangles_in, 5);
        assert_eq!(stats.triangles_skipped, 4);
        assert_eq!(stats.triangles_drawn, 1);
        assert!(stats.pixels_written > 0);
        assert_eq!(pixels.get(10, 10), Some(Color::BLUE));
    }

    #[test]
    fn test_clip_range() {
        assert_eq!(clip_range(&[0.5, 3.2, 9.9], 10), Some((1, 9)));
        assert_eq!(clip_range(&[-4.0, 3.0, 20.0], 10), Some((0, 9)));
        assert_eq!(clip_range(&[-4.0, -3.0, -1.5], 10), None);
        assert_eq!(clip_range(&[10.0, 11.0, 12.0], 10), None);
        // No integer inside (2.2, 2.8).
        assert_eq!(clip_range(&[2.2, 2.5, 2.8], 10), None);
    }
}
