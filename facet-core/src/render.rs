/// Driver-facing entry points
use crate::error::Result;
use crate::geometry::{base_solid, Mesh};
use crate::math::Mat3;
use crate::projection::Viewport;
use crate::raster::{Rasterizer, RenderStats};
use crate::surface::PixelBuffer;
use crate::transform::build_transform;

/// A finished render and its counters.
#[derive(Debug, Clone)]
pub struct Frame {
    pub pixels: PixelBuffer,
    pub stats: RenderStats,
}

/// Render the base solid subdivided `subdivision_depth` times, rotated by
/// `heading` then `pitch` (radians), onto a black `width` × `height` buffer.
pub fn render(
    heading: f64,
    pitch: f64,
    width: usize,
    height: usize,
    subdivision_depth: u32,
) -> Result<PixelBuffer> {
    render_frame(heading, pitch, width, height, subdivision_depth).map(|frame| frame.pixels)
}

/// Same as [`render`], also returning per-frame statistics.
pub fn render_frame(
    heading: f64,
    pitch: f64,
    width: usize,
    height: usize,
    subdivision_depth: u32,
) -> Result<Frame> {
    let viewport = Viewport::new(width, height)?;
    let mesh = base_solid().subdivided(subdivision_depth)?;
    let transform = build_transform(heading, pitch);
    Ok(rasterize(&mesh, &transform, viewport))
}

/// Render an arbitrary mesh with a precomputed rotation.
pub fn render_mesh(mesh: &Mesh, transform: &Mat3, width: usize, height: usize) -> Result<Frame> {
    let viewport = Viewport::new(width, height)?;
    Ok(rasterize(mesh, transform, viewport))
}

fn rasterize(mesh: &Mesh, transform: &Mat3, viewport: Viewport) -> Frame {
    let mut rasterizer = Rasterizer::new(viewport);
    rasterizer.render_mesh(mesh, transform);
    let (pixels, stats) = rasterizer.finish();
    Frame { pixels, stats }
}
