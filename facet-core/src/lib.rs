/// Facet Core Library - software rasterizer for small colored meshes
///
/// Builds the subdivided base solid, rotates it by heading and pitch, and
/// rasterizes it with flat shading and a depth buffer into a pixel buffer. The
/// library is stateless: every render starts from scratch.

pub mod color;
pub mod error;
pub mod geometry;
pub mod math;
pub mod projection;
pub mod raster;
pub mod render;
pub mod stl;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use color::{shade, Color, PALETTE};
pub use error::{Error, Result};
pub use geometry::{
    base_solid, subdivide, Mesh, Triangle, MAX_SUBDIVISION_DEPTH, MAX_TRIANGLES,
};
pub use math::{Mat3, Vec3};
pub use projection::Viewport;
pub use raster::{Rasterizer, RenderStats};
pub use render::{render, render_frame, render_mesh, Frame};
pub use surface::{PixelBuffer, Surface};
pub use transform::{build_transform, Orientation};
