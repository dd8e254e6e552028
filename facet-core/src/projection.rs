/// Orthographic mapping from rotated model space to surface pixels
use crate::error::{Error, Result};
use crate::math::{vec3, Vec3};

/// Output surface dimensions. The model origin lands on the surface center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: usize,
    height: usize,
}

impl Viewport {
    /// Fails when either side is zero or the pixel count overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 || width.checked_mul(height).is_none() {
            return Err(Error::InvalidSurface { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Translation applied to every vertex: integer halves of the surface size.
    pub fn offset(&self) -> Vec3 {
        vec3((self.width / 2) as f64, (self.height / 2) as f64, 0.0)
    }

    /// Shift an already rotated point into surface coordinates. Depth is kept.
    pub fn project_to_screen(&self, point: &Vec3) -> Vec3 {
        point + self.offset()
    }
}
