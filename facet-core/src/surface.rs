/// Color and depth buffers
use crate::color::Color;
use crate::projection::Viewport;

/// A width × height grid of colors, row-major with (0, 0) at the top left.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    /// Opaque black buffer of the viewport's size.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            width: viewport.width(),
            height: viewport.height(),
            pixels: vec![Color::BLACK; viewport.pixel_count()],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Iterate `(x, y, color)` in row-major order.
    pub fn enumerate(&self) -> impl Iterator<Item = (usize, usize, Color)> + '_ {
        let width = self.width;
        self.pixels
            .iter()
            .enumerate()
            .map(move |(i, &c)| (i % width, i / width, c))
    }

    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_array()).collect()
    }

    /// RGBA with every pixel fully opaque.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|c| [c.r, c.g, c.b, u8::MAX])
            .collect()
    }
}

/// A pixel buffer paired with a depth buffer of the same size.
///
/// Depth starts at negative infinity; larger values are closer to the viewer.
#[derive(Debug, Clone)]
pub struct Surface {
    pixels: PixelBuffer,
    depth: Vec<f64>,
}

impl Surface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            pixels: PixelBuffer::new(viewport),
            depth: vec![f64::NEG_INFINITY; viewport.pixel_count()],
        }
    }

    pub fn width(&self) -> usize {
        self.pixels.width
    }

    pub fn height(&self) -> usize {
        self.pixels.height
    }

    pub fn depth_at(&self, x: usize, y: usize) -> Option<f64> {
        self.pixels.index(x, y).map(|i| self.depth[i])
    }

    pub fn color_at(&self, x: usize, y: usize) -> Option<Color> {
        self.pixels.get(x, y)
    }

    /// Write `color` if `depth` is strictly closer than what is stored.
    ///
    /// Returns whether the pixel was written. Out-of-bounds coordinates and
    /// equal depths leave the surface untouched.
    pub fn test_and_set(&mut self, x: usize, y: usize, depth: f64, color: Color) -> bool {
        let Some(i) = self.pixels.index(x, y) else {
            return false;
        };
        if depth > self.depth[i] {
            self.depth[i] = depth;
            self.pixels.pixels[i] = color;
            true
        } else {
            false
        }
    }

    pub fn into_pixels(self) -> PixelBuffer {
        self.pixels
    }
}
