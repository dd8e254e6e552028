/// 8-bit RGB colors and flat shading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Face colors of the base solid, in mesh order.
pub const PALETTE: [Color; 4] = [Color::WHITE, Color::RED, Color::GREEN, Color::BLUE];

/// Scale each channel of `color` by `factor`, rounding to the nearest integer.
///
/// `factor` is clamped to [0, 1] first, so the result never leaves the channel
/// range. A NaN factor yields black.
pub fn shade(color: Color, factor: f64) -> Color {
    let factor = if factor.is_nan() { 0.0 } else { factor.clamp(0.0, 1.0) };
    let scale = |c: u8| (f64::from(c) * factor).round().clamp(0.0, 255.0) as u8;
    Color::new(scale(color.r), scale(color.g), scale(color.b))
}
