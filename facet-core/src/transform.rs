/// Heading/pitch rotation matrices and the driver-side orientation state
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::math::{mat3_from_rows, Mat3};

/// Rotation about the vertical (Y) axis.
#[rustfmt::skip]
pub fn heading_matrix(heading: f64) -> Mat3 {
    let (sin, cos) = heading.sin_cos();
    mat3_from_rows([
        cos, 0.0, -sin,
        0.0, 1.0, 0.0,
        sin, 0.0, cos,
    ])
}

/// Rotation about the horizontal (X) axis.
#[rustfmt::skip]
pub fn pitch_matrix(pitch: f64) -> Mat3 {
    let (sin, cos) = pitch.sin_cos();
    mat3_from_rows([
        1.0, 0.0, 0.0,
        0.0, cos, sin,
        0.0, -sin, cos,
    ])
}

/// Combined rotation: pitch is applied first, then heading.
///
/// Angles are used as given, without wrapping or clamping.
pub fn build_transform(heading: f64, pitch: f64) -> Mat3 {
    heading_matrix(heading) * pitch_matrix(pitch)
}

/// Heading and pitch in radians, as held by a driver between frames.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub heading: f64,
    pub pitch: f64,
}

impl Orientation {
    pub fn new(heading: f64, pitch: f64) -> Self {
        Self { heading, pitch }
    }

    pub fn from_degrees(heading: f64, pitch: f64) -> Self {
        Self::new(heading.to_radians(), pitch.to_radians())
    }

    /// Rotate by delta amounts (in radians), keeping slider ranges.
    pub fn rotate(&mut self, d_heading: f64, d_pitch: f64) {
        *self = Self::new(self.heading + d_heading, self.pitch + d_pitch).clamped();
    }

    /// Heading wrapped into [-π, π], pitch clamped to [-π/2, π/2].
    pub fn clamped(self) -> Self {
        let heading = if (-PI..=PI).contains(&self.heading) {
            self.heading
        } else {
            (self.heading + PI).rem_euclid(TAU) - PI
        };
        Self {
            heading,
            pitch: self.pitch.clamp(-FRAC_PI_2, FRAC_PI_2),
        }
    }

    pub fn transform(&self) -> Mat3 {
        build_transform(self.heading, self.pitch)
    }
}
