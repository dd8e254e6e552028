/// Vector and matrix helpers on top of nalgebra
use nalgebra::{Matrix3, Vector3};

use crate::error::{Error, Result};

pub type Vec3 = Vector3<f64>;
pub type Mat3 = Matrix3<f64>;

/// Vectors shorter than this cannot be normalized.
pub const DEGENERATE_EPSILON: f64 = 1e-9;

pub fn vec3(x: f64, y: f64, z: f64) -> Vec3 {
    Vec3::new(x, y, z)
}

/// Component-wise average of two points.
pub fn midpoint(a: &Vec3, b: &Vec3) -> Vec3 {
    (a + b) * 0.5
}

/// Unit vector in the direction of `v`.
///
/// Fails with [`Error::DegenerateGeometry`] instead of producing NaN when `v`
/// has (near) zero length.
pub fn normalize(v: &Vec3) -> Result<Vec3> {
    v.try_normalize(DEGENERATE_EPSILON)
        .ok_or(Error::DegenerateGeometry)
}

/// Unit normal of the plane through `a`, `b`, `c`, following the winding order.
pub fn face_normal(a: &Vec3, b: &Vec3, c: &Vec3) -> Result<Vec3> {
    let edge1 = b - a;
    let edge2 = c - a;
    normalize(&edge1.cross(&edge2))
}

/// Build a matrix from nine values in row-major order.
pub fn mat3_from_rows(values: [f64; 9]) -> Mat3 {
    Mat3::from_row_slice(&values)
}
