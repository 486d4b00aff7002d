//! Affine transforms from pixel to CRS coordinates.

use std::ops::Mul;

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

/// A 2-D affine transform mapping pixel `(col, row)` to CRS `(x, y)`:
///
/// ```text
/// x = a * col + b * row + c
/// y = d * col + e * row + f
/// ```
///
/// Integer pixel coordinates address pixel corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine {
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0)
    }

    pub fn translation(x: f64, y: f64) -> Self {
        Self::new(1.0, 0.0, x, 0.0, 1.0, y)
    }

    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, 0.0, sy, 0.0)
    }

    fn to_matrix(self) -> Matrix3<f64> {
        Matrix3::new(self.a, self.b, self.c, self.d, self.e, self.f, 0.0, 0.0, 1.0)
    }

    fn from_matrix(m: &Matrix3<f64>) -> Self {
        Self::new(m[(0, 0)], m[(0, 1)], m[(0, 2)], m[(1, 0)], m[(1, 1)], m[(1, 2)])
    }

    /// Map a pixel coordinate to CRS coordinates.
    pub fn apply(&self, col: f64, row: f64) -> (f64, f64) {
        (
            self.a * col + self.b * row + self.c,
            self.d * col + self.e * row + self.f,
        )
    }

    /// Inverse transform (CRS to pixel), or `None` if the transform is
    /// singular.
    pub fn inverse(&self) -> Option<Affine> {
        self.to_matrix()
            .try_inverse()
            .map(|m| Self::from_matrix(&m))
    }

    /// Coefficients in GDAL GeoTransform order: `[c, a, b, f, d, e]`.
    pub fn to_gdal(&self) -> [f64; 6] {
        [self.c, self.a, self.b, self.f, self.d, self.e]
    }

    /// Whether the transform has no rotation or shear terms.
    pub fn is_rectilinear(&self) -> bool {
        self.b == 0.0 && self.d == 0.0
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::identity()
    }
}

/// Composition: `(lhs * rhs).apply(p) == lhs.apply(rhs.apply(p))`.
impl Mul for Affine {
    type Output = Affine;

    fn mul(self, rhs: Affine) -> Affine {
        Self::from_matrix(&(self.to_matrix() * rhs.to_matrix()))
    }
}
