//! Calibration transform
//!
//! Maps drawing coordinates to device coordinates as `p' = M·p + offset`,
//! where `M` is the 2×2 scale/skew calibration matrix `[a b; c d]`.

use crate::data::Point;
use nalgebra::{Matrix2, Vector2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    matrix: Matrix2<f64>,
    offset: Vector2<f64>,
}

impl AffineTransform {
    /// Identity matrix, zero offset
    pub fn identity() -> Self {
        Self {
            matrix: Matrix2::identity(),
            offset: Vector2::zeros(),
        }
    }

    /// Build from matrix entries `[a, b, c, d]` and an offset
    pub fn new(matrix: [f64; 4], offset: Point) -> Self {
        let [a, b, c, d] = matrix;
        Self {
            matrix: Matrix2::new(a, b, c, d),
            offset: Vector2::new(offset.x, offset.y),
        }
    }

    /// Same offset, new matrix
    pub fn with_matrix(self, matrix: [f64; 4]) -> Self {
        Self::new(matrix, self.offset())
    }

    /// Same matrix, new offset
    pub fn with_offset(self, offset: Point) -> Self {
        Self::new(self.matrix(), offset)
    }

    /// Matrix entries as `[a, b, c, d]`
    pub fn matrix(&self) -> [f64; 4] {
        [
            self.matrix[(0, 0)],
            self.matrix[(0, 1)],
            self.matrix[(1, 0)],
            self.matrix[(1, 1)],
        ]
    }

    pub fn offset(&self) -> Point {
        Point::new(self.offset.x, self.offset.y)
    }

    pub fn determinant(&self) -> f64 {
        self.matrix.determinant()
    }

    pub fn apply(&self, p: Point) -> Point {
        let v = self.matrix * Vector2::new(p.x, p.y) + self.offset;
        Point::new(v.x, v.y)
    }
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}
