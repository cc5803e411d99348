//! Affine transformation matrices.

use serde::{Deserialize, Serialize};

use super::Point;

/// A 2D transformation matrix.
///
/// PDF uses matrices of the form:
/// ```text
/// [ a  b  0 ]
/// [ c  d  0 ]
/// [ e  f  1 ]
/// ```
///
/// Where (a,b,c,d) define scaling/rotation/skewing and (e,f) define translation.
/// Text items and viewports both report their transforms in this
/// `[a, b, c, d, e, f]` layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 6]", into = "[f32; 6]")]
pub struct Matrix {
    /// Horizontal scaling component
    pub a: f32,
    /// Rotation/skew component
    pub b: f32,
    /// Rotation/skew component
    pub c: f32,
    /// Vertical scaling component
    pub d: f32,
    /// Horizontal translation
    pub e: f32,
    /// Vertical translation
    pub f: f32,
}

impl Matrix {
    /// Create an identity matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_highlight::geometry::Matrix;
    ///
    /// let m = Matrix::identity();
    /// assert_eq!(m.to_array(), [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
    /// ```
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// Create a matrix from its six components.
    pub fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Create a translation matrix.
    pub fn translation(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Create a scaling matrix.
    pub fn scaling(sx: f32, sy: f32) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// The `[1, 0, 0, -1, 0, 0]` matrix mirroring the y axis.
    ///
    /// PDF text space grows upwards while screen space grows downwards.
    pub fn vertical_flip() -> Self {
        Self::new(1.0, 0.0, 0.0, -1.0, 0.0, 0.0)
    }

    /// Build a matrix from the `[a, b, c, d, e, f]` array layout.
    pub fn from_array(m: [f32; 6]) -> Self {
        Self::new(m[0], m[1], m[2], m[3], m[4], m[5])
    }

    /// Return the `[a, b, c, d, e, f]` array layout.
    pub fn to_array(&self) -> [f32; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    /// Multiply this matrix with another matrix.
    ///
    /// Matrix multiplication is not commutative. The result maps a point
    /// through `self` first and then through `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_highlight::geometry::Matrix;
    ///
    /// let scale_then_move = Matrix::scaling(2.0, 2.0).multiply(&Matrix::translation(10.0, 0.0));
    /// let p = scale_then_move.transform_point(1.0, 1.0);
    /// assert_eq!((p.x, p.y), (12.0, 2.0));
    /// ```
    pub fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Transform a point using this matrix.
    pub fn transform_point(&self, x: f32, y: f32) -> Point {
        Point {
            x: self.a * x + self.c * y + self.e,
            y: self.b * x + self.d * y + self.f,
        }
    }

    /// Horizontal scale factor, including any rotation of the x axis.
    pub fn horizontal_scale(&self) -> f32 {
        (self.a * self.a + self.b * self.b).sqrt()
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<[f32; 6]> for Matrix {
    fn from(m: [f32; 6]) -> Self {
        Self::from_array(m)
    }
}

impl From<Matrix> for [f32; 6] {
    fn from(m: Matrix) -> Self {
        m.to_array()
    }
}
