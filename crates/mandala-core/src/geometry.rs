//! Plane geometry shared by the gesture interpreter and the compositor.
//!
//! All coordinates are in surface pixels with the origin at the top-left
//! corner and y growing downwards, the same convention as a browser canvas.
//! Angles returned by [`angle`] are in radians.

use serde::{Deserialize, Serialize};

/// A point (or vector) in surface pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(p1: Point, p2: Point) -> f64 {
    (p2.x - p1.x).hypot(p2.y - p1.y)
}

/// Direction of the vector from `p1` to `p2`, in radians.
///
/// Coincident points give `atan2(0, 0) == 0`; callers treat that as a valid
/// (if meaningless) angle rather than an error.
#[inline]
pub fn angle(p1: Point, p2: Point) -> f64 {
    (p2.y - p1.y).atan2(p2.x - p1.x)
}

/// Arithmetic mean of two points.
#[inline]
pub fn midpoint(p1: Point, p2: Point) -> Point {
    Point {
        x: (p1.x + p2.x) / 2.0,
        y: (p1.y + p2.y) / 2.0,
    }
}

/// 2D affine matrix in canvas order `[a b c d e f]`.
///
/// A point maps as:
/// ```text
/// x' = a * x + c * y + e
/// y' = b * x + d * y + f
/// ```
///
/// [`translate`](Affine::translate), [`rotate`](Affine::rotate) and
/// [`scale`](Affine::scale) post-multiply, so a chain reads in the same order
/// as successive `CanvasRenderingContext2D` calls: the last operation is the
/// first one applied to a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    pub const IDENTITY: Affine = Affine {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// `self * other`: `other` is applied to a point first.
    pub fn then(self, other: Affine) -> Affine {
        Affine {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn translate(self, tx: f64, ty: f64) -> Affine {
        self.then(Affine {
            e: tx,
            f: ty,
            ..Affine::IDENTITY
        })
    }

    /// Rotate by `radians`; positive turns clockwise on a y-down surface.
    pub fn rotate(self, radians: f64) -> Affine {
        let (sin, cos) = radians.sin_cos();
        self.then(Affine {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        })
    }

    pub fn scale(self, factor: f64) -> Affine {
        self.then(Affine {
            a: factor,
            d: factor,
            ..Affine::IDENTITY
        })
    }

    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Inverse matrix, or `None` when the matrix is singular or not finite.
    pub fn invert(&self) -> Option<Affine> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < f64::EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;
        Some(Affine {
            a: self.d * inv_det,
            b: -self.b * inv_det,
            c: -self.c * inv_det,
            d: self.a * inv_det,
            e: (self.c * self.f - self.d * self.e) * inv_det,
            f: (self.b * self.e - self.a * self.f) * inv_det,
        })
    }

    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        Point {
            x: self.a * p.x + self.c * p.y + self.e,
            y: self.b * p.x + self.d * p.y + self.f,
        }
    }

    /// Largest absolute difference between corresponding coefficients.
    pub fn max_difference(&self, other: &Affine) -> f64 {
        [
            self.a - other.a,
            self.b - other.b,
            self.c - other.c,
            self.d - other.d,
            self.e - other.e,
            self.f - other.f,
        ]
        .iter()
        .fold(0.0, |acc, v| acc.max(v.abs()))
    }
}
