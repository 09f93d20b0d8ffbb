//! 2D points and rotations.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// A 2D coordinate.
///
/// `PartialEq` is exact; use [`Point::near`] wherever a tolerance applies.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin.
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Point at `length` from the origin along `angle` (radians).
    pub fn polar(angle: f64, length: f64) -> Self {
        Self::new(angle.cos() * length, angle.sin() * length)
    }

    /// Calculates the distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (*self - *other).length()
    }

    /// Length of the point seen as a vector.
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Direction of the point seen as a vector, in radians.
    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Tolerant equality.
    pub fn near(&self, other: &Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }

    /// Dot product.
    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the cross product.
    pub fn cross(&self, other: &Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Unit vector in the same direction; the zero vector stays zero.
    pub fn normalized(&self) -> Point {
        let len = self.length();
        if len <= f64::EPSILON {
            Point::zero()
        } else {
            Point::new(self.x / len, self.y / len)
        }
    }

    /// Vector rotated a quarter turn counter-clockwise.
    pub fn perp(&self) -> Point {
        Point::new(-self.y, self.x)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl From<[f64; 2]> for Point {
    fn from(value: [f64; 2]) -> Self {
        Point::new(value[0], value[1])
    }
}

/// A rotation about the origin with cached trig values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    sin: f64,
    cos: f64,
}

impl Rotation {
    /// No rotation.
    pub const IDENTITY: Rotation = Rotation { sin: 0.0, cos: 1.0 };

    pub fn from_radians(angle: f64) -> Self {
        Self {
            sin: angle.sin(),
            cos: angle.cos(),
        }
    }

    pub fn from_degrees(angle: f64) -> Self {
        Self::from_radians(angle.to_radians())
    }

    /// The opposite rotation.
    pub fn inverse(&self) -> Self {
        Self {
            sin: -self.sin,
            cos: self.cos,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.sin == 0.0 && self.cos == 1.0
    }

    /// Rotates `p` about the origin.
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            p.x * self.cos - p.y * self.sin,
            p.x * self.sin + p.y * self.cos,
        )
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::IDENTITY
    }
}
