//! 2D point type in world coordinates.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Cartesian point (meters, f32).
///
/// Doubles as a 2D vector for gradients and directions.
/// Coordinate frame follows ROS REP-103: X-forward, Y-left.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    /// X coordinate in meters (forward).
    pub x: f32,
    /// Y coordinate in meters (left).
    pub y: f32,
}

impl Point2D {
    /// Create a new point.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Zero point (origin).
    pub const ZERO: Point2D = Point2D { x: 0.0, y: 0.0 };

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point2D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Length (magnitude) of this point as a vector from origin.
    #[inline]
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Normalize to unit length.
    #[inline]
    pub fn normalized(&self) -> Point2D {
        let len = self.length();
        if len > 0.0 {
            Point2D::new(self.x / len, self.y / len)
        } else {
            *self
        }
    }

    /// Dot product with another point (as vectors).
    #[inline]
    pub fn dot(&self, other: &Point2D) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Rotate this point around the origin by angle (radians).
    #[inline]
    pub fn rotate(&self, angle: f32) -> Point2D {
        let (sin, cos) = angle.sin_cos();
        Point2D::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }
}

impl Add for Point2D {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Point2D::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point2D {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Point2D::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Point2D {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Point2D::new(self.x * scalar, self.y * scalar)
    }
}
