//! 2D pose type for sensor position and orientation.
//!
//! Coordinate frame follows ROS REP-103:
//! - X-forward, Y-left, Z-up (right-handed)
//! - Counter-clockwise positive rotation

use super::math::normalize_angle;
use super::point::Point2D;

/// A 2D pose representing position and orientation.
///
/// This is an SE(2) rigid transform. `(x, y, theta)` is the compact form of
/// the 3×3 homogeneous matrix whose top-left 2×2 block is the rotation by
/// `theta` and whose last column is the translation; [`compose`](Self::compose)
/// is exactly the product of those matrices, so the rotation block stays
/// orthonormal by construction.
///
/// # Composition
///
/// Poses can be composed using the `*` operator (chain transformations):
/// ```
/// use antara_slam::core::Pose2D;
///
/// let pose_a = Pose2D::new(1.0, 0.0, std::f32::consts::FRAC_PI_2);
/// let pose_b = Pose2D::new(1.0, 0.0, 0.0);
/// let combined = pose_a * pose_b;  // Apply pose_b in pose_a's frame
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose2D {
    /// X position in meters.
    pub x: f32,
    /// Y position in meters.
    pub y: f32,
    /// Heading angle in radians [-π, π), CCW positive from X-axis.
    pub theta: f32,
}

impl Pose2D {
    /// Create a new pose.
    ///
    /// `theta` is normalized to [-π, π).
    #[inline]
    pub fn new(x: f32, y: f32, theta: f32) -> Self {
        Self {
            x,
            y,
            theta: normalize_angle(theta),
        }
    }

    /// Create an identity pose (origin, facing forward).
    #[inline]
    pub const fn identity() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            theta: 0.0,
        }
    }

    /// Get the position as a Point2D.
    #[inline]
    pub fn position(self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// Transform a point from this pose's local frame to the world frame.
    ///
    /// Equivalent to multiplying the homogeneous point (x, y, 1) by the
    /// pose matrix.
    #[inline]
    pub fn transform_point(self, point: Point2D) -> Point2D {
        let (sin, cos) = self.theta.sin_cos();
        Point2D {
            x: self.x + point.x * cos - point.y * sin,
            y: self.y + point.x * sin + point.y * cos,
        }
    }

    /// Transform a point from the world frame to this pose's local frame.
    #[inline]
    pub fn inverse_transform_point(self, point: Point2D) -> Point2D {
        let (sin, cos) = self.theta.sin_cos();
        let dx = point.x - self.x;
        let dy = point.y - self.y;
        Point2D {
            x: dx * cos + dy * sin,
            y: -dx * sin + dy * cos,
        }
    }

    /// Compose this pose with another (chain transformations).
    ///
    /// Returns a new pose representing: apply `other` in `self`'s frame.
    /// This is matrix right-multiplication: self · other.
    #[inline]
    pub fn compose(self, other: Pose2D) -> Self {
        let pos = self.transform_point(other.position());
        Self::new(pos.x, pos.y, self.theta + other.theta)
    }

    /// Compute the inverse of this pose.
    ///
    /// The inverse, composed with the original, yields identity:
    /// `pose.compose(pose.inverse()) ≈ Pose2D::identity()`
    #[inline]
    pub fn inverse(self) -> Self {
        let (sin, cos) = self.theta.sin_cos();
        Self::new(
            -self.x * cos - self.y * sin,
            self.x * sin - self.y * cos,
            -self.theta,
        )
    }

    /// Check if this pose is approximately equal to another.
    #[inline]
    pub fn approx_eq(self, other: Pose2D, pos_epsilon: f32, angle_epsilon: f32) -> bool {
        use super::math::angles_approx_equal;
        (self.x - other.x).abs() <= pos_epsilon
            && (self.y - other.y).abs() <= pos_epsilon
            && angles_approx_equal(self.theta, other.theta, angle_epsilon)
    }
}

impl std::ops::Mul for Pose2D {
    type Output = Self;

    /// Compose two poses (same as `compose`).
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.compose(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_new_normalizes_angle() {
        // At ±π boundary, floating-point may give +π or -π; both are valid
        let pose = Pose2D::new(0.0, 0.0, 3.0 * PI);
        assert!(pose.theta.abs() - PI < 1e-5);
    }

    #[test]
    fn test_identity() {
        let pose = Pose2D::identity();
        assert_eq!(pose.x, 0.0);
        assert_eq!(pose.y, 0.0);
        assert_eq!(pose.theta, 0.0);
    }

    #[test]
    fn test_transform_point() {
        let pose = Pose2D::identity();
        let world = pose.transform_point(Point2D::new(1.0, 0.0));
        assert_relative_eq!(world.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(world.y, 0.0, epsilon = 1e-6);

        // At (1, 0), rotated 90 degrees
        let pose = Pose2D::new(1.0, 0.0, FRAC_PI_2);
        let world = pose.transform_point(Point2D::new(1.0, 0.0));
        assert_relative_eq!(world.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(world.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_inverse_transform_point() {
        let pose = Pose2D::new(1.0, 2.0, FRAC_PI_2);
        let world = Point2D::new(3.0, 4.0);

        let local = pose.inverse_transform_point(world);
        let back = pose.transform_point(local);

        assert_relative_eq!(back.x, world.x, epsilon = 1e-6);
        assert_relative_eq!(back.y, world.y, epsilon = 1e-6);
    }

    #[test]
    fn test_compose() {
        let translate = Pose2D::new(1.0, 0.0, 0.0);
        let rotate = Pose2D::new(0.0, 0.0, FRAC_PI_2);

        let combined = translate.compose(rotate);
        assert_relative_eq!(combined.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(combined.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(combined.theta, FRAC_PI_2, epsilon = 1e-6);

        // Rotate then translate (in rotated frame)
        let combined2 = rotate.compose(translate);
        assert_relative_eq!(combined2.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(combined2.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_compose_inverse_is_identity() {
        for &(x, y, theta) in &[
            (0.0, 0.0, 0.0),
            (1.0, 2.0, 0.5),
            (-3.0, 0.7, -2.9),
            (10.0, -4.0, FRAC_PI_2),
        ] {
            let pose = Pose2D::new(x, y, theta);
            let identity = pose.compose(pose.inverse());

            assert_relative_eq!(identity.x, 0.0, epsilon = 1e-5);
            assert_relative_eq!(identity.y, 0.0, epsilon = 1e-5);
            assert_relative_eq!(identity.theta, 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_mul_operator() {
        let a = Pose2D::new(1.0, 0.0, FRAC_PI_2);
        let b = Pose2D::new(1.0, 0.0, 0.0);
        assert_eq!(a.compose(b), a * b);
    }

    #[test]
    fn test_approx_eq() {
        let a = Pose2D::new(1.0, 2.0, 0.5);
        let b = Pose2D::new(1.001, 2.001, 0.501);

        assert!(a.approx_eq(b, 0.01, 0.01));
        assert!(!a.approx_eq(b, 0.0001, 0.0001));
    }
}
