//! Mathematical utilities for angles.
//!
//! All angles are in radians. Coordinate frame follows ROS REP-103:
//! - X-forward, Y-left, Z-up
//! - Counter-clockwise positive rotation

use std::f32::consts::PI;

/// Two times PI (full circle in radians).
pub const TWO_PI: f32 = 2.0 * PI;

/// Normalize angle to [-π, π).
///
/// # Example
/// ```
/// use antara_slam::core::math::normalize_angle;
/// use std::f32::consts::PI;
///
/// // Values near ±π may normalize to either +π or -π due to floating-point
/// assert!(normalize_angle(3.0 * PI).abs() - PI < 1e-5);
/// assert!((normalize_angle(PI / 2.0) - PI / 2.0).abs() < 1e-6);
/// ```
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let mut a = angle % TWO_PI;
    if a >= PI {
        a -= TWO_PI;
    } else if a < -PI {
        a += TWO_PI;
    }
    a
}

/// Compute the signed angular difference between two angles.
///
/// Returns the shortest angular distance from `from` to `to`,
/// in the range [-π, π). Positive means counter-clockwise.
#[inline]
pub fn angle_diff(from: f32, to: f32) -> f32 {
    normalize_angle(to - from)
}

/// Check if two angles are approximately equal (within tolerance).
///
/// Handles wrap-around at ±π correctly.
#[inline]
pub fn angles_approx_equal(a: f32, b: f32, tolerance: f32) -> bool {
    angle_diff(a, b).abs() <= tolerance
}

/// Square of a value. Useful for avoiding `pow(x, 2)`.
#[inline]
pub fn sq(x: f32) -> f32 {
    x * x
}
