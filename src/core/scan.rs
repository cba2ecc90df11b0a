//! Scan types for lidar data representation.
//!
//! This module provides:
//! - `PolarScan`: Raw lidar scan in polar coordinates
//! - `PointCloud2D`: Cartesian scan endpoints in the sensor frame
//!
//! The aligner consumes `PointCloud2D`; `PolarScan::to_cartesian` converts
//! raw measurements with range validity filtering.

use super::point::Point2D;
use super::pose::Pose2D;
use serde::{Deserialize, Serialize};

/// Raw lidar scan in polar coordinates.
///
/// Points are ordered by angle (sequential around the scan).
/// Coordinate frame follows ROS REP-103:
/// - Angle 0 is forward (X-axis)
/// - Positive angles are counter-clockwise (toward Y-axis)
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PolarScan {
    /// Points as (angle_rad, distance_m).
    pub points: Vec<(f32, f32)>,
}

impl PolarScan {
    /// Create a new empty polar scan.
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a polar scan with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Add a measurement to the scan.
    #[inline]
    pub fn push(&mut self, angle: f32, distance: f32) {
        self.points.push((angle, distance));
    }

    /// Number of measurements in the scan.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the scan is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Convert to a cartesian `PointCloud2D` in the sensor frame.
    ///
    /// Filters out measurements with non-finite or out-of-range distances.
    ///
    /// # Arguments
    /// * `min_range` - Minimum valid range in meters
    /// * `max_range` - Maximum valid range in meters
    pub fn to_cartesian(&self, min_range: f32, max_range: f32) -> PointCloud2D {
        let mut cloud = PointCloud2D::with_capacity(self.points.len());

        for &(angle, dist) in &self.points {
            if dist.is_finite() && dist >= min_range && dist <= max_range {
                let (sin, cos) = angle.sin_cos();
                cloud.push(Point2D::new(dist * cos, dist * sin));
            }
        }

        cloud
    }
}

/// Cartesian scan endpoints in the sensor's local frame.
///
/// An ordered sequence of 2D points; the order of the originating scan is
/// preserved. Coordinate frame follows ROS REP-103: X-forward, Y-left.
#[derive(Clone, Debug, Default)]
pub struct PointCloud2D {
    /// Scan endpoints in meters.
    pub points: Vec<Point2D>,
}

impl PointCloud2D {
    /// Create a new empty point cloud.
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a point cloud with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Create from a slice of points.
    pub fn from_points(points: &[Point2D]) -> Self {
        Self {
            points: points.to_vec(),
        }
    }

    /// Add a point to the cloud.
    #[inline]
    pub fn push(&mut self, point: Point2D) {
        self.points.push(point);
    }

    /// Number of points in the cloud.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the cloud is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over points.
    pub fn iter(&self) -> impl Iterator<Item = Point2D> + '_ {
        self.points.iter().copied()
    }

    /// Transform the point cloud by a pose (local frame → world frame).
    pub fn transform(&self, pose: &Pose2D) -> Self {
        Self {
            points: self.points.iter().map(|&p| pose.transform_point(p)).collect(),
        }
    }
}
