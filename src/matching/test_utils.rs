//! Shared test utilities for the alignment solver.
//!
//! Analytic SDF maps and scan samplers used across the matcher test suites.

use crate::core::{Point2D, PointCloud2D, Pose2D};
use crate::map::SdfMap;

/// SDF of a circle: zero on the circle, negative inside, positive outside.
pub struct CircleSdf {
    center: Point2D,
    radius: f32,
    disc: f32,
    /// Fuse calls observed, as (pose, point count).
    pub fused: Vec<(Pose2D, usize)>,
}

impl CircleSdf {
    pub fn new(center: Point2D, radius: f32, disc: f32) -> Self {
        Self {
            center,
            radius,
            disc,
            fused: Vec::new(),
        }
    }
}

impl SdfMap for CircleSdf {
    fn discretization(&self) -> f32 {
        self.disc
    }

    fn value_and_gradient(&self, point: Point2D) -> (f32, Point2D) {
        let offset = point - self.center;
        let value = offset.length() - self.radius;
        (value, offset.normalized())
    }

    fn fuse(&mut self, scan: &PointCloud2D, pose: Pose2D) {
        self.fused.push((pose, scan.len()));
    }
}

/// SDF of the boundary of an axis-aligned room `[0, width] × [0, height]`:
/// zero on the walls, positive inside, negative outside.
pub struct RoomSdf {
    width: f32,
    height: f32,
    disc: f32,
    /// Fuse calls observed, as (pose, point count).
    pub fused: Vec<(Pose2D, usize)>,
}

impl RoomSdf {
    pub fn new(width: f32, height: f32, disc: f32) -> Self {
        Self {
            width,
            height,
            disc,
            fused: Vec::new(),
        }
    }
}

impl SdfMap for RoomSdf {
    fn discretization(&self) -> f32 {
        self.disc
    }

    fn value_and_gradient(&self, point: Point2D) -> (f32, Point2D) {
        // Distance to the nearest of the four walls; the gradient is the
        // inward axis direction of that wall.
        let candidates = [
            (point.x, Point2D::new(1.0, 0.0)),
            (self.width - point.x, Point2D::new(-1.0, 0.0)),
            (point.y, Point2D::new(0.0, 1.0)),
            (self.height - point.y, Point2D::new(0.0, -1.0)),
        ];

        candidates
            .into_iter()
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .unwrap()
    }

    fn fuse(&mut self, scan: &PointCloud2D, pose: Pose2D) {
        self.fused.push((pose, scan.len()));
    }
}

/// Map with a constant value and zero gradient everywhere.
pub struct FlatSdf {
    value: f32,
    /// Fuse calls observed, as (pose, point count).
    pub fused: Vec<(Pose2D, usize)>,
}

impl FlatSdf {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            fused: Vec::new(),
        }
    }
}

impl SdfMap for FlatSdf {
    fn discretization(&self) -> f32 {
        1.0
    }

    fn value_and_gradient(&self, _point: Point2D) -> (f32, Point2D) {
        (self.value, Point2D::ZERO)
    }

    fn fuse(&mut self, scan: &PointCloud2D, pose: Pose2D) {
        self.fused.push((pose, scan.len()));
    }
}

/// Planar slope: value grows along a fixed direction, gradient constant.
pub struct SlopeSdf {
    direction: Point2D,
    disc: f32,
    /// Fuse calls observed, as (pose, point count).
    pub fused: Vec<(Pose2D, usize)>,
}

impl SlopeSdf {
    pub fn new(direction: Point2D, disc: f32) -> Self {
        Self {
            direction,
            disc,
            fused: Vec::new(),
        }
    }
}

impl SdfMap for SlopeSdf {
    fn discretization(&self) -> f32 {
        self.disc
    }

    fn value_and_gradient(&self, point: Point2D) -> (f32, Point2D) {
        (self.direction.dot(&point), self.direction)
    }

    fn fuse(&mut self, scan: &PointCloud2D, pose: Pose2D) {
        self.fused.push((pose, scan.len()));
    }
}

/// Sample `n` points on a circle and express them in `sensor_pose`'s frame.
///
/// At `sensor_pose` the transformed points lie exactly on the circle, so the
/// residual against a matching [`CircleSdf`] is zero.
pub fn ring_scan(center: Point2D, radius: f32, n: usize, sensor_pose: Pose2D) -> PointCloud2D {
    let mut scan = PointCloud2D::with_capacity(n);
    for i in 0..n {
        let angle = i as f32 / n as f32 * std::f32::consts::TAU;
        let surface = center + Point2D::new(radius * angle.cos(), radius * angle.sin());
        scan.push(sensor_pose.inverse_transform_point(surface));
    }
    scan
}

/// Cast `n` evenly spaced rays from `sensor_pose` inside a
/// `width × height` room and return the wall hit points in the sensor frame.
pub fn room_scan(width: f32, height: f32, sensor_pose: Pose2D, n: usize) -> PointCloud2D {
    let mut scan = PointCloud2D::with_capacity(n);
    let max_range = (width * width + height * height).sqrt();

    for i in 0..n {
        let local_angle = i as f32 / n as f32 * std::f32::consts::TAU;
        let global_angle = sensor_pose.theta + local_angle;
        let (sin, cos) = global_angle.sin_cos();

        let mut range = max_range;
        // Right wall
        if cos > 0.0 {
            let t = (width - sensor_pose.x) / cos;
            let y = sensor_pose.y + t * sin;
            if t > 0.0 && t < range && (0.0..=height).contains(&y) {
                range = t;
            }
        }
        // Left wall
        if cos < 0.0 {
            let t = -sensor_pose.x / cos;
            let y = sensor_pose.y + t * sin;
            if t > 0.0 && t < range && (0.0..=height).contains(&y) {
                range = t;
            }
        }
        // Top wall
        if sin > 0.0 {
            let t = (height - sensor_pose.y) / sin;
            let x = sensor_pose.x + t * cos;
            if t > 0.0 && t < range && (0.0..=width).contains(&x) {
                range = t;
            }
        }
        // Bottom wall
        if sin < 0.0 {
            let t = -sensor_pose.y / sin;
            let x = sensor_pose.x + t * cos;
            if t > 0.0 && t < range && (0.0..=width).contains(&x) {
                range = t;
            }
        }

        let (ls, lc) = local_angle.sin_cos();
        scan.push(Point2D::new(range * lc, range * ls));
    }

    scan
}
