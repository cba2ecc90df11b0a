//! Test utilities for alignment scenarios.
//!
//! Analytic SDF maps and scan generators shared by the integration tests.

#![allow(dead_code)]

use antara_slam::{Point2D, PointCloud2D, Pose2D, SdfMap};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// SDF of the boundary of an axis-aligned room `[0, width] × [0, height]`:
/// zero on the walls, positive inside, negative outside. Records fuse calls.
pub struct RoomSdf {
    pub width: f32,
    pub height: f32,
    pub disc: f32,
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
    pub value: f32,
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

/// Planar slope: constant gradient along one direction.
pub struct SlopeSdf {
    pub direction: Point2D,
    pub fused: Vec<(Pose2D, usize)>,
}

impl SlopeSdf {
    pub fn new(direction: Point2D) -> Self {
        Self {
            direction,
            fused: Vec::new(),
        }
    }
}

impl SdfMap for SlopeSdf {
    fn discretization(&self) -> f32 {
        1.0
    }

    fn value_and_gradient(&self, point: Point2D) -> (f32, Point2D) {
        (self.direction.dot(&point), self.direction)
    }

    fn fuse(&mut self, scan: &PointCloud2D, pose: Pose2D) {
        self.fused.push((pose, scan.len()));
    }
}

/// Map that must never be queried; any query or fusion panics.
pub struct UntouchableSdf;

impl SdfMap for UntouchableSdf {
    fn discretization(&self) -> f32 {
        1.0
    }

    fn value_and_gradient(&self, _point: Point2D) -> (f32, Point2D) {
        panic!("map must not be queried");
    }

    fn fuse(&mut self, _scan: &PointCloud2D, _pose: Pose2D) {
        panic!("map must not be fused");
    }
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

/// Room scan with uniform range noise of amplitude `noise`, seeded for
/// reproducibility.
pub fn noisy_room_scan(
    width: f32,
    height: f32,
    sensor_pose: Pose2D,
    n: usize,
    noise: f32,
    seed: u64,
) -> PointCloud2D {
    let clean = room_scan(width, height, sensor_pose, n);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut scan = PointCloud2D::with_capacity(n);
    for p in clean.iter() {
        let range = p.length();
        if range > 0.0 {
            let jitter = (rng.gen::<f32>() - 0.5) * 2.0 * noise;
            scan.push(p * ((range + jitter) / range));
        } else {
            scan.push(p);
        }
    }
    scan
}
