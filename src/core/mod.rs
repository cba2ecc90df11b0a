//! Core types: points, poses, scans, and angle math.

pub mod math;
pub mod point;
pub mod pose;
pub mod scan;

pub use point::Point2D;
pub use pose::Pose2D;
pub use scan::{PointCloud2D, PolarScan};
