//! Signed distance field map abstraction.
//!
//! The aligner never sees a concrete map type; it talks to the map through
//! the [`SdfMap`] trait. This keeps the solver independent of the storage
//! layout, so a uniform grid, a sparse/hashed grid, or a tree-based field
//! can be substituted without touching the optimization code.

use crate::core::{Point2D, PointCloud2D, Pose2D};

/// Capability contract for a signed distance field map.
///
/// The map supports exactly two operations: a point query returning the
/// signed distance and its gradient, and a fusion update that integrates an
/// aligned scan. How the field is stored, grown, and interpolated between
/// cells is entirely up to the implementation.
///
/// # Example
///
/// ```ignore
/// use antara_slam::{PoseEstimator, SdfMap};
///
/// fn process<M: SdfMap>(estimator: &mut PoseEstimator, map: &mut M, scan: &PointCloud2D) {
///     let result = estimator.align_and_fuse(scan, Pose2D::identity(), map);
///     if let Ok(result) = result {
///         println!("pose: {:?}", result.pose);
///     }
/// }
/// ```
pub trait SdfMap {
    /// Cell resolution of the map in meters.
    ///
    /// The solver's translation increments are expressed in discretization
    /// units and rescaled by this value when the pose update is built, so
    /// each step moves at most a cell-sized fraction of the full
    /// Gauss-Newton correction.
    fn discretization(&self) -> f32;

    /// Query the signed distance and gradient at a world point.
    ///
    /// Must return a defined (possibly zero or saturated) value for *any*
    /// point, including points outside previously observed space.
    ///
    /// The signed distance is in meters: zero on a mapped surface, sign
    /// indicating the side. The gradient is the spatial derivative of the
    /// field (per meter), pointing along increasing distance.
    fn value_and_gradient(&self, point: Point2D) -> (f32, Point2D);

    /// Integrate a scan, transformed by `pose`, into the map.
    ///
    /// Mutates persisted map state. Safe to call repeatedly with the same
    /// committed pose.
    fn fuse(&mut self, scan: &PointCloud2D, pose: Pose2D);
}
