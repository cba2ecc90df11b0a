//! Residual and Jacobian assembly against the SDF map.
//!
//! For a scan point `p` in the sensor frame and pose `T`, the residual is
//! the map's signed distance at `T·p`: zero when the point lies exactly on a
//! mapped surface. The Jacobian row is the map gradient at that point
//! applied to the 2×3 sensitivity of the transformed point with respect to
//! the pose parameters `(Δx, Δy, Δθ)`:
//!
//! - the translational block is the 2×2 identity (a unit perturbation in Δx
//!   or Δy moves the point by one unit along that axis);
//! - the rotational column is `dR·p`, where `dR` is the derivative of the
//!   current rotation block with respect to its angle and `p` the point's
//!   *local* coordinates.

use crate::core::{Point2D, PointCloud2D, Pose2D};
use crate::map::SdfMap;

/// Residuals, Jacobian rows, and raw map gradients for one scan at one pose.
///
/// Rows are in scan order. The gradients are the untouched per-point map
/// gradients, kept for diagnostics.
#[derive(Clone, Debug)]
pub struct Linearization {
    /// Signed-distance residual per scan point.
    pub residuals: Vec<f32>,
    /// Jacobian row per scan point: ∂residual/∂(Δx, Δy, Δθ).
    pub jacobian: Vec<[f32; 3]>,
    /// Raw map gradient per scan point.
    pub gradients: Vec<Point2D>,
}

impl Linearization {
    /// Evaluate residuals and Jacobian for `scan` at `pose` against `map`.
    pub fn compute<M: SdfMap>(scan: &PointCloud2D, pose: Pose2D, map: &M) -> Self {
        let n = scan.len();
        let mut residuals = Vec::with_capacity(n);
        let mut jacobian = Vec::with_capacity(n);
        let mut gradients = Vec::with_capacity(n);

        let (sin, cos) = pose.theta.sin_cos();

        for local in scan.iter() {
            let global = pose.transform_point(local);
            let (value, grad) = map.value_and_gradient(global);

            // dR·p with dR = [[-sin, -cos], [cos, -sin]]
            let rot_x = -sin * local.x - cos * local.y;
            let rot_y = cos * local.x - sin * local.y;

            residuals.push(value);
            jacobian.push([grad.x, grad.y, grad.x * rot_x + grad.y * rot_y]);
            gradients.push(grad);
        }

        Self {
            residuals,
            jacobian,
            gradients,
        }
    }

    /// Number of scan points in this linearization.
    #[inline]
    pub fn len(&self) -> usize {
        self.residuals.len()
    }

    /// Check if the linearization is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.residuals.is_empty()
    }

    /// Largest raw Jacobian entry.
    ///
    /// When this is not positive the map carries no usable slope anywhere
    /// near the scan and no improving step direction exists.
    pub fn max_jacobian_entry(&self) -> f32 {
        self.jacobian
            .iter()
            .flat_map(|row| row.iter().copied())
            .fold(f32::NEG_INFINITY, f32::max)
    }
}
