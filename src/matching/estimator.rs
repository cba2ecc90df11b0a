//! Gauss-Newton pose estimation against the SDF map.
//!
//! [`PoseEstimator`] owns the persistent sensor pose and refines it one scan
//! at a time: linearize the scan against the map at the current estimate,
//! solve the robustly weighted normal equations for a pose increment,
//! compose the increment onto the estimate, and repeat until the error
//! change falls below threshold, the iteration budget runs out, or the map
//! offers no gradient to follow. The final pose is then committed and the
//! scan fused into the map.

use log::{debug, trace};

use crate::core::{PointCloud2D, Pose2D};
use crate::map::SdfMap;

use super::config::EstimatorConfig;
use super::error::AlignError;
use super::residual::Linearization;
use super::weights::scan_weights;

/// Result of a completed alignment call.
#[derive(Clone, Copy, Debug)]
pub struct AlignResult {
    /// The committed pose after alignment.
    pub pose: Pose2D,
    /// Number of Gauss-Newton iterations performed.
    pub iterations: usize,
    /// Weighted squared error at the final estimate.
    pub final_error: f32,
}

/// Scan-to-map pose estimator.
///
/// One estimator instance owns one pose and should be paired with one map;
/// both are mutated by [`align_and_fuse`](Self::align_and_fuse), so callers
/// processing scans concurrently must use fully separate estimator/map
/// pairs. There is no cancellation: the iteration budget is the only bound
/// on a call's runtime.
///
/// The solver never rejects a step: an update that increases the weighted
/// error is still applied, and the final pose is fused into the map
/// regardless of solve quality. Callers that need protection against a
/// diverged solve must inspect [`AlignResult::final_error`] and
/// [`AlignResult::iterations`] themselves.
#[derive(Clone, Debug)]
pub struct PoseEstimator {
    pose: Pose2D,
    config: EstimatorConfig,
}

impl PoseEstimator {
    /// Create an estimator starting at `initial_pose`.
    pub fn new(initial_pose: Pose2D, config: EstimatorConfig) -> Self {
        Self {
            pose: initial_pose,
            config,
        }
    }

    /// The current pose estimate.
    pub fn pose(&self) -> Pose2D {
        self.pose
    }

    /// The solver configuration.
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Align `scan` against `map`, commit the refined pose, and fuse the
    /// scan into the map at that pose.
    ///
    /// `pose_delta_guess` is the expected motion since the previous scan,
    /// expressed in the sensor's current local frame (e.g. from odometry);
    /// pass [`Pose2D::identity`] when no prior is available.
    ///
    /// # Errors
    ///
    /// - [`AlignError::DegenerateScan`] if the scan has fewer than 3 points
    ///   (three pose unknowns need at least three constraints);
    /// - [`AlignError::SingularSystem`] if the weighted normal equations
    ///   cannot be solved (scan geometry leaves a pose direction
    ///   unconstrained);
    /// - [`AlignError::Config`] for an unusable configuration.
    ///
    /// On any error the call aborts before mutating the pose or the map.
    pub fn align_and_fuse<M: SdfMap>(
        &mut self,
        scan: &PointCloud2D,
        pose_delta_guess: Pose2D,
        map: &mut M,
    ) -> Result<AlignResult, AlignError> {
        self.config.validate()?;

        if scan.len() < 3 {
            return Err(AlignError::DegenerateScan { points: scan.len() });
        }

        let disc = map.discretization();
        let mut estimate = self.pose.compose(pose_delta_guess);

        let mut lin = Linearization::compute(scan, estimate, map);
        let mut weights = scan_weights(scan, &lin.residuals, self.config.cauchy_scale);
        let mut error = weighted_error(&lin.residuals, &weights);
        debug!("[SdfAlign] initial error: {:.6}", error);

        let mut error_delta = f32::INFINITY;
        let mut iterations = 0;

        while iterations < self.config.max_iterations
            && error_delta.abs() > self.config.min_error_delta
            && lin.max_jacobian_entry() > 0.0
        {
            // Weights for this iteration come from the residual at its
            // start and are reused for the error comparison after the step.
            weights = scan_weights(scan, &lin.residuals, self.config.cauchy_scale);

            let delta = solve_normal_equations(&lin, &weights, self.config.singular_epsilon)
                .ok_or(AlignError::SingularSystem)?;

            // Translation components are in map-discretization units.
            let increment = Pose2D::new(delta[0] * disc, delta[1] * disc, delta[2]);
            let next = estimate.compose(increment);

            lin = Linearization::compute(scan, next, map);
            let next_error = weighted_error(&lin.residuals, &weights);
            error_delta = error - next_error;

            // The step is accepted even if it increased the error; a
            // diverging solve runs into the iteration cap rather than
            // being rolled back.
            estimate = next;
            error = next_error;
            iterations += 1;

            trace!(
                "[SdfAlign] iteration {}: error {:.6} (delta {:+.6})",
                iterations,
                error,
                error_delta
            );
        }

        self.pose = estimate;
        map.fuse(scan, self.pose);

        debug!(
            "[SdfAlign] committed pose ({:.3}, {:.3}, {:.3}) after {} iterations, error {:.6}",
            self.pose.x, self.pose.y, self.pose.theta, iterations, error
        );

        Ok(AlignResult {
            pose: self.pose,
            iterations,
            final_error: error,
        })
    }
}

/// Weighted squared error `rᵀWr`.
fn weighted_error(residuals: &[f32], weights: &[f32]) -> f32 {
    residuals
        .iter()
        .zip(weights)
        .map(|(&r, &w)| w * r * r)
        .sum()
}

/// Form `(JᵀWJ)·Δp = JᵀW·r` and solve for the descent step.
///
/// The weights stay a vector and are contracted directly into the 3×3
/// system. Returns `None` when the system determinant falls below
/// `singular_epsilon`.
fn solve_normal_equations(
    lin: &Linearization,
    weights: &[f32],
    singular_epsilon: f32,
) -> Option<[f32; 3]> {
    let mut h = [[0.0f32; 3]; 3];
    let mut g = [0.0f32; 3];

    for (row, (&r, &w)) in lin.jacobian.iter().zip(lin.residuals.iter().zip(weights)) {
        for i in 0..3 {
            let wj = w * row[i];
            for j in 0..3 {
                h[i][j] += wj * row[j];
            }
            g[i] += wj * r;
        }
    }

    solve_3x3(&h, &g, singular_epsilon)
}

/// Solve the 3x3 system via Cramer's rule.
///
/// Returns `-(H⁻¹·g)`: the negation makes the result the error-reducing
/// Gauss-Newton step for residuals measured along increasing signed
/// distance. `None` if the matrix is singular.
fn solve_3x3(h: &[[f32; 3]; 3], g: &[f32; 3], singular_epsilon: f32) -> Option<[f32; 3]> {
    let det = h[0][0] * (h[1][1] * h[2][2] - h[1][2] * h[2][1])
        - h[0][1] * (h[1][0] * h[2][2] - h[1][2] * h[2][0])
        + h[0][2] * (h[1][0] * h[2][1] - h[1][1] * h[2][0]);

    if det.abs() < singular_epsilon {
        return None;
    }

    let inv_det = 1.0 / det;

    let inv = [
        [
            (h[1][1] * h[2][2] - h[1][2] * h[2][1]) * inv_det,
            (h[0][2] * h[2][1] - h[0][1] * h[2][2]) * inv_det,
            (h[0][1] * h[1][2] - h[0][2] * h[1][1]) * inv_det,
        ],
        [
            (h[1][2] * h[2][0] - h[1][0] * h[2][2]) * inv_det,
            (h[0][0] * h[2][2] - h[0][2] * h[2][0]) * inv_det,
            (h[0][2] * h[1][0] - h[0][0] * h[1][2]) * inv_det,
        ],
        [
            (h[1][0] * h[2][1] - h[1][1] * h[2][0]) * inv_det,
            (h[0][1] * h[2][0] - h[0][0] * h[2][1]) * inv_det,
            (h[0][0] * h[1][1] - h[0][1] * h[1][0]) * inv_det,
        ],
    ];

    Some([
        -(inv[0][0] * g[0] + inv[0][1] * g[1] + inv[0][2] * g[2]),
        -(inv[1][0] * g[0] + inv[1][1] * g[1] + inv[1][2] * g[2]),
        -(inv[2][0] * g[0] + inv[2][1] * g[1] + inv[2][2] * g[2]),
    ])
}
