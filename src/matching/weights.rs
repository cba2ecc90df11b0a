//! Robust per-point weights for the alignment solve.
//!
//! Each scan point gets a scalar weight in (0, 1] combining two effects:
//!
//! - **Cauchy M-estimator**: `1 / (1 + r²/scale²)` down-weights points
//!   whose signed-distance residual is large, reducing the influence of
//!   outlier measurements on the normal equations.
//! - **Range normalization**: points farther from the sensor are
//!   down-weighted relative to nearer ones (divisor in [1, 2]), reflecting
//!   the higher positional uncertainty of long-range returns.
//!
//! The weights form a diagonal matrix conceptually, but are kept as a plain
//! vector and contracted directly into `JᵀWJ` and `JᵀWr`.

use crate::core::math::sq;
use crate::core::PointCloud2D;

/// Cauchy weight for a single residual.
///
/// Equals 1 at zero residual and decreases monotonically in |residual|.
#[inline]
pub fn cauchy_weight(residual: f32, scale: f32) -> f32 {
    1.0 / (1.0 + sq(residual) / sq(scale))
}

/// Compute robust weights for every scan point.
///
/// `residuals` must be the signed-distance residuals of `scan` at the
/// current pose estimate, one per point in order.
///
/// If all points share the same range, the normalization divisor is 1 for
/// every point (the spread is empty, so there is nothing to normalize by).
///
/// # Panics
/// Panics in debug builds if `residuals.len() != scan.len()`.
pub fn scan_weights(scan: &PointCloud2D, residuals: &[f32], scale: f32) -> Vec<f32> {
    debug_assert_eq!(scan.len(), residuals.len());

    let mut min_range = f32::MAX;
    let mut max_range: f32 = 0.0;
    for p in scan.iter() {
        let r = p.length();
        min_range = min_range.min(r);
        max_range = max_range.max(r);
    }

    let range_spread = max_range - min_range;

    scan.iter()
        .zip(residuals)
        .map(|(p, &res)| {
            let norm_range = if range_spread > 0.0 {
                (p.length() - min_range) / range_spread + 1.0
            } else {
                1.0
            };
            cauchy_weight(res, scale) / norm_range
        })
        .collect()
}
