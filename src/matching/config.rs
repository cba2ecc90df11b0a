//! Solver configuration.

use serde::{Deserialize, Serialize};

use super::error::AlignError;

/// Configuration for the Gauss-Newton pose estimator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Maximum number of Gauss-Newton iterations per alignment call.
    /// This is the only bound on a call's runtime.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Minimum change in weighted error between iterations to keep
    /// iterating. Once |Δerror| drops below this, the solve stops.
    #[serde(default = "default_min_error_delta")]
    pub min_error_delta: f32,

    /// Scale parameter of the Cauchy M-estimator used for outlier
    /// down-weighting. Smaller values reject outliers more aggressively.
    #[serde(default = "default_cauchy_scale")]
    pub cauchy_scale: f32,

    /// Determinant magnitude below which the weighted normal-equation
    /// matrix is treated as singular.
    #[serde(default = "default_singular_epsilon")]
    pub singular_epsilon: f32,
}

fn default_max_iterations() -> usize {
    100
}

fn default_min_error_delta() -> f32 {
    1e-2
}

fn default_cauchy_scale() -> f32 {
    0.05
}

fn default_singular_epsilon() -> f32 {
    1e-10
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            min_error_delta: default_min_error_delta(),
            cauchy_scale: default_cauchy_scale(),
            singular_epsilon: default_singular_epsilon(),
        }
    }
}

impl EstimatorConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for the iteration budget.
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Builder-style setter for the minimum error delta.
    pub fn with_min_error_delta(mut self, delta: f32) -> Self {
        self.min_error_delta = delta;
        self
    }

    /// Builder-style setter for the Cauchy scale.
    pub fn with_cauchy_scale(mut self, scale: f32) -> Self {
        self.cauchy_scale = scale;
        self
    }

    /// Check that all parameters are usable.
    pub fn validate(&self) -> Result<(), AlignError> {
        if self.max_iterations == 0 {
            return Err(AlignError::Config("max_iterations must be > 0".into()));
        }
        if !(self.min_error_delta > 0.0) {
            return Err(AlignError::Config("min_error_delta must be > 0".into()));
        }
        if !(self.cauchy_scale > 0.0) {
            return Err(AlignError::Config("cauchy_scale must be > 0".into()));
        }
        if !(self.singular_epsilon > 0.0) {
            return Err(AlignError::Config("singular_epsilon must be > 0".into()));
        }
        Ok(())
    }
}
