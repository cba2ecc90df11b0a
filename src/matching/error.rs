//! Error types for scan-to-map alignment.

use thiserror::Error;

/// Alignment error type.
///
/// Every variant aborts the alignment call before any pose or map mutation;
/// none are retried internally. Retrying with a different initial guess is a
/// caller decision.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignError {
    /// The scan carries too few points to constrain the three pose
    /// parameters.
    #[error("degenerate scan: {points} points, need at least 3")]
    DegenerateScan {
        /// Number of points in the rejected scan.
        points: usize,
    },

    /// The weighted normal-equation matrix is singular or ill-conditioned
    /// beyond tolerance (e.g. a scan with no rotational or no translational
    /// information).
    #[error("weighted normal equations are singular")]
    SingularSystem,

    /// Invalid solver configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience result alias for alignment operations.
pub type Result<T> = std::result::Result<T, AlignError>;
