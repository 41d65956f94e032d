//! Error types for skeleton and flagellum generation.
//!
//! Only configuration problems are reported as errors. Degenerate geometry
//! and inverted timing windows are clamped where they occur and logged.

use thiserror::Error;

/// Configuration errors raised at generation time, before any tick
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnimationError {
    #[error("segment length must be positive, got {0}")]
    NonPositiveSegmentLength(f32),

    #[error("skew limit must lie in [0, π), got {0} rad")]
    SkewLimitOutOfRange(f32),

    #[error("flagellum target vector has zero length")]
    ZeroLengthTarget,

    #[error("membrane needs at least 3 boundary points, got {0}")]
    TooFewPoints(usize),

    #[error("tessellation detail must be at least 1")]
    ZeroDetail,

    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("edge {edge} out of range for membrane with {count} edges")]
    EdgeOutOfRange { edge: usize, count: usize },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, AnimationError>;

/// Reject a skew limit that would let a joint fold back on itself
pub(crate) fn check_skew_limit(skew_limit: f32) -> Result<()> {
    if skew_limit.is_finite() && (0.0..std::f32::consts::PI).contains(&skew_limit) {
        Ok(())
    } else {
        Err(AnimationError::SkewLimitOutOfRange(skew_limit))
    }
}

/// Reject non-finite or negative scalars
pub(crate) fn check_non_negative(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AnimationError::InvalidParameter { name, value })
    }
}
