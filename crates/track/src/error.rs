use thiserror::Error;

/// Reasons a [`crate::TrackSpec`] is rejected before any track exists.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackError {
    #[error("track {name} must be positive and finite, got {value}")]
    InvalidDimension { name: &'static str, value: f64 },
    #[error("track parameter {name} must be finite, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },
    #[error("curvature table is empty")]
    EmptyCurvature,
    #[error("curvature table entry {index} is not finite: {value}")]
    InvalidCurvature { index: usize, value: f64 },
    #[error("curvature table needs one entry per unit of length ({expected}), got {actual}")]
    CurvatureLength { expected: usize, actual: usize },
    #[error("curvature range {name} [{low}, {high}] is invalid: {reason}")]
    InvalidRange {
        name: &'static str,
        low: f64,
        high: f64,
        reason: &'static str,
    },
}
