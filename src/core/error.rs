//! Error taxonomy for the derived-metrics engine.

use thiserror::Error;

/// Failures raised by the pure metric computations.
///
/// All of these are local to a single computation; callers decide whether to
/// skip the update that needed the value.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MetricsError {
    #[error("Price series is empty")]
    EmptySeries,

    #[error("Moving average is zero, ratio is undefined")]
    DivisionByZero,

    #[error("Index value {0} is outside the range [0, 100]")]
    OutOfRange(f64),

    #[error("Moving average window must be at least 1")]
    InvalidWindow,

    #[error("No classification buckets were provided")]
    NoBuckets,
}
