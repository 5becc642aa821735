//! Error taxonomy for the curve kernel

use thiserror::Error;

/// Failures raised by curve operations that cannot produce finite geometry.
///
/// A flat curve's missing quantity intercept is *not* an error: it is reported
/// as NaN by [`Curve::quantity_intercept`](crate::curves::Curve::quantity_intercept)
/// so rendering can pick a fallback extent.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CurveError {
    /// Slope is zero where price must be inverted into quantity.
    #[error("degenerate curve: zero slope cannot be inverted from price to quantity")]
    DegenerateCurve,

    /// Both curves share a slope, so the 2x2 system has no unique solution.
    #[error("parallel curves: both slopes equal {slope}, no unique equilibrium")]
    ParallelCurves {
        /// The shared slope.
        slope: f64,
    },
}

/// Result alias for kernel operations.
pub type CurveResult<T> = Result<T, CurveError>;
