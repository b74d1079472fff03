//! Error types for ephemeris queries and chart computation.

use bodygraph_base::{Body, ChartError};
use bodygraph_time::TimeError;

/// Failure reported by an ephemeris implementation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum EphemerisError {
    /// The ephemeris has no model for this body.
    #[error("ephemeris does not support {0}")]
    Unsupported(Body),
    /// The backing computation failed.
    #[error("ephemeris failure: {0}")]
    Failed(String),
}

/// Errors from the design-instant solver and the chart pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum SearchError {
    /// Search configuration failed validation.
    #[error("invalid search config: {0}")]
    InvalidConfig(&'static str),
    /// Ephemeris query failed.
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    /// Birth time could not be resolved to an instant.
    #[error(transparent)]
    Time(#[from] TimeError),
    /// Chart derivation failed.
    #[error(transparent)]
    Chart(#[from] ChartError),
    /// The scan ended without reaching the tolerance.
    #[error("design search did not converge: best error {error_deg:.4} deg after {evaluations} evaluations")]
    NoConvergence { error_deg: f64, evaluations: u32 },
}
