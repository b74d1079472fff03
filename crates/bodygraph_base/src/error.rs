//! Error types for classification and chart derivation.

use crate::body::{Body, Pass};

/// Errors from the longitude classifier and the chart deriver.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ChartError {
    /// Longitude outside [0, 360) or not finite.
    #[error("invalid longitude: {0} deg (expected [0, 360))")]
    InvalidLongitude(f64),
    /// A body required for profile/cross is absent from a pass.
    #[error("missing {body} in {pass} longitudes")]
    MissingBody { body: Body, pass: Pass },
    /// Gate number outside 1..=64.
    #[error("invalid gate number: {0}")]
    InvalidGate(u8),
    /// Line number outside 1..=6.
    #[error("invalid line number: {0}")]
    InvalidLine(u8),
    /// Color number outside 1..=6.
    #[error("invalid color number: {0}")]
    InvalidColor(u8),
    /// Tone number outside 1..=6.
    #[error("invalid tone number: {0}")]
    InvalidTone(u8),
    /// An activation sits in the sequence of the other pass.
    #[error("{body} activation tagged {found} in the {expected} sequence")]
    PassMismatch {
        body: Body,
        expected: Pass,
        found: Pass,
    },
    /// Profile string is not "line/line" with lines in 1..=6.
    #[error("invalid profile: {0:?}")]
    InvalidProfile(String),
    /// Cross identifier is not "a/b | c/d" with valid gates.
    #[error("invalid cross identifier: {0:?}")]
    InvalidCross(String),
    /// Channel id not present in the channel table.
    #[error("unknown channel: {0:?}")]
    UnknownChannel(String),
}
