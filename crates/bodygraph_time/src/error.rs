//! Error types for time conversion and birth-time resolution.

/// Errors from calendar parsing, zone parsing, or instant conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum TimeError {
    /// Calendar date or clock time is malformed or does not exist.
    #[error("invalid date/time: {0}")]
    InvalidDate(String),
    /// Zone string is not "UTC", a fixed offset such as "+05:30" or an IANA name.
    #[error("invalid time zone: {0:?}")]
    InvalidZone(String),
    /// Instant cannot be represented as a calendar date.
    #[error("time out of range: {0}")]
    OutOfRange(&'static str),
}
