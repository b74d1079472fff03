//! Time handling for chart computation.
//!
//! This crate provides:
//! - Julian Date ↔ calendar conversions
//! - `UtcTime`, the UTC calendar representation passed to ephemerides
//! - `BirthData` and resolution of a local birth time to a UTC instant
//!
//! Instants are Julian Dates on the UTC scale. Converting to a dynamical
//! time scale, if the ephemeris needs one, is the ephemeris's concern.

pub mod birth;
pub mod error;
pub mod julian;
pub mod utc_time;

pub use birth::{BirthData, Location, Zone, resolve_to_utc};
pub use error::TimeError;
pub use julian::{
    J2000_JD, SECONDS_PER_DAY, UNIX_EPOCH_JD, calendar_to_jd, datetime_to_jd, jd_to_calendar,
    jd_to_datetime,
};
pub use utc_time::UtcTime;
