//! The ephemeris seam: geocentric ecliptic longitude of a body at an instant.

use bodygraph_base::Body;

use crate::error::EphemerisError;

/// Source of apparent geocentric ecliptic longitudes.
///
/// Instants are Julian Dates on the UTC scale; converting to a dynamical
/// time scale, if needed, is the implementor's concern. Returned values may
/// be unnormalized; callers normalize.
pub trait Ephemeris {
    fn longitude_deg(&self, body: Body, jd_utc: f64) -> Result<f64, EphemerisError>;
}

impl<T: Ephemeris + ?Sized> Ephemeris for &T {
    fn longitude_deg(&self, body: Body, jd_utc: f64) -> Result<f64, EphemerisError> {
        (**self).longitude_deg(body, jd_utc)
    }
}

impl<T: Ephemeris + ?Sized> Ephemeris for Box<T> {
    fn longitude_deg(&self, body: Body, jd_utc: f64) -> Result<f64, EphemerisError> {
        (**self).longitude_deg(body, jd_utc)
    }
}
