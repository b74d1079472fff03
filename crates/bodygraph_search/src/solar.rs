//! Low-precision analytic solar longitude.
//!
//! Meeus, *Astronomical Algorithms* (2nd ed.), Chapter 25: geometric mean
//! longitude plus equation of center, corrected for nutation and aberration.
//! Accuracy is about 0.01 deg over several centuries around J2000, enough for
//! the design-instant search, which only needs the Sun.
//!
//! The series runs on dynamical time. By default TT − UTC comes from the
//! Espenak–Meeus ΔT polynomials, so births a century back are not off by the
//! minute of drift a present-day constant would carry.

use bodygraph_base::{Body, normalize_360};
use bodygraph_time::{J2000_JD, SECONDS_PER_DAY};

use crate::ephemeris::Ephemeris;
use crate::error::EphemerisError;

const DAYS_PER_CENTURY: f64 = 36_525.0;

const DAYS_PER_YEAR: f64 = 365.25;

/// How TT − UTC is chosen for an instant.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DeltaT {
    /// Era-dependent estimate from [`estimate_delta_t`].
    #[default]
    Estimated,
    /// Constant offset in seconds.
    Fixed(f64),
}

/// Apparent solar longitude from the Meeus low-precision theory.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SolarTheory {
    pub delta_t: DeltaT,
}

impl SolarTheory {
    /// Theory with a constant TT − UTC in seconds.
    pub fn new(delta_t_seconds: f64) -> Self {
        Self {
            delta_t: DeltaT::Fixed(delta_t_seconds),
        }
    }

    /// TT − UTC in seconds at a UTC Julian Date.
    pub fn delta_t_seconds(&self, jd_utc: f64) -> f64 {
        match self.delta_t {
            DeltaT::Estimated => estimate_delta_t(decimal_year(jd_utc)),
            DeltaT::Fixed(s) => s,
        }
    }

    /// Apparent geocentric longitude of the Sun in degrees [0, 360).
    pub fn sun_longitude(&self, jd_utc: f64) -> f64 {
        let jde = jd_utc + self.delta_t_seconds(jd_utc) / SECONDS_PER_DAY;
        apparent_sun_longitude(jde)
    }
}

fn decimal_year(jd: f64) -> f64 {
    2000.0 + (jd - J2000_JD) / DAYS_PER_YEAR
}

/// ΔT = TT − UT in seconds for a decimal year (Espenak & Meeus, 2006).
///
/// Polynomial fits cover 1600..2150. Outside that span the long-term
/// parabola is used, good to minutes at best.
pub fn estimate_delta_t(year: f64) -> f64 {
    let parabola = |y: f64| {
        let u = (y - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    };
    match year {
        y if y < 1600.0 => parabola(y),
        y if y < 1700.0 => {
            let t = y - 1600.0;
            120.0 - 0.9808 * t - 0.01532 * t.powi(2) + t.powi(3) / 7129.0
        }
        y if y < 1800.0 => {
            let t = y - 1700.0;
            8.83 + 0.1603 * t - 0.005_928_5 * t.powi(2) + 0.000_133_36 * t.powi(3)
                - t.powi(4) / 1_174_000.0
        }
        y if y < 1860.0 => {
            let t = y - 1800.0;
            13.72 - 0.332_447 * t + 0.006_861_2 * t.powi(2) + 0.004_111_6 * t.powi(3)
                - 0.000_374_36 * t.powi(4)
                + 0.000_012_127_2 * t.powi(5)
                - 0.000_000_169_9 * t.powi(6)
                + 0.000_000_000_875 * t.powi(7)
        }
        y if y < 1900.0 => {
            let t = y - 1860.0;
            7.62 + 0.5737 * t - 0.251_754 * t.powi(2) + 0.016_806_68 * t.powi(3)
                - 0.000_447_362_4 * t.powi(4)
                + t.powi(5) / 233_174.0
        }
        y if y < 1920.0 => {
            let t = y - 1900.0;
            -2.79 + 1.494_119 * t - 0.059_893_9 * t.powi(2) + 0.006_196_6 * t.powi(3)
                - 0.000_197 * t.powi(4)
        }
        y if y < 1941.0 => {
            let t = y - 1920.0;
            21.20 + 0.844_93 * t - 0.076_100 * t.powi(2) + 0.002_093_6 * t.powi(3)
        }
        y if y < 1961.0 => {
            let t = y - 1950.0;
            29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
        }
        y if y < 1986.0 => {
            let t = y - 1975.0;
            45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
        }
        y if y < 2005.0 => {
            let t = y - 2000.0;
            63.86 + 0.3345 * t - 0.060_374 * t.powi(2)
                + 0.001_727_5 * t.powi(3)
                + 0.000_651_814 * t.powi(4)
                + 0.000_023_735_99 * t.powi(5)
        }
        y if y < 2050.0 => {
            let t = y - 2000.0;
            62.92 + 0.322_17 * t + 0.005_589 * t.powi(2)
        }
        y if y < 2150.0 => parabola(y) - 0.5628 * (2150.0 - y),
        // NaN falls through here too
        y => parabola(y),
    }
}

impl Ephemeris for SolarTheory {
    fn longitude_deg(&self, body: Body, jd_utc: f64) -> Result<f64, EphemerisError> {
        if !jd_utc.is_finite() {
            return Err(EphemerisError::Failed(format!("non-finite instant {jd_utc}")));
        }
        match body {
            Body::Sun => Ok(self.sun_longitude(jd_utc)),
            other => Err(EphemerisError::Unsupported(other)),
        }
    }
}

/// Apparent solar longitude at a dynamical-time Julian Ephemeris Date.
pub fn apparent_sun_longitude(jde: f64) -> f64 {
    let t = (jde - J2000_JD) / DAYS_PER_CENTURY;
    let l0 = 280.46646 + 36_000.76983 * t + 0.000_303_2 * t * t;
    let m = (357.52911 + 35_999.05029 * t - 0.000_153_7 * t * t).to_radians();
    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();
    let omega = (125.04 - 1_934.136 * t).to_radians();
    normalize_360(l0 + c - 0.005_69 - 0.004_78 * omega.sin())
}
