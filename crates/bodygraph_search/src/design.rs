//! Design-instant search.
//!
//! The design instant is the moment before birth when the Sun stood a fixed
//! arc (88 deg) behind its birth longitude. Found by a coarse forward scan
//! from a fixed offset before birth, minimizing the wrapped angular distance
//! to the target, with optional bisection on the signed difference across
//! the bracket around the best step.

use bodygraph_base::{Body, angular_distance, normalize_360, normalize_to_pm180};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ephemeris::Ephemeris;
use crate::error::{EphemerisError, SearchError};

/// Configuration for the design-instant search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignSearchConfig {
    /// Solar arc between design and birth in degrees (default 88).
    pub arc_deg: f64,
    /// Scan start, in days before birth (default 100).
    pub start_offset_days: f64,
    /// Scan step in days (default 0.5).
    pub step_days: f64,
    /// Maximum scan steps (default 200).
    pub max_steps: u32,
    /// Stop once the angular error drops below this, in degrees (default 0.01).
    pub tolerance_deg: f64,
    /// Bisect the bracket around the best step (default off).
    pub refine: bool,
    /// Maximum bisection iterations when refining (default 50).
    pub max_refine_iterations: u32,
}

impl Default for DesignSearchConfig {
    fn default() -> Self {
        Self {
            arc_deg: 88.0,
            start_offset_days: 100.0,
            step_days: 0.5,
            max_steps: 200,
            tolerance_deg: 0.01,
            refine: false,
            max_refine_iterations: 50,
        }
    }
}

impl DesignSearchConfig {
    /// Default scan followed by bisection refinement.
    pub fn refined() -> Self {
        Self {
            refine: true,
            ..Self::default()
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.arc_deg.is_finite() || self.arc_deg <= 0.0 || self.arc_deg >= 360.0 {
            return Err("arc_deg must be in (0, 360)");
        }
        if !self.step_days.is_finite() || self.step_days <= 0.0 {
            return Err("step_days must be positive");
        }
        if !self.start_offset_days.is_finite() || self.start_offset_days <= self.step_days {
            return Err("start_offset_days must exceed step_days");
        }
        if self.max_steps == 0 {
            return Err("max_steps must be > 0");
        }
        if !self.tolerance_deg.is_finite() || self.tolerance_deg <= 0.0 {
            return Err("tolerance_deg must be positive");
        }
        if self.refine && self.max_refine_iterations == 0 {
            return Err("max_refine_iterations must be > 0 when refining");
        }
        Ok(())
    }
}

/// Result of a design-instant search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignSolution {
    /// Design instant, Julian Date (UTC).
    pub jd: f64,
    /// Solar longitude at the design instant in degrees [0, 360).
    pub sun_longitude_deg: f64,
    /// Birth solar longitude minus the arc, normalized.
    pub target_longitude_deg: f64,
    /// Wrapped distance between the two, in degrees.
    pub error_deg: f64,
    /// Number of solar longitude evaluations, birth included.
    pub evaluations: u32,
    /// Whether the error fell below the configured tolerance.
    pub converged: bool,
}

impl DesignSolution {
    /// Days between this design instant and `birth_jd`.
    pub fn days_before(&self, birth_jd: f64) -> f64 {
        birth_jd - self.jd
    }

    /// Reject a best-effort solution that missed the tolerance.
    pub fn require_converged(self) -> Result<Self, SearchError> {
        if self.converged {
            Ok(self)
        } else {
            Err(SearchError::NoConvergence {
                error_deg: self.error_deg,
                evaluations: self.evaluations,
            })
        }
    }
}

/// Find the design instant from a solar longitude function.
///
/// `sun_fn` maps a Julian Date to a solar longitude in degrees; values may
/// be unnormalized. Exhausting the scan is not an error: the best candidate
/// comes back with `converged = false`.
pub fn design_instant<F>(
    birth_jd: f64,
    mut sun_fn: F,
    config: &DesignSearchConfig,
) -> Result<DesignSolution, SearchError>
where
    F: FnMut(f64) -> f64,
{
    solve(birth_jd, |jd| Ok(sun_fn(jd)), config)
}

/// Find the design instant using an ephemeris for the Sun.
///
/// Ephemeris failures abort the search and are returned unchanged.
pub fn design_instant_from<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    birth_jd: f64,
    config: &DesignSearchConfig,
) -> Result<DesignSolution, SearchError> {
    solve(
        birth_jd,
        |jd| ephemeris.longitude_deg(Body::Sun, jd).map_err(SearchError::from),
        config,
    )
}

#[derive(Clone, Copy)]
struct Candidate {
    jd: f64,
    lon: f64,
    err: f64,
}

fn solve<F>(
    birth_jd: f64,
    mut sun: F,
    config: &DesignSearchConfig,
) -> Result<DesignSolution, SearchError>
where
    F: FnMut(f64) -> Result<f64, SearchError>,
{
    config.validate().map_err(SearchError::InvalidConfig)?;
    if !birth_jd.is_finite() {
        return Err(SearchError::InvalidConfig("birth_jd must be finite"));
    }

    let mut evaluations = 0u32;
    let mut eval = |jd: f64| -> Result<f64, SearchError> {
        evaluations += 1;
        let lon = sun(jd)?;
        if !lon.is_finite() {
            let msg = format!("non-finite solar longitude at jd {jd}");
            return Err(EphemerisError::Failed(msg).into());
        }
        Ok(normalize_360(lon))
    };

    let birth_sun = eval(birth_jd)?;
    let target = normalize_360(birth_sun - config.arc_deg);
    let start = birth_jd - config.start_offset_days;
    debug!(birth_jd, birth_sun, target, start, "design search start");

    let mut best: Option<Candidate> = None;
    for i in 1..=config.max_steps {
        let jd = start + i as f64 * config.step_days;
        if jd >= birth_jd {
            break;
        }
        let lon = eval(jd)?;
        let err = angular_distance(lon, target);
        if best.is_none_or(|b| err < b.err) {
            best = Some(Candidate { jd, lon, err });
        }
        if err < config.tolerance_deg {
            break;
        }
    }

    // validate() guarantees at least one step lands before birth
    let Some(mut best) = best else {
        return Err(SearchError::InvalidConfig("scan produced no candidate"));
    };

    if config.refine && best.err >= f64::EPSILON {
        if let Some(refined) = refine(&mut eval, best, birth_jd, target, config)? {
            if refined.err < best.err {
                best = refined;
            }
        }
    }

    let converged = best.err < config.tolerance_deg;
    if converged {
        debug!(jd = best.jd, error_deg = best.err, evaluations, "design search converged");
    } else {
        warn!(
            birth_jd,
            jd = best.jd,
            error_deg = best.err,
            evaluations,
            "design search exhausted scan without reaching tolerance"
        );
    }

    Ok(DesignSolution {
        jd: best.jd,
        sun_longitude_deg: best.lon,
        target_longitude_deg: target,
        error_deg: best.err,
        evaluations,
        converged,
    })
}

/// Bisect the signed difference across the step bracket around `best`.
///
/// Returns `None` when neither neighbouring bracket holds a genuine zero
/// crossing.
fn refine<F>(
    eval: &mut F,
    best: Candidate,
    birth_jd: f64,
    target: f64,
    config: &DesignSearchConfig,
) -> Result<Option<Candidate>, SearchError>
where
    F: FnMut(f64) -> Result<f64, SearchError>,
{
    let signed = |lon: f64| normalize_to_pm180(lon - target);
    let f_best = signed(best.lon);

    let lo = best.jd - config.step_days;
    let hi = (best.jd + config.step_days).min(birth_jd);
    let f_lo = signed(eval(lo)?);
    let (mut t_a, mut f_a, mut t_b) = if is_genuine_crossing(f_lo, f_best) {
        (lo, f_lo, best.jd)
    } else if hi > best.jd {
        let f_hi = signed(eval(hi)?);
        if !is_genuine_crossing(f_best, f_hi) {
            return Ok(None);
        }
        (best.jd, f_best, hi)
    } else {
        return Ok(None);
    };

    let mut last = best;
    for _ in 0..config.max_refine_iterations {
        let t_mid = 0.5 * (t_a + t_b);
        let lon = eval(t_mid)?;
        let f_mid = signed(lon);
        last = Candidate {
            jd: t_mid,
            lon,
            err: f_mid.abs(),
        };
        if f_a * f_mid <= 0.0 {
            t_b = t_mid;
        } else {
            t_a = t_mid;
            f_a = f_mid;
        }
        if last.err < config.tolerance_deg * 1e-3 {
            break;
        }
    }
    debug!(jd = last.jd, error_deg = last.err, "design search refined");
    Ok(Some(last))
}

/// A sign change between small values, not a jump across the ±180 seam.
fn is_genuine_crossing(f_a: f64, f_b: f64) -> bool {
    f_a * f_b <= 0.0 && (f_a - f_b).abs() < 270.0
}
