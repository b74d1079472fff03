//! End-to-end chart computation: birth instant + ephemeris -> chart.

use bodygraph_base::{BodyLongitudes, Chart, MEASURED_BODIES, derive_chart, normalize_360};
use bodygraph_time::BirthData;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::design::{DesignSearchConfig, DesignSolution, design_instant_from};
use crate::ephemeris::Ephemeris;
use crate::error::{EphemerisError, SearchError};

/// A chart together with the instants it was computed for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedChart {
    pub chart: Chart,
    /// Birth instant, Julian Date (UTC).
    pub birth_jd: f64,
    pub design: DesignSolution,
}

/// Longitudes of the measured bodies at `jd_utc`, normalized to [0, 360).
///
/// Derived bodies (Earth, south node) are left to the deriver.
pub fn longitudes_at<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    jd_utc: f64,
) -> Result<BodyLongitudes, SearchError> {
    let mut out = BodyLongitudes::new();
    for body in MEASURED_BODIES {
        let lon = ephemeris.longitude_deg(body, jd_utc)?;
        if !lon.is_finite() {
            let msg = format!("non-finite {body} longitude at jd {jd_utc}");
            return Err(EphemerisError::Failed(msg).into());
        }
        out.insert(body, normalize_360(lon));
    }
    Ok(out)
}

/// Compute a chart for a birth instant.
///
/// Solves the design instant, queries both passes, and derives the chart.
/// A non-converged design search is accepted as best effort; callers that
/// need strictness check `design.converged`.
pub fn compute_chart<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    birth_jd: f64,
    config: &DesignSearchConfig,
) -> Result<ComputedChart, SearchError> {
    let design = design_instant_from(ephemeris, birth_jd, config)?;
    debug!(
        birth_jd,
        design_jd = design.jd,
        days_before = design.days_before(birth_jd),
        "design instant resolved"
    );
    let personality = longitudes_at(ephemeris, birth_jd)?;
    let design_lons = longitudes_at(ephemeris, design.jd)?;
    let chart = derive_chart(&personality, &design_lons)?;
    debug!(
        chart_type = %chart.chart_type,
        channels = chart.active_channels.len(),
        "chart derived"
    );
    Ok(ComputedChart {
        chart,
        birth_jd,
        design,
    })
}

/// Compute a chart from recorded birth data.
pub fn compute_chart_for_birth<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    birth: &BirthData,
    config: &DesignSearchConfig,
) -> Result<ComputedChart, SearchError> {
    let birth_jd = birth.birth_jd()?;
    compute_chart(ephemeris, birth_jd, config)
}
