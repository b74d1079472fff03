//! The 64-gate partition of the ecliptic and the longitude classifier.
//!
//! The circle is split into 64 equal gates of 5.625 deg, starting with gate
//! 41 at 0 deg tropical longitude and proceeding in the fixed wheel order
//! below (not gate-number order). Each gate divides into 6 lines, each line
//! into 6 colors, each color into 6 tones.
//!
//! Arcs are stored sorted by start degree and located by binary search.
//! The last arc (gate 60, 354.375 deg) ends at 360 = 0 deg; that is the only
//! arc whose end boundary is numerically below its start.

use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::util::normalize_360;

/// Number of gates.
pub const GATE_COUNT: usize = 64;

/// Span of one gate: 360/64 = 5.625 degrees.
pub const GATE_SPAN: f64 = 360.0 / GATE_COUNT as f64;

/// Span of one line: 5.625/6 = 0.9375 degrees.
pub const LINE_SPAN: f64 = GATE_SPAN / 6.0;

/// Span of one color: 0.9375/6 = 0.15625 degrees.
pub const COLOR_SPAN: f64 = LINE_SPAN / 6.0;

/// Span of one tone: 5.625/216 = 0.0260416... degrees.
pub const TONE_SPAN: f64 = GATE_SPAN / 216.0;

/// Gate numbers in wheel order, starting at 0 deg.
#[rustfmt::skip]
const GATE_WHEEL: [u8; GATE_COUNT] = [
    41, 19, 13, 49, 30, 55, 37, 63,
    22, 36, 25, 17, 21, 51, 42,  3,
    27, 24,  2, 23,  8, 20, 16, 35,
    45, 12, 15, 52, 39, 53, 62, 56,
    31, 33,  7,  4, 29, 59, 40, 64,
    47,  6, 46, 18, 48, 57, 32, 50,
    28, 44,  1, 43, 14, 34,  9,  5,
    26, 11, 10, 58, 38, 54, 61, 60,
];

/// One gate's arc on the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateArc {
    /// Gate number, 1-64.
    pub gate: u8,
    /// Start of the arc in degrees [0, 360).
    pub start_deg: f64,
}

impl GateArc {
    /// End of the arc in degrees [0, 360); the start of the next arc.
    pub fn end_deg(&self) -> f64 {
        normalize_360(self.start_deg + GATE_SPAN)
    }

    /// True when the arc crosses the 360/0 seam.
    pub fn wraps(&self) -> bool {
        self.end_deg() < self.start_deg
    }

    /// Half-open containment test `[start, end)`, seam-aware.
    pub fn contains(&self, deg: f64) -> bool {
        let end = self.end_deg();
        if self.wraps() {
            deg >= self.start_deg || deg < end
        } else {
            deg >= self.start_deg && deg < end
        }
    }

    /// Offset of `deg` from the arc start, in [0, GATE_SPAN) when contained.
    pub fn offset_of(&self, deg: f64) -> f64 {
        normalize_360(deg - self.start_deg)
    }
}

const fn build_arcs() -> [GateArc; GATE_COUNT] {
    let mut arcs = [GateArc {
        gate: 0,
        start_deg: 0.0,
    }; GATE_COUNT];
    let mut i = 0;
    while i < GATE_COUNT {
        arcs[i] = GateArc {
            gate: GATE_WHEEL[i],
            start_deg: i as f64 * GATE_SPAN,
        };
        i += 1;
    }
    arcs
}

static GATE_ARCS: [GateArc; GATE_COUNT] = build_arcs();

/// All 64 arcs sorted by start degree.
pub fn gate_arcs() -> &'static [GateArc; GATE_COUNT] {
    &GATE_ARCS
}

/// Start degree of a gate's arc.
pub fn gate_start_deg(gate: u8) -> Result<f64, ChartError> {
    GATE_ARCS
        .iter()
        .find(|a| a.gate == gate)
        .map(|a| a.start_deg)
        .ok_or(ChartError::InvalidGate(gate))
}

/// Result of classifying a longitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GateInfo {
    /// Gate number, 1-64.
    pub gate: u8,
    /// Line within the gate, 1-6.
    pub line: u8,
    /// Color within the line, 1-6.
    pub color: u8,
    /// Tone within the color, 1-6.
    pub tone: u8,
}

fn arc_containing(deg: f64) -> &'static GateArc {
    let idx = GATE_ARCS.partition_point(|a| a.start_deg <= deg);
    // Only reachable for a degree below the first start: that degree
    // belongs to the arc wrapping past 360.
    if idx == 0 {
        &GATE_ARCS[GATE_COUNT - 1]
    } else {
        &GATE_ARCS[idx - 1]
    }
}

fn sub_index(offset: f64, span: f64) -> u8 {
    ((offset / span).floor() as u8).min(5)
}

/// Classify a normalized longitude into gate, line, color, and tone.
///
/// `deg` must already be in [0, 360); use [`gate_from_longitude`] for raw
/// ephemeris output.
pub fn classify_longitude(deg: f64) -> Result<GateInfo, ChartError> {
    if !deg.is_finite() || !(0.0..360.0).contains(&deg) {
        return Err(ChartError::InvalidLongitude(deg));
    }
    let arc = arc_containing(deg);
    let offset = arc.offset_of(deg);

    let line_idx = sub_index(offset, LINE_SPAN);
    let in_line = offset - line_idx as f64 * LINE_SPAN;
    let color_idx = sub_index(in_line, COLOR_SPAN);
    let in_color = in_line - color_idx as f64 * COLOR_SPAN;
    let tone_idx = sub_index(in_color, TONE_SPAN);

    Ok(GateInfo {
        gate: arc.gate,
        line: line_idx + 1,
        color: color_idx + 1,
        tone: tone_idx + 1,
    })
}

/// Normalize a raw longitude to [0, 360) and classify it.
pub fn gate_from_longitude(lon_deg: f64) -> Result<GateInfo, ChartError> {
    classify_longitude(normalize_360(lon_deg))
}
