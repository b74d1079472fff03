//! Gate, channel, and center derivation for bodygraph charts.
//!
//! This crate provides:
//! - The 64-gate partition of the ecliptic with line/color/tone subdivision
//! - The static channel table and the eight modeled centers
//! - The chart deriver: activations, active channels, defined centers,
//!   type, authority, strategy, profile, definition, and cross
//!
//! Everything here is pure computation over already-computed longitudes.
//! Ephemeris queries and time resolution live in downstream crates.

pub mod body;
pub mod center;
pub mod channel;
pub mod chart;
pub mod chart_types;
pub mod error;
pub mod gate;
pub mod util;

pub use body::{ALL_BODIES, Body, BodyLongitudes, MEASURED_BODIES, Pass};
pub use center::{ALL_CENTERS, Center};
pub use channel::{CHANNELS, Channel, channel_by_id, channel_for_gates};
pub use chart::{
    Chart, activations, active_channels, defined_centers, derive_chart, determine_authority,
    determine_type, gate_union,
};
pub use chart_types::{
    Authority, ChartType, Definition, GateActivation, IncarnationCross, Profile, Strategy,
};
pub use error::ChartError;
pub use gate::{
    COLOR_SPAN, GATE_COUNT, GATE_SPAN, GateArc, GateInfo, LINE_SPAN, TONE_SPAN,
    classify_longitude, gate_arcs, gate_from_longitude, gate_start_deg,
};
pub use util::{angular_distance, normalize_360, normalize_to_pm180};
