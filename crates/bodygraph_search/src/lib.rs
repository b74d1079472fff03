//! Design-instant search and chart computation.
//!
//! This crate provides:
//! - The `Ephemeris` trait, the seam to any longitude source
//! - `SolarTheory`, a low-precision analytic Sun sufficient for the design search
//! - The design-instant solver (coarse scan with optional bisection)
//! - The end-to-end pipeline from a birth instant to a derived chart

pub mod chart;
pub mod design;
pub mod ephemeris;
pub mod error;
pub mod solar;

pub use chart::{ComputedChart, compute_chart, compute_chart_for_birth, longitudes_at};
pub use design::{DesignSearchConfig, DesignSolution, design_instant, design_instant_from};
pub use ephemeris::Ephemeris;
pub use error::{EphemerisError, SearchError};
pub use solar::{DeltaT, SolarTheory, apparent_sun_longitude, estimate_delta_t};
