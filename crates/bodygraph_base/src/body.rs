//! Bodies that activate gates, the two calculation passes, and the
//! body → longitude mapping consumed by the chart deriver.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::util::normalize_360;

/// A body contributing one activation per pass.
///
/// Declaration order is the chart iteration order. Earth and the south node
/// are derived points (opposite the Sun and the north node respectively).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    NorthNode,
    SouthNode,
    Earth,
}

/// All 13 bodies in chart iteration order.
pub const ALL_BODIES: [Body; 13] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
    Body::NorthNode,
    Body::SouthNode,
    Body::Earth,
];

/// The 11 bodies an ephemeris has to supply.
pub const MEASURED_BODIES: [Body; 11] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
    Body::NorthNode,
];

impl Body {
    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
            Self::Pluto => "Pluto",
            Self::NorthNode => "North Node",
            Self::SouthNode => "South Node",
            Self::Earth => "Earth",
        }
    }

    /// 0-based position in [`ALL_BODIES`].
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// The body this one is derived from by adding 180 deg, if any.
    pub const fn derived_from(self) -> Option<Body> {
        match self {
            Self::Earth => Some(Self::Sun),
            Self::SouthNode => Some(Self::NorthNode),
            _ => None,
        }
    }

    /// True for Earth and the south node.
    pub const fn is_derived(self) -> bool {
        self.derived_from().is_some()
    }
}

impl Display for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which of the two chart instants an activation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Pass {
    /// Body positions at the birth instant.
    Personality,
    /// Body positions 88 deg of solar arc before birth.
    Design,
}

impl Pass {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Personality => "personality",
            Self::Design => "design",
        }
    }
}

impl Display for Pass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Ecliptic longitudes in degrees keyed by body, for one pass.
///
/// Values may be unnormalized; the deriver normalizes before classifying.
/// Derived bodies may be omitted and are then filled from their source body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyLongitudes(BTreeMap<Body, f64>);

impl BodyLongitudes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, body: Body, lon_deg: f64) -> Self {
        self.0.insert(body, lon_deg);
        self
    }

    pub fn insert(&mut self, body: Body, lon_deg: f64) -> Option<f64> {
        self.0.insert(body, lon_deg)
    }

    /// Longitude exactly as supplied.
    pub fn get(&self, body: Body) -> Option<f64> {
        self.0.get(&body).copied()
    }

    /// Supplied longitude, or for derived bodies the source body + 180 deg.
    pub fn resolved(&self, body: Body) -> Option<f64> {
        self.get(body).or_else(|| {
            body.derived_from()
                .and_then(|src| self.get(src))
                .map(|lon| normalize_360(normalize_360(lon) + 180.0))
        })
    }

    pub fn contains(&self, body: Body) -> bool {
        self.0.contains_key(&body)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Supplied entries in body iteration order.
    pub fn iter(&self) -> impl Iterator<Item = (Body, f64)> + '_ {
        self.0.iter().map(|(b, lon)| (*b, *lon))
    }
}

impl FromIterator<(Body, f64)> for BodyLongitudes {
    fn from_iter<I: IntoIterator<Item = (Body, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
