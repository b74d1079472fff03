//! Chart derivation: from two body → longitude mappings to a classified chart.
//!
//! Each step is a pure function over the previous step's output:
//! longitudes -> activations -> gate union -> active channels ->
//! defined centers -> type / authority / strategy / definition, with profile
//! and cross read from the Sun and Earth activations.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::body::{ALL_BODIES, Body, BodyLongitudes, Pass};
use crate::center::Center;
use crate::channel::{CHANNELS, Channel};
use crate::chart_types::{
    Authority, ChartType, Definition, GateActivation, IncarnationCross, Profile, Strategy,
};
use crate::error::ChartError;
use crate::gate::{GATE_COUNT, classify_longitude};
use crate::util::normalize_360;

/// Authority lookup order; the first defined center wins.
const AUTHORITY_PRIORITY: [(Center, Authority); 6] = [
    (Center::Spleen, Authority::Splenic),
    (Center::Sacral, Authority::Sacral),
    (Center::Ego, Authority::Ego),
    (Center::G, Authority::SelfProjected),
    (Center::Throat, Authority::Mental),
    (Center::Ajna, Authority::Mental),
];

/// A fully derived chart.
///
/// Only the two activation sequences are authoritative. Every other field
/// is a function of them, and deserialization recomputes those fields
/// instead of trusting stored values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ActivationRecord")]
pub struct Chart {
    pub personality_gates: Vec<GateActivation>,
    pub design_gates: Vec<GateActivation>,
    pub active_channels: Vec<Channel>,
    pub defined_centers: BTreeSet<Center>,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub authority: Authority,
    pub strategy: Strategy,
    pub profile: Profile,
    pub definition: Definition,
    pub cross: IncarnationCross,
}

/// The persisted part of a chart; derived fields present in the input are
/// ignored.
#[derive(Deserialize)]
struct ActivationRecord {
    personality_gates: Vec<GateActivation>,
    design_gates: Vec<GateActivation>,
}

impl TryFrom<ActivationRecord> for Chart {
    type Error = ChartError;

    fn try_from(rec: ActivationRecord) -> Result<Self, Self::Error> {
        Chart::from_activations(rec.personality_gates, rec.design_gates)
    }
}

impl Chart {
    /// Build a chart from two activation sequences, recomputing every
    /// derived field.
    ///
    /// Each activation must carry its sequence's pass, a gate in 1..=64,
    /// line/color/tone in 1..=6 and a longitude in [0, 360).
    pub fn from_activations(
        personality_gates: Vec<GateActivation>,
        design_gates: Vec<GateActivation>,
    ) -> Result<Self, ChartError> {
        check_sequence(&personality_gates, Pass::Personality)?;
        check_sequence(&design_gates, Pass::Design)?;
        let p_sun = find_body(&personality_gates, Body::Sun, Pass::Personality)?;
        let p_earth = find_body(&personality_gates, Body::Earth, Pass::Personality)?;
        let d_sun = find_body(&design_gates, Body::Sun, Pass::Design)?;
        let d_earth = find_body(&design_gates, Body::Earth, Pass::Design)?;

        let profile = Profile {
            personality_line: p_sun.line,
            design_line: d_sun.line,
        };
        let cross = IncarnationCross {
            personality_sun: p_sun.gate,
            personality_earth: p_earth.gate,
            design_sun: d_sun.gate,
            design_earth: d_earth.gate,
        };

        let gates = gate_union(&personality_gates, &design_gates);
        let active_channels = active_channels(&gates);
        let defined_centers = defined_centers(&active_channels);
        let chart_type = determine_type(&defined_centers, &active_channels);
        let authority = determine_authority(&defined_centers);
        let definition = Definition::from_center_count(defined_centers.len());

        Ok(Self {
            personality_gates,
            design_gates,
            active_channels,
            defined_centers,
            chart_type,
            authority,
            strategy: Strategy::for_type(chart_type),
            profile,
            definition,
            cross,
        })
    }

    /// Distinct activated gate numbers across both passes.
    pub fn gates(&self) -> BTreeSet<u8> {
        gate_union(&self.personality_gates, &self.design_gates)
    }

    /// Activation of `body` in `pass`, if present.
    pub fn activation(&self, body: Body, pass: Pass) -> Option<&GateActivation> {
        let seq = match pass {
            Pass::Personality => &self.personality_gates,
            Pass::Design => &self.design_gates,
        };
        seq.iter().find(|a| a.body == body)
    }

    pub fn is_defined(&self, center: Center) -> bool {
        self.defined_centers.contains(&center)
    }
}

fn check_sequence(seq: &[GateActivation], pass: Pass) -> Result<(), ChartError> {
    let sub = 1..=6u8;
    for a in seq {
        if a.pass != pass {
            return Err(ChartError::PassMismatch {
                body: a.body,
                expected: pass,
                found: a.pass,
            });
        }
        if !(1..=GATE_COUNT as u8).contains(&a.gate) {
            return Err(ChartError::InvalidGate(a.gate));
        }
        if !sub.contains(&a.line) {
            return Err(ChartError::InvalidLine(a.line));
        }
        if !sub.contains(&a.color) {
            return Err(ChartError::InvalidColor(a.color));
        }
        if !sub.contains(&a.tone) {
            return Err(ChartError::InvalidTone(a.tone));
        }
        if !a.longitude_deg.is_finite() || !(0.0..360.0).contains(&a.longitude_deg) {
            return Err(ChartError::InvalidLongitude(a.longitude_deg));
        }
    }
    Ok(())
}

fn find_body(
    seq: &[GateActivation],
    body: Body,
    pass: Pass,
) -> Result<GateActivation, ChartError> {
    seq.iter()
        .find(|a| a.body == body)
        .copied()
        .ok_or(ChartError::MissingBody { body, pass })
}

/// Derive a chart from personality and design longitudes.
///
/// Both mappings must contain the Sun. Earth and the south node are filled
/// in from the Sun and north node when not supplied.
pub fn derive_chart(
    personality: &BodyLongitudes,
    design: &BodyLongitudes,
) -> Result<Chart, ChartError> {
    require_sun(personality, Pass::Personality)?;
    require_sun(design, Pass::Design)?;
    let p = activations(personality, Pass::Personality)?;
    let d = activations(design, Pass::Design)?;
    Chart::from_activations(p, d)
}

fn require_sun(lons: &BodyLongitudes, pass: Pass) -> Result<(), ChartError> {
    if lons.contains(Body::Sun) {
        Ok(())
    } else {
        Err(ChartError::MissingBody {
            body: Body::Sun,
            pass,
        })
    }
}

/// Classify every available body in iteration order.
pub fn activations(
    longitudes: &BodyLongitudes,
    pass: Pass,
) -> Result<Vec<GateActivation>, ChartError> {
    let mut out = Vec::with_capacity(ALL_BODIES.len());
    for body in ALL_BODIES {
        let Some(raw) = longitudes.resolved(body) else {
            continue;
        };
        let lon = normalize_360(raw);
        let info = classify_longitude(lon)?;
        out.push(GateActivation::new(body, pass, lon, info));
    }
    Ok(out)
}

/// Union of gate numbers; pass and body are irrelevant.
pub fn gate_union(personality: &[GateActivation], design: &[GateActivation]) -> BTreeSet<u8> {
    personality.iter().chain(design).map(|a| a.gate).collect()
}

/// Channels whose two gates are both in `gates`, in table order.
pub fn active_channels(gates: &BTreeSet<u8>) -> Vec<Channel> {
    CHANNELS
        .iter()
        .filter(|c| c.is_active(gates))
        .copied()
        .collect()
}

/// Centers touched by any of `channels`.
pub fn defined_centers(channels: &[Channel]) -> BTreeSet<Center> {
    channels.iter().flat_map(|c| c.centers()).collect()
}

/// Type from defined centers and active channels.
pub fn determine_type(defined: &BTreeSet<Center>, channels: &[Channel]) -> ChartType {
    let motor_to_throat = channels.iter().any(Channel::is_motor_to_throat);
    let sacral = defined.contains(&Center::Sacral);
    match (defined.is_empty(), sacral, motor_to_throat) {
        (true, _, _) => ChartType::Reflector,
        (false, true, true) => ChartType::ManifestingGenerator,
        (false, true, false) => ChartType::Generator,
        (false, false, true) => ChartType::Manifestor,
        (false, false, false) => ChartType::Projector,
    }
}

/// Authority from defined centers alone.
pub fn determine_authority(defined: &BTreeSet<Center>) -> Authority {
    AUTHORITY_PRIORITY
        .iter()
        .find(|(center, _)| defined.contains(center))
        .map_or(Authority::Lunar, |&(_, authority)| authority)
}
