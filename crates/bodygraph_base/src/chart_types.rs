//! Types produced by the chart deriver.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::body::{Body, Pass};
use crate::error::ChartError;
use crate::gate::GateInfo;

/// One body's gate activation in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GateActivation {
    /// Activating body.
    pub body: Body,
    /// Pass the activation was computed in.
    pub pass: Pass,
    /// Normalized ecliptic longitude in degrees [0, 360).
    pub longitude_deg: f64,
    /// Gate number, 1-64.
    pub gate: u8,
    /// Line, 1-6.
    pub line: u8,
    /// Color, 1-6.
    pub color: u8,
    /// Tone, 1-6.
    pub tone: u8,
}

impl GateActivation {
    pub fn new(body: Body, pass: Pass, longitude_deg: f64, info: GateInfo) -> Self {
        Self {
            body,
            pass,
            longitude_deg,
            gate: info.gate,
            line: info.line,
            color: info.color,
            tone: info.tone,
        }
    }

    /// Gate/line/color/tone without body or pass.
    pub fn info(&self) -> GateInfo {
        GateInfo {
            gate: self.gate,
            line: self.line,
            color: self.color,
            tone: self.tone,
        }
    }
}

/// Chart type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartType {
    Generator,
    #[serde(rename = "Manifesting Generator")]
    ManifestingGenerator,
    Manifestor,
    Projector,
    Reflector,
}

impl ChartType {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Generator => "Generator",
            Self::ManifestingGenerator => "Manifesting Generator",
            Self::Manifestor => "Manifestor",
            Self::Projector => "Projector",
            Self::Reflector => "Reflector",
        }
    }

    /// Strategy that goes with this type.
    pub const fn strategy(self) -> Strategy {
        Strategy::for_type(self)
    }
}

impl Display for ChartType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Decision authority.
///
/// Throat and Ajna both map to `Mental`; no emotional authority exists
/// because the solar plexus is not modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Authority {
    Splenic,
    Sacral,
    Ego,
    #[serde(rename = "Self-Projected")]
    SelfProjected,
    Mental,
    Lunar,
}

impl Authority {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Splenic => "Splenic",
            Self::Sacral => "Sacral",
            Self::Ego => "Ego",
            Self::SelfProjected => "Self-Projected",
            Self::Mental => "Mental",
            Self::Lunar => "Lunar",
        }
    }
}

impl Display for Authority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Strategy, fixed per chart type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    #[serde(rename = "To Respond")]
    ToRespond,
    #[serde(rename = "Wait for Invitation")]
    WaitForInvitation,
    #[serde(rename = "To Inform")]
    ToInform,
    #[serde(rename = "Wait a Lunar Cycle")]
    WaitLunarCycle,
}

impl Strategy {
    pub const fn for_type(chart_type: ChartType) -> Self {
        match chart_type {
            ChartType::Generator | ChartType::ManifestingGenerator => Self::ToRespond,
            ChartType::Projector => Self::WaitForInvitation,
            ChartType::Manifestor => Self::ToInform,
            ChartType::Reflector => Self::WaitLunarCycle,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToRespond => "To Respond",
            Self::WaitForInvitation => "Wait for Invitation",
            Self::ToInform => "To Inform",
            Self::WaitLunarCycle => "Wait a Lunar Cycle",
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Definition tier, by number of defined centers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Definition {
    None,
    Single,
    Split,
    #[serde(rename = "Triple Split")]
    TripleSplit,
    #[serde(rename = "Quadruple Split")]
    QuadrupleSplit,
}

impl Definition {
    /// 0 -> None, 1-2 -> Single, 3-4 -> Split, 5-6 -> Triple Split,
    /// 7+ -> Quadruple Split.
    pub const fn from_center_count(count: usize) -> Self {
        match count {
            0 => Self::None,
            1..=2 => Self::Single,
            3..=4 => Self::Split,
            5..=6 => Self::TripleSplit,
            _ => Self::QuadrupleSplit,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Single => "Single",
            Self::Split => "Split",
            Self::TripleSplit => "Triple Split",
            Self::QuadrupleSplit => "Quadruple Split",
        }
    }
}

impl Display for Definition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Profile: the Sun line in each pass, written "personality/design".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Profile {
    pub personality_line: u8,
    pub design_line: u8,
}

impl Display for Profile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.personality_line, self.design_line)
    }
}

impl FromStr for Profile {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ChartError::InvalidProfile(s.to_string());
        let (p, d) = s.split_once('/').ok_or_else(bad)?;
        let parse_line = |part: &str| -> Result<u8, ChartError> {
            match part.trim().parse::<u8>() {
                Ok(line @ 1..=6) => Ok(line),
                _ => Err(bad()),
            }
        };
        Ok(Self {
            personality_line: parse_line(p)?,
            design_line: parse_line(d)?,
        })
    }
}

impl From<Profile> for String {
    fn from(p: Profile) -> Self {
        p.to_string()
    }
}

impl TryFrom<String> for Profile {
    type Error = ChartError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Incarnation cross identifier: Sun and Earth gates of both passes,
/// written "pSun/pEarth | dSun/dEarth".
///
/// This is an identifier, not a resolved cross name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct IncarnationCross {
    pub personality_sun: u8,
    pub personality_earth: u8,
    pub design_sun: u8,
    pub design_earth: u8,
}

impl Display for IncarnationCross {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} | {}/{}",
            self.personality_sun, self.personality_earth, self.design_sun, self.design_earth
        )
    }
}

impl FromStr for IncarnationCross {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ChartError::InvalidCross(s.to_string());
        let gate = |part: &str| -> Result<u8, ChartError> {
            match part.trim().parse::<u8>() {
                Ok(g @ 1..=64) => Ok(g),
                _ => Err(bad()),
            }
        };
        let pair = |half: &str| -> Result<(u8, u8), ChartError> {
            let (sun, earth) = half.split_once('/').ok_or_else(bad)?;
            Ok((gate(sun)?, gate(earth)?))
        };
        let (p, d) = s.split_once('|').ok_or_else(bad)?;
        let (personality_sun, personality_earth) = pair(p)?;
        let (design_sun, design_earth) = pair(d)?;
        Ok(Self {
            personality_sun,
            personality_earth,
            design_sun,
            design_earth,
        })
    }
}

impl From<IncarnationCross> for String {
    fn from(c: IncarnationCross) -> Self {
        c.to_string()
    }
}

impl TryFrom<String> for IncarnationCross {
    type Error = ChartError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
