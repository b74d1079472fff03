//! The static channel table.
//!
//! A channel joins two gates and, through them, two centers. It is active
//! when both of its gates are activated anywhere in the chart, regardless of
//! which pass or body activated them.

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::center::Center;
use crate::center::Center::{Ajna, Ego, G, Head, Root, Sacral, Spleen, Throat};

/// A fixed edge between two gates (and their centers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Channel {
    gates: [u8; 2],
    centers: [Center; 2],
}

impl Channel {
    const fn new(a: u8, b: u8, c1: Center, c2: Center) -> Self {
        Self {
            gates: [a, b],
            centers: [c1, c2],
        }
    }

    /// Gate pair, lower gate number first.
    pub const fn gates(&self) -> [u8; 2] {
        self.gates
    }

    /// The two centers this channel defines when active.
    pub const fn centers(&self) -> [Center; 2] {
        self.centers
    }

    /// Identifier in "a-b" form.
    pub fn id(&self) -> String {
        format!("{}-{}", self.gates[0], self.gates[1])
    }

    pub fn has_gate(&self, gate: u8) -> bool {
        self.gates.contains(&gate)
    }

    pub fn touches(&self, center: Center) -> bool {
        self.centers.contains(&center)
    }

    /// Both gates present in `gates`.
    pub fn is_active(&self, gates: &BTreeSet<u8>) -> bool {
        gates.contains(&self.gates[0]) && gates.contains(&self.gates[1])
    }

    /// Throat on one end, a motor center on the other.
    pub fn is_motor_to_throat(&self) -> bool {
        match self.centers {
            [Center::Throat, other] | [other, Center::Throat] => other.is_motor(),
            _ => false,
        }
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.gates[0], self.gates[1])
    }
}

/// All 36 channels, ordered by their lower gate.
pub const CHANNELS: [Channel; 36] = [
    Channel::new(1, 8, G, Throat),
    Channel::new(2, 14, G, Sacral),
    Channel::new(3, 60, Root, Sacral),
    Channel::new(4, 63, Head, Ajna),
    Channel::new(5, 15, Sacral, G),
    Channel::new(6, 59, Sacral, Spleen),
    Channel::new(7, 31, G, Throat),
    Channel::new(9, 52, Root, Sacral),
    Channel::new(10, 20, G, Throat),
    Channel::new(10, 34, G, Sacral),
    Channel::new(10, 57, G, Spleen),
    Channel::new(11, 56, Ajna, Throat),
    Channel::new(12, 22, Throat, Spleen),
    Channel::new(13, 33, G, Throat),
    Channel::new(16, 48, Throat, Spleen),
    Channel::new(17, 62, Ajna, Throat),
    Channel::new(18, 58, Root, Spleen),
    Channel::new(19, 49, Root, Spleen),
    Channel::new(20, 34, Throat, Sacral),
    Channel::new(20, 57, Throat, Spleen),
    Channel::new(21, 45, Ego, Throat),
    Channel::new(23, 43, Ajna, Throat),
    Channel::new(24, 61, Head, Ajna),
    Channel::new(25, 51, G, Ego),
    Channel::new(26, 44, Ego, Spleen),
    Channel::new(27, 50, Sacral, Spleen),
    Channel::new(28, 38, Root, Spleen),
    Channel::new(29, 46, Sacral, G),
    Channel::new(30, 41, Root, Spleen),
    Channel::new(32, 54, Root, Spleen),
    Channel::new(34, 57, Sacral, Spleen),
    Channel::new(35, 36, Throat, Spleen),
    Channel::new(37, 40, Ego, Spleen),
    Channel::new(39, 55, Root, Spleen),
    Channel::new(42, 53, Root, Sacral),
    Channel::new(47, 64, Head, Ajna),
];

/// Look up a channel by its "a-b" id.
pub fn channel_by_id(id: &str) -> Option<&'static Channel> {
    let (a, b) = id.split_once('-')?;
    let a: u8 = a.trim().parse().ok()?;
    let b: u8 = b.trim().parse().ok()?;
    channel_for_gates(a, b)
}

/// Look up the channel joining two gates, in either order.
pub fn channel_for_gates(a: u8, b: u8) -> Option<&'static Channel> {
    let key = if a <= b { [a, b] } else { [b, a] };
    CHANNELS.iter().find(|c| c.gates == key)
}

impl Serialize for Channel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Channel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        channel_by_id(&id)
            .copied()
            .ok_or_else(|| serde::de::Error::custom(format!("unknown channel: {id:?}")))
    }
}
