//! The centers (graph vertices) joined by channels.
//!
//! Eight centers are modeled. The solar plexus is not part of the channel
//! table, so it never becomes defined; channels that would traditionally
//! land there are attached to the spleen or root instead.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// A center of the bodygraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Center {
    Head,
    Ajna,
    Throat,
    G,
    Ego,
    Spleen,
    Sacral,
    Root,
}

/// All centers, top of the graph to bottom.
pub const ALL_CENTERS: [Center; 8] = [
    Center::Head,
    Center::Ajna,
    Center::Throat,
    Center::G,
    Center::Ego,
    Center::Spleen,
    Center::Sacral,
    Center::Root,
];

impl Center {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Head => "Head",
            Self::Ajna => "Ajna",
            Self::Throat => "Throat",
            Self::G => "G",
            Self::Ego => "Ego",
            Self::Spleen => "Spleen",
            Self::Sacral => "Sacral",
            Self::Root => "Root",
        }
    }

    /// Motor centers: a channel from one of these to the throat makes a
    /// chart manifesting.
    pub const fn is_motor(self) -> bool {
        matches!(self, Self::Root | Self::Sacral | Self::Spleen | Self::Ego)
    }
}

impl Display for Center {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motor_set() {
        let motors: Vec<Center> = ALL_CENTERS.iter().copied().filter(|c| c.is_motor()).collect();
        assert_eq!(
            motors,
            vec![Center::Ego, Center::Spleen, Center::Sacral, Center::Root]
        );
    }

    #[test]
    fn serde_lowercase() {
        assert_eq!(serde_json::to_string(&Center::G).unwrap(), r#""g""#);
        let c: Center = serde_json::from_str(r#""sacral""#).unwrap();
        assert_eq!(c, Center::Sacral);
    }
}
