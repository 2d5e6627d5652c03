//! Categorical significance labels for p-values.

use serde::Serialize;
use std::fmt;

/// Conventional star notation for a p-value.
///
/// Variants are ordered from most to least significant, so the derived
/// `Ord` makes "at least as significant" a plain `<=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SignificanceLabel {
    /// p < 0.001
    #[serde(rename = "***")]
    ThreeStar,
    /// 0.001 <= p < 0.01
    #[serde(rename = "**")]
    TwoStar,
    /// 0.01 <= p < 0.05
    #[serde(rename = "*")]
    OneStar,
    /// p >= 0.05
    #[serde(rename = "ns")]
    NotSignificant,
}

impl SignificanceLabel {
    /// Label a p-value. Thresholds are strict: a p-value exactly on a
    /// boundary belongs to the less significant bucket (p = 0.05 is
    /// `ns`, p = 0.01 is `*`, p = 0.001 is `**`).
    pub fn from_p_value(p: f64) -> Self {
        if p < 0.001 {
            Self::ThreeStar
        } else if p < 0.01 {
            Self::TwoStar
        } else if p < 0.05 {
            Self::OneStar
        } else {
            Self::NotSignificant
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThreeStar => "***",
            Self::TwoStar => "**",
            Self::OneStar => "*",
            Self::NotSignificant => "ns",
        }
    }
}

impl fmt::Display for SignificanceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
