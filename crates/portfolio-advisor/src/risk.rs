//! Risk Classification
//!
//! Maps a numeric risk level onto a discrete advisory tier.

use serde::{Deserialize, Serialize};

/// Lowest risk level the surface accepts
pub const MIN_RISK_LEVEL: i32 = 1;

/// Highest risk level the surface accepts
pub const MAX_RISK_LEVEL: i32 = 10;

/// Discrete advisory tier derived from a risk level
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    /// Levels 1-3
    Conservative,
    /// Levels 4-6
    Moderate,
    /// Levels 7-10
    Aggressive,
    /// Anything outside 1-10
    Unknown,
}

impl RiskTier {
    /// Classify a risk level. Closed ranges, no gaps, no overlaps.
    pub const fn classify(risk: i32) -> Self {
        match risk {
            1..=3 => Self::Conservative,
            4..=6 => Self::Moderate,
            7..=10 => Self::Aggressive,
            _ => Self::Unknown,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Moderate => "moderate",
            Self::Aggressive => "aggressive",
            Self::Unknown => "unknown",
        }
    }

    /// Short human description of the tier
    pub const fn description(self) -> &'static str {
        match self {
            Self::Conservative => "Capital preservation first, low volatility",
            Self::Moderate => "Balanced growth and stability",
            Self::Aggressive => "Growth first, accepts high volatility",
            Self::Unknown => "Risk level outside 1-10",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a risk level into its advisory tier
pub const fn classify(risk: i32) -> RiskTier {
    RiskTier::classify(risk)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhaustive_boundaries() {
        for risk in -1..=12 {
            let expected = match risk {
                1 | 2 | 3 => RiskTier::Conservative,
                4 | 5 | 6 => RiskTier::Moderate,
                7 | 8 | 9 | 10 => RiskTier::Aggressive,
                _ => RiskTier::Unknown,
            };
            assert_eq!(classify(risk), expected, "risk level {risk}");
        }
    }

    #[test]
    fn test_tier_edges() {
        assert_eq!(classify(3), RiskTier::Conservative);
        assert_eq!(classify(4), RiskTier::Moderate);
        assert_eq!(classify(6), RiskTier::Moderate);
        assert_eq!(classify(7), RiskTier::Aggressive);
        assert_eq!(classify(0), RiskTier::Unknown);
        assert_eq!(classify(11), RiskTier::Unknown);
        assert_eq!(classify(i32::MIN), RiskTier::Unknown);
        assert_eq!(classify(i32::MAX), RiskTier::Unknown);
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RiskTier::Aggressive).unwrap(), "\"aggressive\"");
        assert_eq!(RiskTier::Moderate.to_string(), "moderate");
    }
}
