use std::fmt;

use serde::{Deserialize, Serialize};

/// Scoring strategies understood by the analysis service.
///
/// - `SmartBalance`: Weighs urgency, importance and effort evenly (default)
/// - `DeadlineDriven`: Favors tasks that are due soon or overdue
/// - `HighImpact`: Favors important tasks
/// - `FastestWins`: Favors low-effort tasks
///
/// Requests carry the strategy as a plain string, so values outside this set
/// are still sent; the service falls back to its default for them.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    SmartBalance,
    DeadlineDriven,
    HighImpact,
    FastestWins,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Self::SmartBalance,
        Self::DeadlineDriven,
        Self::HighImpact,
        Self::FastestWins,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SmartBalance => "smart_balance",
            Self::DeadlineDriven => "deadline_driven",
            Self::HighImpact => "high_impact",
            Self::FastestWins => "fastest_wins",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "smart_balance" => Some(Self::SmartBalance),
            "deadline_driven" => Some(Self::DeadlineDriven),
            "high_impact" => Some(Self::HighImpact),
            "fastest_wins" => Some(Self::FastestWins),
            _ => None,
        }
    }

    /// Human-readable label for menus.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SmartBalance => "Smart Balance",
            Self::DeadlineDriven => "Deadline Driven",
            Self::HighImpact => "High Impact",
            Self::FastestWins => "Fastest Wins",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_wire_values() {
        for strategy in Strategy::ALL {
            assert_eq!(Strategy::from_str(strategy.as_str()), Some(strategy));
            let json = serde_json::to_value(strategy).unwrap();
            assert_eq!(json, strategy.as_str());
        }
    }

    #[test]
    fn test_unknown_strategy() {
        assert_eq!(Strategy::from_str("priority"), None);
    }
}
