use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Management style assigned to a respondent.
///
/// Declaration order is significant: it is the iteration order of the
/// centroid fallback and therefore its tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManagerType {
    /// Low awareness of harassment risk combined with a communication gap
    HarassmentRisk,
    /// Held back by approvals and process rather than by their own habits
    OrgBound,
    /// Keeps the work to themselves
    SoloPlayer,
    /// Out of touch with the team, especially younger members
    Disconnected,
    /// Slow to update ways of working
    Outdated,
    /// Struggling on several fronts at once
    Overstretched,
    /// No pronounced problem area
    Balanced,
}

impl ManagerType {
    pub const ALL: [ManagerType; 7] = [
        ManagerType::HarassmentRisk,
        ManagerType::OrgBound,
        ManagerType::SoloPlayer,
        ManagerType::Disconnected,
        ManagerType::Outdated,
        ManagerType::Overstretched,
        ManagerType::Balanced,
    ];

    /// Stable label stored with results and sent to collaborators.
    pub fn key(&self) -> &'static str {
        match self {
            ManagerType::HarassmentRisk => "harassment-risk",
            ManagerType::OrgBound => "org-bound",
            ManagerType::SoloPlayer => "solo-player",
            ManagerType::Disconnected => "disconnected",
            ManagerType::Outdated => "outdated",
            ManagerType::Overstretched => "overstretched",
            ManagerType::Balanced => "balanced",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ManagerType::HarassmentRisk => "The Blind-Spot Boss",
            ManagerType::OrgBound => "The Red-Tape Captive",
            ManagerType::SoloPlayer => "The One-Person Team",
            ManagerType::Disconnected => "The Distant Leader",
            ManagerType::Outdated => "The Yesterday Manager",
            ManagerType::Overstretched => "The Overloaded Juggler",
            ManagerType::Balanced => "The Steady Hand",
        }
    }

    pub fn tagline(&self) -> &'static str {
        match self {
            ManagerType::HarassmentRisk => "Good intentions, risky habits",
            ManagerType::OrgBound => "Ready to move, waiting for sign-off",
            ManagerType::SoloPlayer => "Fast alone, slow together",
            ManagerType::Disconnected => "The team talks, just not to you",
            ManagerType::Outdated => "What worked then still runs now",
            ManagerType::Overstretched => "Every front at once",
            ManagerType::Balanced => "Healthy habits across the board",
        }
    }

    /// Short paragraph used in the report email.
    pub fn summary(&self) -> &'static str {
        match self {
            ManagerType::HarassmentRisk => {
                "Some of your everyday habits could be read as harassment, and the gap \
                 between you and your team makes it unlikely anyone will tell you."
            }
            ManagerType::OrgBound => {
                "You are willing to hand work off, but layers of approval and unclear \
                 ownership slow every decision your team needs."
            }
            ManagerType::SoloPlayer => {
                "You carry most of the load yourself. It keeps quality high in the short \
                 term and leaves your team without room to grow."
            }
            ManagerType::Disconnected => {
                "Problems reach you late and younger colleagues feel hard to read. The \
                 distance is widening on both sides."
            }
            ManagerType::Outdated => {
                "Your processes and tools have not kept pace with how your team wants to \
                 work, and the friction shows up as quiet disengagement."
            }
            ManagerType::Overstretched => {
                "Delegation, process drag and communication are all under strain at once. \
                 Small fixes in each area will compound quickly."
            }
            ManagerType::Balanced => {
                "Your answers show no pronounced problem area. The report covers how to \
                 keep it that way as your team grows."
            }
        }
    }
}

impl fmt::Display for ManagerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ManagerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ManagerType::ALL
            .into_iter()
            .find(|t| t.key() == s)
            .ok_or_else(|| format!("unknown manager type '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_match_serde_names() {
        for manager_type in ManagerType::ALL {
            let json = serde_json::to_string(&manager_type).unwrap();
            assert_eq!(json, format!("\"{}\"", manager_type.key()));
            assert_eq!(manager_type.key().parse::<ManagerType>(), Ok(manager_type));
        }
    }
}
