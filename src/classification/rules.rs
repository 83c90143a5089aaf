//! Ordered threshold rules.
//!
//! Rules are evaluated top to bottom and the first whose conditions all hold
//! decides the type. Priority order is part of the semantics: when two rules
//! would both match, the earlier one wins.

use super::ManagerType;
use crate::core::{Category, CategoryScores};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Comparison {
    /// `>=`
    AtLeast,
    /// `<=`
    AtMost,
    /// `<`
    Below,
}

impl Comparison {
    fn holds(self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::AtLeast => value >= threshold,
            Comparison::AtMost => value <= threshold,
            Comparison::Below => value < threshold,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Comparison::AtLeast => ">=",
            Comparison::AtMost => "<=",
            Comparison::Below => "<",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Condition {
    pub category: Category,
    pub comparison: Comparison,
    pub threshold: f64,
}

impl Condition {
    pub const fn at_least(category: Category, threshold: f64) -> Self {
        Self {
            category,
            comparison: Comparison::AtLeast,
            threshold,
        }
    }

    pub const fn at_most(category: Category, threshold: f64) -> Self {
        Self {
            category,
            comparison: Comparison::AtMost,
            threshold,
        }
    }

    pub const fn below(category: Category, threshold: f64) -> Self {
        Self {
            category,
            comparison: Comparison::Below,
            threshold,
        }
    }

    pub fn holds(&self, scores: &CategoryScores) -> bool {
        self.comparison
            .holds(scores.get(self.category), self.threshold)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.category,
            self.comparison.symbol(),
            self.threshold
        )
    }
}

/// A type together with the conjunction of conditions that selects it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TypeRule {
    pub manager_type: ManagerType,
    pub conditions: &'static [Condition],
}

impl TypeRule {
    pub fn matches(&self, scores: &CategoryScores) -> bool {
        self.conditions.iter().all(|c| c.holds(scores))
    }
}

use Category::*;

/// Harassment-risk eligibility; also the first two conditions of its rule.
pub const HARASSMENT_RISK_GUARD: &[Condition] = &[
    Condition::at_least(HarassmentAwareness, 2.4),
    Condition::at_least(CommGap, 1.8),
];

/// Rules in priority order.
pub static RULES: [TypeRule; 7] = [
    TypeRule {
        manager_type: ManagerType::HarassmentRisk,
        conditions: &[
            Condition::at_least(HarassmentAwareness, 2.4),
            Condition::at_least(CommGap, 1.8),
            Condition::at_least(GenGap, 1.5),
        ],
    },
    TypeRule {
        manager_type: ManagerType::OrgBound,
        conditions: &[
            Condition::at_least(OrgDrag, 2.2),
            Condition::below(Delegation, 2.0),
        ],
    },
    TypeRule {
        manager_type: ManagerType::SoloPlayer,
        conditions: &[
            Condition::at_least(Delegation, 2.2),
            Condition::below(OrgDrag, 2.0),
            Condition::at_most(CommGap, 2.0),
        ],
    },
    TypeRule {
        manager_type: ManagerType::Disconnected,
        conditions: &[
            Condition::at_least(CommGap, 2.0),
            Condition::at_least(GenGap, 1.8),
        ],
    },
    TypeRule {
        manager_type: ManagerType::Outdated,
        conditions: &[
            Condition::at_least(UpdatePower, 2.2),
            Condition::at_least(GenGap, 1.5),
            Condition::below(Delegation, 2.5),
        ],
    },
    TypeRule {
        manager_type: ManagerType::Overstretched,
        conditions: &[
            Condition::at_least(Delegation, 1.8),
            Condition::at_least(OrgDrag, 1.8),
            Condition::at_least(CommGap, 1.5),
            Condition::at_least(UpdatePower, 1.5),
        ],
    },
    TypeRule {
        manager_type: ManagerType::Balanced,
        conditions: &[
            Condition::at_most(Delegation, 1.2),
            Condition::at_most(OrgDrag, 1.2),
            Condition::at_most(CommGap, 1.2),
            Condition::at_most(UpdatePower, 1.2),
        ],
    },
];

/// First matching rule and its zero-based priority.
pub fn first_matching_rule(scores: &CategoryScores) -> Option<(usize, &'static TypeRule)> {
    RULES
        .iter()
        .enumerate()
        .find(|(_, rule)| rule.matches(scores))
}

/// Rule for a type.
pub fn rule_for(manager_type: ManagerType) -> Option<&'static TypeRule> {
    RULES.iter().find(|r| r.manager_type == manager_type)
}
