//! Type classification for normalized category scores.
//!
//! Classification runs in two steps:
//!
//! 1. **Rules**: [`rules::RULES`] in priority order, first match wins.
//! 2. **Fallback**: weighted nearest centroid over [`centroids::CENTROIDS`],
//!    skipping types whose eligibility guard fails.
//!
//! Both steps are pure, so classification is deterministic and total: every
//! vector in `[0, 3]^6` yields exactly one [`ManagerType`].
//!
//! ```rust
//! use typequiz::classification::{classify, ManagerType};
//! use typequiz::core::{Category, CategoryScores};
//!
//! let scores = CategoryScores::default()
//!     .with(Category::OrgDrag, 2.4)
//!     .with(Category::Delegation, 1.0);
//! assert_eq!(classify(&scores), ManagerType::OrgBound);
//! ```

pub mod centroids;
pub mod rules;
mod types;

pub use centroids::{CandidateDistance, Centroid, CATEGORY_WEIGHTS, CENTROIDS};
pub use rules::{Comparison, Condition, TypeRule, RULES};
pub use types::ManagerType;

use crate::core::CategoryScores;
use serde::Serialize;

/// How a classification was reached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "step", rename_all = "kebab-case")]
pub enum Decision {
    /// A threshold rule matched; `priority` is its zero-based position.
    Rule { priority: usize },
    /// No rule matched; distances to every centroid in tie-break order.
    Centroid { candidates: Vec<CandidateDistance> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub manager_type: ManagerType,
    pub decision: Decision,
}

/// Classify a normalized category vector.
pub fn classify(scores: &CategoryScores) -> ManagerType {
    classify_with_trace(scores).manager_type
}

/// Classify and report which step decided.
pub fn classify_with_trace(scores: &CategoryScores) -> Classification {
    if let Some((priority, rule)) = rules::first_matching_rule(scores) {
        tracing::debug!(
            manager_type = %rule.manager_type,
            priority,
            "Classified by threshold rule"
        );
        return Classification {
            manager_type: rule.manager_type,
            decision: Decision::Rule { priority },
        };
    }

    let candidates = centroids::candidate_distances(scores);
    // Only harassment-risk carries a guard, so at least six candidates remain.
    let manager_type =
        centroids::nearest_eligible(&candidates).unwrap_or(ManagerType::Balanced);
    tracing::debug!(%manager_type, "Classified by nearest centroid");

    Classification {
        manager_type,
        decision: Decision::Centroid { candidates },
    }
}
