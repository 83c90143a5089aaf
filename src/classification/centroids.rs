//! Nearest-centroid fallback used when no threshold rule matches.

use super::rules::HARASSMENT_RISK_GUARD;
use super::ManagerType;
use crate::core::{Category, CategoryScores};
use serde::Serialize;

/// Importance of each category in the distance, in [`Category::ALL`] order.
pub const CATEGORY_WEIGHTS: [f64; 6] = [1.2, 1.0, 1.1, 0.9, 0.8, 1.3];

/// Typical category profile of a type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Centroid {
    pub manager_type: ManagerType,
    /// Values in [`Category::ALL`] order.
    pub vector: [f64; 6],
    /// Conditions that must hold for the type to take part in the fallback.
    pub guard: Option<&'static [super::Condition]>,
}

impl Centroid {
    pub fn is_eligible(&self, scores: &CategoryScores) -> bool {
        self.guard
            .map(|conditions| conditions.iter().all(|c| c.holds(scores)))
            .unwrap_or(true)
    }

    pub fn value(&self, category: Category) -> f64 {
        self.vector[category.index()]
    }
}

/// Centroids in [`ManagerType::ALL`] order, which is also the tie-break order.
pub static CENTROIDS: [Centroid; 7] = [
    Centroid {
        manager_type: ManagerType::HarassmentRisk,
        vector: [1.8, 1.6, 2.4, 1.8, 2.0, 2.7],
        guard: Some(HARASSMENT_RISK_GUARD),
    },
    Centroid {
        manager_type: ManagerType::OrgBound,
        vector: [1.4, 2.6, 1.6, 1.8, 1.4, 1.0],
        guard: None,
    },
    Centroid {
        manager_type: ManagerType::SoloPlayer,
        vector: [2.6, 1.4, 1.6, 1.5, 1.3, 1.0],
        guard: None,
    },
    Centroid {
        manager_type: ManagerType::Disconnected,
        vector: [1.6, 1.5, 2.5, 1.5, 2.3, 1.3],
        guard: None,
    },
    Centroid {
        manager_type: ManagerType::Outdated,
        vector: [1.5, 1.6, 1.5, 2.6, 2.0, 1.2],
        guard: None,
    },
    Centroid {
        manager_type: ManagerType::Overstretched,
        vector: [2.2, 2.2, 2.0, 2.0, 1.6, 1.4],
        guard: None,
    },
    Centroid {
        manager_type: ManagerType::Balanced,
        vector: [0.8, 0.8, 0.8, 0.8, 0.8, 0.6],
        guard: None,
    },
];

/// Weighted sum of squared differences.
pub fn weighted_distance(scores: &CategoryScores, centroid: &Centroid) -> f64 {
    Category::ALL
        .iter()
        .map(|&category| {
            let diff = scores.get(category) - centroid.value(category);
            CATEGORY_WEIGHTS[category.index()] * diff * diff
        })
        .sum()
}

/// Distance from one centroid, as reported in classification traces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandidateDistance {
    pub manager_type: ManagerType,
    pub distance: f64,
    pub eligible: bool,
}

pub fn candidate_distances(scores: &CategoryScores) -> Vec<CandidateDistance> {
    CENTROIDS
        .iter()
        .map(|centroid| CandidateDistance {
            manager_type: centroid.manager_type,
            distance: weighted_distance(scores, centroid),
            eligible: centroid.is_eligible(scores),
        })
        .collect()
}

/// Closest eligible centroid. Ties go to the earlier centroid because only a
/// strictly smaller distance replaces the current best.
pub fn nearest_eligible(candidates: &[CandidateDistance]) -> Option<ManagerType> {
    candidates
        .iter()
        .filter(|c| c.eligible)
        .fold(None::<&CandidateDistance>, |best, candidate| match best {
            Some(current) if current.distance <= candidate.distance => Some(current),
            _ => Some(candidate),
        })
        .map(|c| c.manager_type)
}
