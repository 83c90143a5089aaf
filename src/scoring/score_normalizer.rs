use crate::core::{round2, AnswerSubmission, Category, CategoryScores, MAX_NORMALIZED_SCORE};
use crate::questionnaire::Questionnaire;
use serde::Serialize;
use std::fmt;

/// Non-fatal problem met while aggregating answers. Each one is logged and
/// the offending item contributes zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScoringWarning {
    /// The question has no category assignment.
    UnassignedQuestion { question_id: u32 },
    /// The question is assigned to categories but has no definition.
    UnknownQuestion { question_id: u32 },
    /// A selected label matches none of the question's options.
    UnmatchedLabel { question_id: u32, label: String },
}

impl fmt::Display for ScoringWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringWarning::UnassignedQuestion { question_id } => {
                write!(f, "question {} has no category assignment", question_id)
            }
            ScoringWarning::UnknownQuestion { question_id } => {
                write!(f, "question {} is not defined", question_id)
            }
            ScoringWarning::UnmatchedLabel { question_id, label } => {
                write!(f, "question {} has no option '{}'", question_id, label)
            }
        }
    }
}

/// Result of [`ScoreNormalizer::aggregate_with_diagnostics`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    pub scores: CategoryScores,
    /// Raw per-category sums in [`Category::ALL`] order.
    pub raw_totals: [f64; 6],
    pub warnings: Vec<ScoringWarning>,
}

/// Reduces answer submissions to a normalized category vector.
///
/// The per-category theoretical maxima depend on the questionnaire only, so
/// they are computed once here and reused for every aggregation.
#[derive(Debug, Clone)]
pub struct ScoreNormalizer {
    questionnaire: Questionnaire,
    category_max: [f64; 6],
}

impl ScoreNormalizer {
    pub fn new(questionnaire: Questionnaire) -> Self {
        let category_max = category_maxima(&questionnaire);
        Self {
            questionnaire,
            category_max,
        }
    }

    /// Normalizer over the embedded default questionnaire.
    pub fn builtin() -> crate::core::Result<Self> {
        Ok(Self::new(Questionnaire::builtin()?.clone()))
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    /// Theoretical maximum raw score of a category.
    pub fn category_max(&self, category: Category) -> f64 {
        self.category_max[category.index()]
    }

    /// Aggregate and normalize. Never fails; see [`ScoringWarning`].
    pub fn aggregate(&self, responses: &[AnswerSubmission]) -> CategoryScores {
        self.aggregate_with_diagnostics(responses).scores
    }

    pub fn aggregate_with_diagnostics(&self, responses: &[AnswerSubmission]) -> Aggregation {
        let mut raw_totals = [0.0; 6];
        let mut warnings = Vec::new();

        for response in responses {
            let question_id = response.question_id;
            let Some(categories) = self
                .questionnaire
                .categories_for(question_id)
                .filter(|c| !c.is_empty())
            else {
                warnings.push(ScoringWarning::UnassignedQuestion { question_id });
                continue;
            };
            let Some(question) = self.questionnaire.question(question_id) else {
                warnings.push(ScoringWarning::UnknownQuestion { question_id });
                continue;
            };

            let labels = effective_labels(&response.selected_labels, &self.questionnaire.sentinel);
            let mut raw_score = 0.0;
            for label in labels {
                match question.points_for(label) {
                    Some(points) => raw_score += f64::from(points),
                    None => warnings.push(ScoringWarning::UnmatchedLabel {
                        question_id,
                        label: label.to_string(),
                    }),
                }
            }

            let share = raw_score / categories.len() as f64;
            for category in categories {
                raw_totals[category.index()] += share;
            }
        }

        for warning in &warnings {
            tracing::warn!("Ignoring answer: {}", warning);
        }

        let mut scores = CategoryScores::default();
        for category in Category::ALL {
            let index = category.index();
            scores.set(
                category,
                normalize(raw_totals[index], self.category_max[index]),
            );
        }

        Aggregation {
            scores,
            raw_totals,
            warnings,
        }
    }
}

/// Apply the sentinel rule: a selection containing the sentinel together
/// with anything else collapses to the sentinel alone.
pub fn effective_labels<'a>(labels: &'a [String], sentinel: &str) -> Vec<&'a str> {
    let has_sentinel = labels.iter().any(|l| l == sentinel);
    if has_sentinel && labels.len() > 1 {
        tracing::debug!("Sentinel selected with other answers; keeping sentinel only");
        return labels
            .iter()
            .filter(|l| l.as_str() == sentinel)
            .take(1)
            .map(String::as_str)
            .collect();
    }
    labels.iter().map(String::as_str).collect()
}

/// Per-category theoretical maximum: each assigned question contributes its
/// best option value split across the categories it feeds.
pub fn category_maxima(questionnaire: &Questionnaire) -> [f64; 6] {
    let mut maxima = [0.0; 6];
    for assignment in &questionnaire.assignments {
        if assignment.categories.is_empty() {
            continue;
        }
        let Some(question) = questionnaire.question(assignment.question) else {
            continue;
        };
        let share = f64::from(question.max_points()) / assignment.categories.len() as f64;
        for category in &assignment.categories {
            maxima[category.index()] += share;
        }
    }
    maxima
}

/// Rescale a raw total into `[0, 3]`, rounded to two decimals.
pub fn normalize(raw: f64, max: f64) -> f64 {
    if max > 0.0 {
        round2(((raw / max) * MAX_NORMALIZED_SCORE).clamp(0.0, MAX_NORMALIZED_SCORE))
    } else {
        0.0
    }
}
