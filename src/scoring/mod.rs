//! Answer aggregation: raw per-question points to normalized category scores.

pub mod score_normalizer;

pub use score_normalizer::{
    category_maxima, effective_labels, normalize, Aggregation, ScoreNormalizer, ScoringWarning,
};
