//! Core domain types shared by the scoring engine and its collaborators.

pub mod errors;
pub mod types;

pub use errors::{Error, Result, ResultExt};
pub use types::{round2, AnswerSubmission, Category, CategoryScores, MAX_NORMALIZED_SCORE};
