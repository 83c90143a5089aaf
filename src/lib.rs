//! Management style quiz engine.
//!
//! Answers are reduced to six normalized category scores by the
//! [`ScoreNormalizer`](scoring::ScoreNormalizer), classified into one of seven
//! [`ManagerType`]s, finalized as a write-once snapshot, and fed into the
//! report and consultation lead flows.

// Export modules for library usage
pub mod classification;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod email;
pub mod io;
pub mod leads;
pub mod observability;
pub mod persistence;
pub mod questionnaire;
pub mod scoring;
pub mod service;

// Re-export commonly used types
pub use crate::core::{
    AnswerSubmission, Category, CategoryScores, Error, Result, MAX_NORMALIZED_SCORE,
};

pub use crate::classification::{classify, classify_with_trace, Classification, ManagerType};

pub use crate::scoring::{Aggregation, ScoreNormalizer, ScoringWarning};

pub use crate::questionnaire::{load_questionnaire, Questionnaire};

pub use crate::persistence::{
    FinalizeOutcome, JsonFileResultStore, LeadStore, MemoryResultStore, ResultStore,
};

pub use crate::service::{LeadReceipt, QuizOutcome, QuizService};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
