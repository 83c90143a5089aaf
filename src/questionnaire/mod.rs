//! Static questionnaire configuration.
//!
//! A [`Questionnaire`] holds the ordered question list, the question to
//! category assignment table and the sentinel label. It is loaded once
//! (either the embedded default or a TOML file) and never mutated afterwards.
//!
//! ```rust
//! use typequiz::questionnaire::Questionnaire;
//!
//! let questionnaire = Questionnaire::builtin().unwrap();
//! assert!(questionnaire.validate().is_empty());
//! ```

mod loader;
mod validation;

pub use loader::{
    load_questionnaire, parse_questionnaire, parse_questionnaire_unchecked,
    read_questionnaire_unchecked,
};
pub use validation::QuestionnaireIssue;

use crate::core::{Category, Result};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

const BUILTIN_QUESTIONNAIRE: &str = include_str!("default_questionnaire.toml");

static BUILTIN: OnceCell<Questionnaire> = OnceCell::new();

/// One selectable answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnswerOption {
    pub label: String,
    pub points: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Question {
    pub id: u32,
    pub prompt: String,
    #[serde(default)]
    pub multi_select: bool,
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Point value of the option with this label, if any.
    pub fn points_for(&self, label: &str) -> Option<i32> {
        self.options
            .iter()
            .find(|option| option.label == label)
            .map(|option| option.points)
    }

    /// Highest point value any single option can earn. Zero for a question
    /// without options.
    pub fn max_points(&self) -> i32 {
        self.options
            .iter()
            .map(|option| option.points)
            .max()
            .unwrap_or(0)
    }

    pub fn has_option(&self, label: &str) -> bool {
        self.options.iter().any(|option| option.label == label)
    }
}

/// Assignment of one question to the categories its score feeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryAssignment {
    pub question: u32,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Questionnaire {
    /// Label of the "none of the above" option on multi-select questions.
    pub sentinel: String,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub assignments: Vec<CategoryAssignment>,
}

impl Questionnaire {
    /// The embedded default questionnaire, parsed and validated on first use.
    pub fn builtin() -> Result<&'static Questionnaire> {
        BUILTIN.get_or_try_init(|| parse_questionnaire(BUILTIN_QUESTIONNAIRE))
    }

    pub fn question(&self, id: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Categories a question feeds. `None` when the question is unassigned.
    pub fn categories_for(&self, question_id: u32) -> Option<&[Category]> {
        self.assignments
            .iter()
            .find(|a| a.question == question_id)
            .map(|a| a.categories.as_slice())
    }

    /// Collect every structural problem in the definition.
    pub fn validate(&self) -> Vec<QuestionnaireIssue> {
        validation::validate(self)
    }
}
