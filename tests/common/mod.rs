// Test utility module for typequiz integration tests
#![allow(dead_code)]

use typequiz::questionnaire::Questionnaire;
use typequiz::{AnswerSubmission, ScoreNormalizer};

pub fn builtin() -> &'static Questionnaire {
    Questionnaire::builtin().expect("built-in questionnaire is valid")
}

pub fn builtin_normalizer() -> ScoreNormalizer {
    ScoreNormalizer::new(builtin().clone())
}

/// Pick the highest-scoring option on every question.
pub fn max_answers() -> Vec<AnswerSubmission> {
    builtin()
        .questions
        .iter()
        .map(|question| {
            let best = question
                .options
                .iter()
                .max_by_key(|option| option.points)
                .expect("question has options");
            AnswerSubmission::single(question.id, best.label.clone())
        })
        .collect()
}

/// Pick the lowest-scoring option on every question.
pub fn min_answers() -> Vec<AnswerSubmission> {
    builtin()
        .questions
        .iter()
        .map(|question| {
            let least = question
                .options
                .iter()
                .min_by_key(|option| option.points)
                .expect("question has options");
            AnswerSubmission::single(question.id, least.label.clone())
        })
        .collect()
}

pub fn answers(selections: &[(u32, &[&str])]) -> Vec<AnswerSubmission> {
    selections
        .iter()
        .map(|(id, labels)| AnswerSubmission::new(*id, labels.iter().copied()))
        .collect()
}
