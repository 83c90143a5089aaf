//! Structural validation of questionnaire definitions.
//!
//! All checks run to completion so a broken file reports every problem at
//! once instead of one per edit-and-retry cycle.

use std::collections::{HashMap, HashSet};
use std::fmt;

use super::{Question, Questionnaire};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionnaireIssue {
    pub question: Option<u32>,
    pub message: String,
}

impl QuestionnaireIssue {
    fn for_question(question: u32, message: impl Into<String>) -> Self {
        Self {
            question: Some(question),
            message: message.into(),
        }
    }

    fn global(message: impl Into<String>) -> Self {
        Self {
            question: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for QuestionnaireIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.question {
            Some(id) => write!(f, "question {}: {}", id, self.message),
            None => f.write_str(&self.message),
        }
    }
}

pub(super) fn validate(questionnaire: &Questionnaire) -> Vec<QuestionnaireIssue> {
    let mut issues = Vec::new();

    if questionnaire.sentinel.trim().is_empty() {
        issues.push(QuestionnaireIssue::global("sentinel label is empty"));
    }
    if questionnaire.questions.is_empty() {
        issues.push(QuestionnaireIssue::global("questionnaire has no questions"));
    }

    issues.extend(duplicate_question_ids(questionnaire));
    for question in &questionnaire.questions {
        issues.extend(option_issues(question, &questionnaire.sentinel));
    }
    issues.extend(assignment_issues(questionnaire));

    issues
}

fn duplicate_question_ids(questionnaire: &Questionnaire) -> Vec<QuestionnaireIssue> {
    let mut seen = HashSet::new();
    questionnaire
        .questions
        .iter()
        .filter(|q| !seen.insert(q.id))
        .map(|q| QuestionnaireIssue::for_question(q.id, "duplicate question id"))
        .collect()
}

fn option_issues(question: &Question, sentinel: &str) -> Vec<QuestionnaireIssue> {
    let mut issues = Vec::new();

    if question.options.is_empty() {
        issues.push(QuestionnaireIssue::for_question(question.id, "has no options"));
    }

    let mut labels = HashSet::new();
    for option in &question.options {
        if !labels.insert(option.label.as_str()) {
            issues.push(QuestionnaireIssue::for_question(
                question.id,
                format!("duplicate option label '{}'", option.label),
            ));
        }
        if option.points < 0 {
            issues.push(QuestionnaireIssue::for_question(
                question.id,
                format!("option '{}' has negative points", option.label),
            ));
        }
    }

    if question.multi_select && !question.has_option(sentinel) {
        issues.push(QuestionnaireIssue::for_question(
            question.id,
            format!("multi-select question lacks the '{}' option", sentinel),
        ));
    }

    issues
}

fn assignment_issues(questionnaire: &Questionnaire) -> Vec<QuestionnaireIssue> {
    let mut issues = Vec::new();
    let known: HashSet<u32> = questionnaire.questions.iter().map(|q| q.id).collect();
    let mut assigned: HashMap<u32, usize> = HashMap::new();

    for assignment in &questionnaire.assignments {
        *assigned.entry(assignment.question).or_default() += 1;

        if !known.contains(&assignment.question) {
            issues.push(QuestionnaireIssue::for_question(
                assignment.question,
                "category assignment refers to an unknown question",
            ));
        }
        if assignment.categories.is_empty() {
            issues.push(QuestionnaireIssue::for_question(
                assignment.question,
                "category assignment lists no categories",
            ));
        }
        let distinct: HashSet<_> = assignment.categories.iter().collect();
        if distinct.len() != assignment.categories.len() {
            issues.push(QuestionnaireIssue::for_question(
                assignment.question,
                "category assignment repeats a category",
            ));
        }
    }

    for question in &questionnaire.questions {
        match assigned.get(&question.id) {
            None => issues.push(QuestionnaireIssue::for_question(
                question.id,
                "has no category assignment",
            )),
            Some(count) if *count > 1 => issues.push(QuestionnaireIssue::for_question(
                question.id,
                "has more than one category assignment",
            )),
            Some(_) => {}
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Category;
    use crate::questionnaire::{AnswerOption, CategoryAssignment};

    fn option(label: &str, points: i32) -> AnswerOption {
        AnswerOption {
            label: label.to_string(),
            points,
        }
    }

    fn question(id: u32, multi_select: bool, options: Vec<AnswerOption>) -> Question {
        Question {
            id,
            prompt: format!("Question {}", id),
            multi_select,
            options,
        }
    }

    #[test]
    fn test_collects_all_issues() {
        let questionnaire = Questionnaire {
            sentinel: "None".into(),
            questions: vec![
                question(1, false, vec![option("A", 1), option("A", -2)]),
                question(1, true, vec![option("B", 1)]),
                question(2, false, vec![]),
            ],
            assignments: vec![
                CategoryAssignment {
                    question: 1,
                    categories: vec![Category::GenGap, Category::GenGap],
                },
                CategoryAssignment {
                    question: 7,
                    categories: vec![],
                },
            ],
        };

        let messages: Vec<String> = questionnaire
            .validate()
            .iter()
            .map(ToString::to_string)
            .collect();

        let expected = [
            "question 1: duplicate question id",
            "question 1: duplicate option label 'A'",
            "question 1: option 'A' has negative points",
            "question 1: multi-select question lacks the 'None' option",
            "question 2: has no options",
            "question 7: category assignment refers to an unknown question",
            "question 7: category assignment lists no categories",
            "question 1: category assignment repeats a category",
            "question 2: has no category assignment",
        ];
        for message in expected {
            assert!(
                messages.iter().any(|m| m == message),
                "missing '{}' in {:#?}",
                message,
                messages
            );
        }
    }

    #[test]
    fn test_empty_questionnaire() {
        let questionnaire = Questionnaire {
            sentinel: " ".into(),
            questions: vec![],
            assignments: vec![],
        };
        let issues = questionnaire.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.question.is_none()));
    }
}
