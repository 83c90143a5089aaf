use std::fs;
use std::path::Path;

use super::Questionnaire;
use crate::core::{Error, Result};

/// Parse a questionnaire from TOML without checking its structure.
pub fn parse_questionnaire_unchecked(contents: &str) -> Result<Questionnaire> {
    toml::from_str(contents)
        .map_err(|e| Error::Questionnaire(format!("failed to parse questionnaire: {}", e)))
}

/// Parse a questionnaire from TOML and reject it if validation reports
/// any issue.
pub fn parse_questionnaire(contents: &str) -> Result<Questionnaire> {
    let questionnaire = parse_questionnaire_unchecked(contents)?;

    let issues = questionnaire.validate();
    if issues.is_empty() {
        return Ok(questionnaire);
    }

    let report = issues
        .iter()
        .map(|issue| format!("  - {}", issue))
        .collect::<Vec<_>>()
        .join("\n");
    Err(Error::Questionnaire(format!(
        "{} problem(s) found:\n{}",
        issues.len(),
        report
    )))
}

/// Read a questionnaire file without checking its structure.
pub fn read_questionnaire_unchecked(path: &Path) -> Result<Questionnaire> {
    let contents = fs::read_to_string(path).map_err(|e| Error::io_at(e, path))?;
    parse_questionnaire_unchecked(&contents)
}

/// Read and validate a questionnaire file.
pub fn load_questionnaire(path: &Path) -> Result<Questionnaire> {
    let contents = fs::read_to_string(path).map_err(|e| Error::io_at(e, path))?;
    let questionnaire = parse_questionnaire(&contents)?;
    tracing::debug!(
        path = %path.display(),
        questions = questionnaire.questions.len(),
        "Loaded questionnaire"
    );
    Ok(questionnaire)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_parse_minimal_questionnaire() {
        let questionnaire = parse_questionnaire(indoc! {r#"
            sentinel = "None"

            [[questions]]
            id = 1
            prompt = "Do you delegate?"
            options = [
                { label = "Yes", points = 0 },
                { label = "No", points = 3 },
            ]

            [[assignments]]
            question = 1
            categories = ["delegation"]
        "#})
        .unwrap();

        assert_eq!(questionnaire.questions.len(), 1);
        assert!(!questionnaire.questions[0].multi_select);
    }

    #[test]
    fn test_parse_rejects_unknown_category() {
        let err = parse_questionnaire(indoc! {r#"
            sentinel = "None"

            [[questions]]
            id = 1
            prompt = "?"
            options = [{ label = "Yes", points = 1 }]

            [[assignments]]
            question = 1
            categories = ["morale"]
        "#})
        .unwrap_err();

        assert!(matches!(err, Error::Questionnaire(_)));
    }

    #[test]
    fn test_parse_fails_fast_on_unassigned_question() {
        let err = parse_questionnaire(indoc! {r#"
            sentinel = "None"

            [[questions]]
            id = 1
            prompt = "?"
            options = [{ label = "Yes", points = 1 }]

            [[questions]]
            id = 2
            prompt = "?"
            options = [{ label = "Yes", points = 1 }]

            [[assignments]]
            question = 1
            categories = ["gen-gap"]
        "#})
        .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("1 problem(s)"), "{}", message);
        assert!(message.contains("question 2"), "{}", message);
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let err = load_questionnaire(Path::new("/nonexistent/quiz.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/quiz.toml"));
    }
}
