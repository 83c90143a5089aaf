use super::questionnaire_path;
use crate::config::TypequizConfig;
use crate::questionnaire::{read_questionnaire_unchecked, Questionnaire, QuestionnaireIssue};
use anyhow::{Context, Result};
use colored::*;
use std::path::Path;

/// Issues found in the questionnaire a command would use.
pub fn collect_issues(
    config: &TypequizConfig,
    override_path: Option<&Path>,
) -> Result<(String, Vec<QuestionnaireIssue>)> {
    match questionnaire_path(config, override_path) {
        Some(path) => {
            let questionnaire = read_questionnaire_unchecked(path)
                .with_context(|| format!("Failed to read questionnaire {}", path.display()))?;
            Ok((path.display().to_string(), questionnaire.validate()))
        }
        None => Ok((
            "built-in questionnaire".to_string(),
            Questionnaire::builtin()?.validate(),
        )),
    }
}

pub fn handle_validate(config: &TypequizConfig, questionnaire: Option<&Path>) -> Result<()> {
    let (source, issues) = collect_issues(config, questionnaire)?;

    if issues.is_empty() {
        println!("{} {} is valid", "✓".green(), source);
        return Ok(());
    }

    println!("{} {}:", "✗".red(), source);
    for issue in &issues {
        println!("  - {}", issue);
    }
    anyhow::bail!("{} problem(s) found in {}", issues.len(), source)
}
