use super::{build_service, resolve_format, resolve_questionnaire};
use crate::classification::classify_with_trace;
use crate::config::TypequizConfig;
use crate::core::AnswerSubmission;
use crate::io::{create_writer, OutputFormat, ScoreReport};
use crate::scoring::ScoreNormalizer;
use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::{Path, PathBuf};

pub struct ScoreConfig {
    pub answers: PathBuf,
    pub questionnaire: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub result_id: Option<String>,
    pub finalize: bool,
    pub trace: bool,
}

/// Content-derived result id, so re-scoring the same answers addresses the
/// same record.
pub fn result_id_for(responses: &[AnswerSubmission]) -> String {
    let mut hasher = Sha256::new();
    for response in responses {
        hasher.update(response.question_id.to_le_bytes());
        for label in &response.selected_labels {
            hasher.update((label.len() as u64).to_le_bytes());
            hasher.update(label.as_bytes());
        }
        hasher.update([0xff]);
    }
    let digest = format!("{:x}", hasher.finalize());
    format!("r-{}", &digest[..16])
}

pub fn read_answers(path: &Path) -> Result<Vec<AnswerSubmission>> {
    let contents = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read answers from stdin")?;
        buffer
    } else {
        crate::io::read_file(path)?
    };
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse answers in {}", path.display()))
}

/// Score and classify, finalizing through the service when asked to.
pub fn build_report(
    config: &TypequizConfig,
    score_config: &ScoreConfig,
    responses: &[AnswerSubmission],
) -> Result<ScoreReport> {
    let questionnaire = resolve_questionnaire(config, score_config.questionnaire.as_deref())?;
    let result_id = score_config
        .result_id
        .clone()
        .unwrap_or_else(|| result_id_for(responses));

    let (scores, warnings, finalize) = if score_config.finalize {
        let service = build_service(config, questionnaire)?;
        let outcome = service.complete_session(&result_id, responses);
        (outcome.scores, outcome.warnings, outcome.finalize)
    } else {
        let aggregation = ScoreNormalizer::new(questionnaire).aggregate_with_diagnostics(responses);
        (aggregation.scores, aggregation.warnings, None)
    };

    let classification = classify_with_trace(&scores);
    Ok(ScoreReport {
        result_id,
        manager_type: classification.manager_type,
        scores,
        warnings,
        decision: score_config.trace.then_some(classification.decision),
        finalize,
    })
}

pub fn handle_score(config: &TypequizConfig, score_config: ScoreConfig) -> Result<()> {
    let responses = read_answers(&score_config.answers)?;
    let report = build_report(config, &score_config, &responses)?;

    if score_config.finalize && report.finalize.is_none() {
        tracing::warn!(result_id = %report.result_id, "Result was not saved");
    }

    let mut writer = create_writer(resolve_format(config, score_config.format), std::io::stdout());
    writer.write_score(&report)
}
