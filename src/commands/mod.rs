//! CLI command implementations.
//!
//! Available commands:
//! - **questions**: List the questionnaire
//! - **score**: Score answers, classify them and optionally finalize the result
//! - **validate**: Report every problem in a questionnaire file
//! - **report** / **book**: Run the lead flows for a finalized result
//! - **init**: Initialize a new typequiz configuration file

pub mod init;
pub mod leads;
pub mod questions;
pub mod score;
pub mod validate;

pub use init::init_config;
pub use leads::{handle_book, handle_report, BookConfig};
pub use questions::handle_questions;
pub use score::{handle_score, result_id_for, ScoreConfig};
pub use validate::handle_validate;

use crate::config::TypequizConfig;
use crate::email::OutboxTransport;
use crate::io::OutputFormat;
use crate::persistence::JsonFileResultStore;
use crate::questionnaire::{load_questionnaire, Questionnaire};
use crate::scoring::ScoreNormalizer;
use crate::service::QuizService;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Questionnaire path from the command line, else from the config file.
fn questionnaire_path<'a>(
    config: &'a TypequizConfig,
    override_path: Option<&'a Path>,
) -> Option<&'a Path> {
    override_path.or(config.questionnaire.path.as_deref())
}

/// Load the questionnaire a command should use, falling back to the
/// built-in one.
pub fn resolve_questionnaire(
    config: &TypequizConfig,
    override_path: Option<&Path>,
) -> Result<Questionnaire> {
    match questionnaire_path(config, override_path) {
        Some(path) => load_questionnaire(path)
            .with_context(|| format!("Failed to load questionnaire {}", path.display())),
        None => Ok(Questionnaire::builtin()?.clone()),
    }
}

/// Output format from the command line, else from the config file.
pub fn resolve_format(config: &TypequizConfig, requested: Option<OutputFormat>) -> OutputFormat {
    if let Some(format) = requested {
        return format;
    }
    match config.output.default_format.as_deref().map(str::parse::<OutputFormat>) {
        Some(Ok(format)) => format,
        Some(Err(e)) => {
            tracing::warn!("{}. Using terminal output.", e);
            OutputFormat::Terminal
        }
        None => OutputFormat::Terminal,
    }
}

/// Service backed by the JSON store in the data directory and the mail
/// outbox.
pub fn build_service(config: &TypequizConfig, questionnaire: Questionnaire) -> Result<QuizService> {
    let store = Arc::new(JsonFileResultStore::open(&config.storage.data_dir).with_context(
        || {
            format!(
                "Failed to open data directory {}",
                config.storage.data_dir.display()
            )
        },
    )?);
    let outbox = OutboxTransport::new(
        PathBuf::from(&config.email.outbox_dir),
        config.email.from.clone(),
    );

    Ok(QuizService::new(
        ScoreNormalizer::new(questionnaire),
        store.clone(),
        store,
        Arc::new(outbox),
        config.email.links(),
    ))
}

/// Apply the config's color preference to terminal output.
pub fn apply_color_setting(config: &TypequizConfig) {
    if let Some(use_color) = config.output.use_color {
        colored::control::set_override(use_color);
    }
}
