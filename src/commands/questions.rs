use super::{resolve_format, resolve_questionnaire};
use crate::config::TypequizConfig;
use crate::io::{create_writer, OutputFormat};
use anyhow::Result;
use std::path::Path;

pub fn handle_questions(
    config: &TypequizConfig,
    questionnaire: Option<&Path>,
    format: Option<OutputFormat>,
) -> Result<()> {
    let questionnaire = resolve_questionnaire(config, questionnaire)?;
    let mut writer = create_writer(resolve_format(config, format), std::io::stdout());
    writer.write_questions(&questionnaire)
}
