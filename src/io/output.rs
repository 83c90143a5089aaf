use crate::classification::{Decision, ManagerType, RULES};
use crate::core::{Category, CategoryScores, MAX_NORMALIZED_SCORE};
use crate::persistence::FinalizeOutcome;
use crate::questionnaire::Questionnaire;
use crate::scoring::ScoringWarning;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use serde::Serialize;
use std::io::Write;
use std::str::FromStr;

const BAR_WIDTH: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "terminal" => Ok(OutputFormat::Terminal),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

/// Everything the `score` command reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub result_id: String,
    pub manager_type: ManagerType,
    pub scores: CategoryScores,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ScoringWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<Decision>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finalize: Option<FinalizeOutcome>,
}

pub trait OutputWriter {
    fn write_score(&mut self, report: &ScoreReport) -> anyhow::Result<()>;
    fn write_questions(&mut self, questionnaire: &Questionnaire) -> anyhow::Result<()>;
}

pub fn create_writer<W: Write + 'static>(format: OutputFormat, writer: W) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

#[derive(Serialize)]
struct QuestionListing<'a> {
    id: u32,
    prompt: &'a str,
    multi_select: bool,
    categories: &'a [Category],
    options: &'a [crate::questionnaire::AnswerOption],
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_score(&mut self, report: &ScoreReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    fn write_questions(&mut self, questionnaire: &Questionnaire) -> anyhow::Result<()> {
        let listing: Vec<_> = questionnaire
            .questions
            .iter()
            .map(|question| QuestionListing {
                id: question.id,
                prompt: &question.prompt,
                multi_select: question.multi_select,
                categories: questionnaire.categories_for(question.id).unwrap_or(&[]),
                options: &question.options,
            })
            .collect();
        let json = serde_json::to_string_pretty(&listing)?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_header(&mut self, report: &ScoreReport) -> anyhow::Result<()> {
        let manager_type = report.manager_type;
        writeln!(
            self.writer,
            "{} {} ({})",
            "Management style:".bold(),
            manager_type.display_name().bold().blue(),
            manager_type.key()
        )?;
        writeln!(self.writer, "  {}", manager_type.tagline().italic())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_decision(&mut self, decision: &Decision) -> anyhow::Result<()> {
        match decision {
            Decision::Rule { priority } => {
                let rule = &RULES[*priority];
                let conditions: Vec<String> =
                    rule.conditions.iter().map(|c| c.to_string()).collect();
                writeln!(
                    self.writer,
                    "Decided by rule #{}: {}",
                    priority + 1,
                    conditions.join(", ")
                )?;
            }
            Decision::Centroid { candidates } => {
                writeln!(self.writer, "No rule matched; nearest centroid:")?;
                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL)
                    .set_header(vec!["Type", "Distance", "Eligible"]);
                for candidate in candidates {
                    table.add_row(vec![
                        Cell::new(candidate.manager_type.key()),
                        Cell::new(format!("{:.3}", candidate.distance)),
                        Cell::new(if candidate.eligible { "yes" } else { "no" }),
                    ]);
                }
                writeln!(self.writer, "{}", table)?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_finalize(&mut self, outcome: &FinalizeOutcome) -> anyhow::Result<()> {
        let status = match (outcome.created, outcome.updated) {
            (true, _) => "saved".green(),
            (_, true) => "finalized draft".green(),
            _ => "already finalized, stored result kept".yellow(),
        };
        writeln!(self.writer, "Result: {}", status)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_score(&mut self, report: &ScoreReport) -> anyhow::Result<()> {
        self.write_header(report)?;
        writeln!(self.writer, "{}", score_table(&report.scores))?;
        writeln!(self.writer)?;

        if let Some(decision) = &report.decision {
            self.write_decision(decision)?;
        }
        for warning in &report.warnings {
            writeln!(self.writer, "{} {}", "warning:".yellow().bold(), warning)?;
        }
        writeln!(self.writer, "Result id: {}", report.result_id)?;
        if let Some(outcome) = &report.finalize {
            self.write_finalize(outcome)?;
        }
        Ok(())
    }

    fn write_questions(&mut self, questionnaire: &Questionnaire) -> anyhow::Result<()> {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["#", "Question", "Options", "Categories"]);

        for question in &questionnaire.questions {
            let options: Vec<String> = question
                .options
                .iter()
                .map(|option| format!("{} ({})", option.label, option.points))
                .collect();
            let categories: Vec<&str> = questionnaire
                .categories_for(question.id)
                .unwrap_or(&[])
                .iter()
                .map(|category| category.key())
                .collect();
            let prompt = if question.multi_select {
                format!("{}\n[multi-select]", question.prompt)
            } else {
                question.prompt.clone()
            };
            table.add_row(vec![
                Cell::new(question.id),
                Cell::new(prompt),
                Cell::new(options.join("\n")),
                Cell::new(categories.join("\n")),
            ]);
        }

        writeln!(self.writer, "{}", table)?;
        Ok(())
    }
}

fn score_table(scores: &CategoryScores) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Category", "Score", ""]);
    for (category, value) in scores.iter() {
        table.add_row(vec![
            Cell::new(category.label()),
            Cell::new(format!("{:.2}", value)),
            Cell::new(score_bar(value)).fg(score_color(value)),
        ]);
    }
    table
}

/// Fixed-width bar for a score in `[0, 3]`.
pub fn score_bar(value: f64) -> String {
    let ratio = (value / MAX_NORMALIZED_SCORE).clamp(0.0, 1.0);
    let filled = (ratio * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn score_color(value: f64) -> Color {
    if value >= 2.2 {
        Color::Red
    } else if value >= 1.5 {
        Color::Yellow
    } else {
        Color::Green
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::classify_with_trace;

    fn report(scores: CategoryScores) -> ScoreReport {
        let classification = classify_with_trace(&scores);
        ScoreReport {
            result_id: "r1".into(),
            manager_type: classification.manager_type,
            scores,
            warnings: vec![ScoringWarning::UnmatchedLabel {
                question_id: 4,
                label: "Maybe".into(),
            }],
            decision: Some(classification.decision),
            finalize: Some(FinalizeOutcome::CREATED),
        }
    }

    #[test]
    fn test_score_bar_width() {
        assert_eq!(score_bar(0.0).chars().count(), BAR_WIDTH);
        assert_eq!(score_bar(3.0), "█".repeat(BAR_WIDTH));
        assert_eq!(score_bar(1.5).chars().filter(|c| *c == '█').count(), 6);
    }

    #[test]
    fn test_json_report_shape() {
        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer)
            .write_score(&report(CategoryScores::uniform(1.5)))
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["manager_type"], "outdated");
        assert_eq!(value["scores"]["gen-gap"], 1.5);
        assert_eq!(value["decision"]["step"], "centroid");
        assert_eq!(value["finalize"]["created"], true);
        assert_eq!(value["warnings"][0]["kind"], "unmatched-label");
    }

    #[test]
    fn test_terminal_report_mentions_type_and_categories() {
        let mut buffer = Vec::new();
        TerminalWriter::new(&mut buffer)
            .write_score(&report(CategoryScores::default().with(Category::OrgDrag, 2.5)))
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("org-bound"));
        assert!(text.contains("Decided by rule #2"));
        for category in Category::ALL {
            assert!(text.contains(category.label()), "{}", category.label());
        }
        assert!(text.contains("Result id: r1"));
    }

    #[test]
    fn test_questions_listing() {
        let questionnaire = Questionnaire::builtin().unwrap();
        let mut buffer = Vec::new();
        JsonWriter::new(&mut buffer)
            .write_questions(questionnaire)
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        let listed = value.as_array().unwrap();
        assert_eq!(listed.len(), questionnaire.questions.len());
        assert!(!listed[0]["categories"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_output_format_from_config_string() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }
}
