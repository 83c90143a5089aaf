use anyhow::Result;
use clap::Parser;
use typequiz::cli::{Cli, Commands};
use typequiz::commands::{self, BookConfig, ScoreConfig};
use typequiz::config::{load_config, load_config_from_path, TypequizConfig};
use typequiz::observability::init_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Commands::Init { force } = cli.command {
        return commands::init_config(force);
    }

    let config = load_configuration(&cli)?;
    commands::apply_color_setting(&config);

    match cli.command {
        Commands::Questions {
            questionnaire,
            format,
        } => commands::handle_questions(&config, questionnaire.as_deref(), format),
        Commands::Score {
            answers,
            questionnaire,
            format,
            result_id,
            finalize,
            trace,
        } => commands::handle_score(
            &config,
            ScoreConfig {
                answers,
                questionnaire,
                format,
                result_id,
                finalize,
                trace,
            },
        ),
        Commands::Validate { questionnaire } => {
            commands::handle_validate(&config, questionnaire.as_deref())
        }
        Commands::Report { contact } => commands::handle_report(&config, &contact),
        Commands::Book {
            contact,
            slot,
            message,
        } => commands::handle_book(
            &config,
            &BookConfig {
                contact,
                slot,
                message,
            },
        ),
        Commands::Init { .. } => Ok(()),
    }
}

fn load_configuration(cli: &Cli) -> Result<TypequizConfig> {
    match &cli.config {
        Some(path) => Ok(load_config_from_path(path)?),
        None => Ok(load_config()),
    }
}
