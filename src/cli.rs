use crate::io::OutputFormat;
use crate::leads::CompanySize;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "typequiz")]
#[command(about = "Management style quiz: scoring, classification and lead capture", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to the nearest .typequiz.toml)
    #[arg(long, global = true, env = "TYPEQUIZ_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the questionnaire
    Questions {
        /// Questionnaire file (overrides the configured one)
        #[arg(long)]
        questionnaire: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Score a set of answers and classify them
    Score {
        /// JSON file with an array of {"questionId", "selectedLabels"} objects ("-" for stdin)
        #[arg(short, long)]
        answers: PathBuf,

        /// Questionnaire file (overrides the configured one)
        #[arg(long)]
        questionnaire: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Result id (defaults to a digest of the answers)
        #[arg(long)]
        result_id: Option<String>,

        /// Persist the result as final in the data directory
        #[arg(long)]
        finalize: bool,

        /// Show which rule or centroid decided the type
        #[arg(long)]
        trace: bool,
    },

    /// Check a questionnaire file for problems
    Validate {
        /// Questionnaire file (overrides the configured one)
        #[arg(long)]
        questionnaire: Option<PathBuf>,
    },

    /// Request the detailed report for a finalized result
    Report {
        #[command(flatten)]
        contact: ContactArgs,
    },

    /// Book a consultation for a finalized result
    Book {
        #[command(flatten)]
        contact: ContactArgs,

        /// Preferred time slot, e.g. "Tue 14:00-15:00"
        #[arg(long)]
        slot: String,

        /// Message for the consultant
        #[arg(long)]
        message: Option<String>,
    },

    /// Initialize a configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ContactArgs {
    /// Id of a finalized result
    #[arg(long)]
    pub result_id: String,

    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub company: Option<String>,

    /// One of 1-9, 10-49, 50-299, 300-999, 1000+, unknown
    #[arg(long, default_value = "unknown")]
    pub company_size: CompanySize,
}
