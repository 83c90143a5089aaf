use crate::email::EmailLinks;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for typequiz
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TypequizConfig {
    /// Questionnaire source
    pub questionnaire: QuestionnaireConfig,

    /// Result and lead storage
    pub storage: StorageConfig,

    /// Transactional email
    pub email: EmailConfig,

    /// Output configuration
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QuestionnaireConfig {
    /// TOML questionnaire replacing the built-in one
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".typequiz/data"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub from: String,
    /// Directory the outbox transport drops queued mail into
    pub outbox_dir: PathBuf,
    pub report_url_base: String,
    pub booking_url: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            from: "no-reply@example.com".to_string(),
            outbox_dir: PathBuf::from(".typequiz/outbox"),
            report_url_base: "https://example.com/results".to_string(),
            booking_url: "https://example.com/consultation".to_string(),
        }
    }
}

impl EmailConfig {
    pub fn links(&self) -> EmailLinks {
        EmailLinks {
            report_url_base: self.report_url_base.clone(),
            booking_url: self.booking_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    pub default_format: Option<String>,
    /// Enable colored output (default: auto-detect based on TTY)
    pub use_color: Option<bool>,
}
