mod core;
mod loader;

pub use self::core::{EmailConfig, OutputConfig, QuestionnaireConfig, StorageConfig, TypequizConfig};
pub use loader::{
    directory_ancestors, load_config, load_config_from, load_config_from_path,
    parse_and_validate_config, validate_config, CONFIG_FILE_NAME,
};

/// Contents written by `typequiz init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# typequiz configuration

[questionnaire]
# TOML questionnaire replacing the built-in one
# path = "questionnaire.toml"

[storage]
data_dir = ".typequiz/data"

[email]
from = "no-reply@example.com"
outbox_dir = ".typequiz/outbox"
report_url_base = "https://example.com/results"
booking_url = "https://example.com/consultation"

[output]
default_format = "terminal"
"#;
