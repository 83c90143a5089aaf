use std::fs;
use std::path::{Path, PathBuf};

use super::core::TypequizConfig;
use crate::core::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".typequiz.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse config from a TOML string and check the values that cannot be
/// expressed in the types.
pub fn parse_and_validate_config(contents: &str) -> Result<TypequizConfig> {
    let config = toml::from_str::<TypequizConfig>(contents)
        .map_err(|e| Error::Configuration(format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e)))?;

    let problems = validate_config(&config);
    if problems.is_empty() {
        Ok(config)
    } else {
        Err(Error::Configuration(problems.join("; ")))
    }
}

/// Collect every problem instead of stopping at the first one.
pub fn validate_config(config: &TypequizConfig) -> Vec<String> {
    let mut problems = Vec::new();

    if !config.email.from.contains('@') {
        problems.push(format!(
            "email.from '{}' is not an email address",
            config.email.from
        ));
    }
    for (key, url) in [
        ("email.report_url_base", &config.email.report_url_base),
        ("email.booking_url", &config.email.booking_url),
    ] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            problems.push(format!("{} '{}' must be an http(s) URL", key, url));
        }
    }
    if let Some(format) = &config.output.default_format {
        if !matches!(format.as_str(), "terminal" | "json") {
            problems.push(format!(
                "output.default_format '{}' must be 'terminal' or 'json'",
                format
            ));
        }
    }
    if config.storage.data_dir.as_os_str().is_empty() {
        problems.push("storage.data_dir is empty".to_string());
    }

    problems
}

/// Load an explicitly requested config file. Unlike discovery, a missing or
/// invalid file is an error here.
pub fn load_config_from_path(path: &Path) -> Result<TypequizConfig> {
    let contents = fs::read_to_string(path).map_err(|e| Error::io_at(e, path))?;
    let config = parse_and_validate_config(&contents)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try one candidate location during discovery.
fn try_load_config_from_path(config_path: &Path) -> Option<TypequizConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            // Only log actual errors, not "file not found"
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    "Failed to read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            tracing::warn!("{} ({}). Using defaults.", e, config_path.display());
            None
        }
    }
}

/// Directories from `start` upwards, at most `max_depth` of them.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Discover `.typequiz.toml` starting at `start`.
pub fn load_config_from(start: PathBuf) -> TypequizConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            tracing::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            TypequizConfig::default()
        })
}

/// Discover `.typequiz.toml` from the working directory upwards.
pub fn load_config() -> TypequizConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            tracing::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            TypequizConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(
            parse_and_validate_config("").unwrap(),
            TypequizConfig::default()
        );
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = parse_and_validate_config(indoc! {r#"
            [email]
            from = "quiz@acme.test"

            [output]
            default_format = "json"
        "#})
        .unwrap();
        assert_eq!(config.email.from, "quiz@acme.test");
        assert_eq!(
            config.email.booking_url,
            TypequizConfig::default().email.booking_url
        );
        assert_eq!(config.output.default_format.as_deref(), Some("json"));
    }

    #[test]
    fn test_validation_reports_all_problems() {
        let err = parse_and_validate_config(indoc! {r#"
            [email]
            from = "nobody"
            booking_url = "ftp://example.com"

            [output]
            default_format = "yaml"
        "#})
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("email.from"));
        assert!(message.contains("email.booking_url"));
        assert!(message.contains("output.default_format"));
    }

    #[test]
    fn test_directory_ancestors_is_bounded() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c/d"), 3).collect();
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/a/b/c/d"),
                PathBuf::from("/a/b/c"),
                PathBuf::from("/a/b"),
            ]
        );
    }

    #[test]
    fn test_discovery_finds_parent_config() {
        let root = TempDir::new().unwrap();
        fs::write(
            root.path().join(CONFIG_FILE_NAME),
            "[storage]\ndata_dir = \"/srv/quiz\"\n",
        )
        .unwrap();
        let nested = root.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();

        let config = load_config_from(nested);
        assert_eq!(config.storage.data_dir, PathBuf::from("/srv/quiz"));
    }

    #[test]
    fn test_invalid_config_candidates_are_skipped() {
        let root = TempDir::new().unwrap();
        let bad = root.path().join(CONFIG_FILE_NAME);
        fs::write(&bad, "[storage\n").unwrap();
        assert_eq!(try_load_config_from_path(&bad), None);

        let nested = root.path().join("child");
        fs::create_dir(&nested).unwrap();
        fs::write(
            nested.join(CONFIG_FILE_NAME),
            "[email]\nfrom = \"nobody\"\n",
        )
        .unwrap();
        assert_eq!(try_load_config_from_path(&nested.join(CONFIG_FILE_NAME)), None);
    }

    #[test]
    fn test_explicit_missing_path_is_an_error() {
        let root = TempDir::new().unwrap();
        assert!(load_config_from_path(&root.path().join("missing.toml")).is_err());
    }
}
