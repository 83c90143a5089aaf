//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for typequiz operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Questionnaire definition failed to parse or validate
    #[error("Questionnaire error: {0}")]
    Questionnaire(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Result or lead store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Outbound mail delivery errors
    #[error("Mail error: {0}")]
    Mail(String),

    /// Lead form rejected before it reached the store
    #[error("Invalid lead: {0}")]
    InvalidLead(String),

    /// Referenced result does not exist or is not finalized yet
    #[error("Result not found: {0}")]
    ResultNotFound(String),

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a file system error wrapping the underlying I/O error
    pub fn io_at(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::FileSystem {
            message: format!("{} ({})", source, path.display()),
            path: Some(path),
            source: Some(source),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_context_prefixes_message() {
        let err = Error::Storage("disk full".into()).with_context("finalizing abc");
        assert_eq!(err.to_string(), "finalizing abc: Storage error: disk full");
    }

    #[test]
    fn test_result_ext_wraps_only_errors() {
        let ok: Result<u8> = Ok(1);
        assert_eq!(ok.context("unused").unwrap(), 1);
        let err: Result<u8> = Err(Error::Mail("refused".into()));
        assert_eq!(
            err.context("sending report").unwrap_err().to_string(),
            "sending report: Mail error: refused"
        );
    }

    #[test]
    fn test_io_at_keeps_path() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        match Error::io_at(io, "/tmp/x.json") {
            Error::FileSystem { path, source, .. } => {
                assert_eq!(path, Some(PathBuf::from("/tmp/x.json")));
                assert!(source.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
