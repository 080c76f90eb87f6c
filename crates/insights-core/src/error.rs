use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the label insights crates.
#[derive(Error, Debug)]
pub enum InsightsError {
    /// A required parameter is missing, empty, or has an unsupported value.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The issue source could not produce any issues.
    #[error("Issue data unavailable at {path}: {reason}")]
    DataUnavailable { path: PathBuf, reason: String },

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output file could not be created or written.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A timestamp string did not match any recognised format.
    #[error("Invalid timestamp format: {0}")]
    TimestampParse(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl InsightsError {
    /// Shorthand for a [`InsightsError::DataUnavailable`] built from any path-like value.
    pub fn data_unavailable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// `true` for errors that should abort a run before any data is loaded.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// Convenience alias used throughout the insights crates.
pub type Result<T> = std::result::Result<T, InsightsError>;
