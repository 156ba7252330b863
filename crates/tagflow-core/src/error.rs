use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading, parsing, and reshaping a capture.
///
/// Line numbers are 1-based positions among the filtered lines, i.e. after
/// boilerplate has been removed.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("i/o error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: malformed record: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: expected a non-empty JSON array of records")]
    NotARecordArray { line: usize },

    #[error("line {line}: required field '{field}' is absent")]
    MissingField { line: usize, field: &'static str },

    #[error("tag id must be an integer: '{value}'")]
    InvalidTagId { value: String },

    #[error("timestamp {value} is outside the representable range")]
    Timestamp { value: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl CoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = CoreError> = std::result::Result<T, E>;
