//! Content pipeline errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, transforming or writing content
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Feed {path:?} is neither an object nor an array of entries")]
    UnexpectedFeed { path: PathBuf },

    #[error("Front-matter serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Missing field: {field}")]
    MissingField { field: String },

    #[error("Field `{field}` is not {expected}")]
    FieldType {
        field: String,
        expected: &'static str,
    },

    #[error("Invalid ISO-8601 date: {value:?}")]
    InvalidDate { value: String },
}

impl ContentError {
    /// Whether the error concerns a single entry's data rather than the run
    /// as a whole. Entry errors are subject to the configured skip/abort policy.
    pub fn is_entry_error(&self) -> bool {
        matches!(
            self,
            ContentError::MissingField { .. }
                | ContentError::FieldType { .. }
                | ContentError::InvalidDate { .. }
        )
    }
}

pub type Result<T, E = ContentError> = std::result::Result<T, E>;
