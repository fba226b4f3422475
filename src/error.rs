//! Error types for the gel crate

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the gel crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("malformed input {origin}: {reason}")]
    InputFormat { origin: String, reason: String },

    #[error("degenerate samples: {reason}")]
    DegenerateInput { reason: String },

    #[error("invalid parameter `{name}` = {value}: {constraint}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        constraint: &'static str,
    },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to render {}: {message}", path.display())]
    Render { path: PathBuf, message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_parameter(
        name: &'static str,
        value: impl ToString,
        constraint: &'static str,
    ) -> Self {
        Error::InvalidParameter {
            name,
            value: value.to_string(),
            constraint,
        }
    }

    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Error::DegenerateInput {
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
