//! Error types for the interview evaluator.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our custom error.
pub type Result<T> = std::result::Result<T, EvalError>;

/// Errors that can occur while evaluating an answer.
#[derive(Error, Debug)]
pub enum EvalError {
    /// Error reading or writing files.
    #[error("I/O error for path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid or incomplete configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP request error (transport-level, no status available).
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The generation API answered with a non-success status.
    #[error("Generation API returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The response envelope could not be decoded or was missing a segment.
    #[error("Malformed response envelope: {0}")]
    Envelope(String),

    /// The embedded evaluation payload could not be parsed.
    #[error("Failed to parse evaluation payload: {0}")]
    Payload(String),
}

impl EvalError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<reqwest::Error> for EvalError {
    fn from(err: reqwest::Error) -> Self {
        EvalError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for EvalError {
    fn from(err: serde_json::Error) -> Self {
        EvalError::Payload(err.to_string())
    }
}
