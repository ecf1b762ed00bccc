use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum LineaError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("malformed input on page {page}: {reason}")]
    MalformedInput { page: usize, reason: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("word extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("failed to load word set from {path}: {reason}")]
    WordSetLoad { path: PathBuf, reason: String },

    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Classification of a failed clustering or analysis run, as reported in
/// the structured `RowsResult.error` envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidArgument,
    MalformedInput,
    InvalidInput,
    Other,
}

impl LineaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LineaError::InvalidArgument(_) | LineaError::ConfigInvalid(_) => {
                ErrorKind::InvalidArgument
            }
            LineaError::MalformedInput { .. } => ErrorKind::MalformedInput,
            LineaError::InvalidInput(_) => ErrorKind::InvalidInput,
            _ => ErrorKind::Other,
        }
    }
}
