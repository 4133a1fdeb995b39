use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("invalid timestamp `{input}`: {reason}")]
    TimestampFormat { input: String, reason: String },
    #[error("cannot read file of type {suffix} ({}); expected .archon.json", .path.display())]
    InvalidFileSuffix { path: PathBuf, suffix: String },
    #[error("unknown entry type `{0}`")]
    UnknownEntryType(String),
    #[error("session document is malformed: {0}")]
    Document(#[from] serde_json::Error),
    #[error("input closed while waiting for a response")]
    InputClosed,
}

impl JournalError {
    pub fn timestamp(input: &str, reason: impl Into<String>) -> Self {
        Self::TimestampFormat {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::TimestampFormat { .. } => "E001_TIMESTAMP_FORMAT",
            Self::InvalidFileSuffix { .. } => "E002_INVALID_FILE_SUFFIX",
            Self::UnknownEntryType(_) => "E003_UNKNOWN_ENTRY_TYPE",
            Self::Document(_) => "E004_DOCUMENT",
            Self::InputClosed => "E005_INPUT_CLOSED",
        }
    }
}
