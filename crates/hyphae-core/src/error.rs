//! Error type shared across the crate.

use std::path::PathBuf;

/// Errors that abort a whole scan. Per-file failures never surface here.
#[derive(Debug, thiserror::Error)]
pub enum HyphaeError {
    #[error("malformed tree at '{path}': {reason}")]
    MalformedTree { path: String, reason: String },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid tree manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("invalid extraction pattern for {language}: {source}")]
    InvalidPattern {
        language: String,
        #[source]
        source: regex::Error,
    },

    #[error("scan cancelled")]
    Cancelled,
}

impl HyphaeError {
    pub(crate) fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedTree {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HyphaeError>;
