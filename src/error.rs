//! Typed errors for the classification library.
//!
//! The CLI wraps these in `anyhow` with file context; library callers can
//! match on the variants directly.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifyError {
    /// A record slot held something other than a repository object.
    #[error("invalid repository record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("malformed JSON input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported input shape: {0}")]
    InvalidInput(String),

    #[error("failed to parse rule table: {0}")]
    RuleTableParse(#[from] toml::de::Error),

    #[error("invalid rule table: {0}")]
    InvalidRuleTable(String),

    #[error("unknown category '{category}' referenced by {referenced_by}")]
    UnknownCategory { category: String, referenced_by: String },

    #[error("invalid keyword pattern '{keyword}': {source}")]
    KeywordPattern {
        keyword: String,
        #[source]
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, ClassifyError>;
