//! Text normalization for classifier input.

use crate::domain::RepositoryRecord;

/// Lowercased, searchable view of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    /// `name description topics...`, lowercased.
    pub all_text: String,
    /// Primary language, lowercased; empty when absent.
    pub language: String,
    /// Topics individually lowercased, used for the topic bonus lookup.
    pub topics: Vec<String>,
}

impl NormalizedText {
    pub fn topic_contains(&self, keyword: &str) -> bool {
        self.topics.iter().any(|topic| topic.contains(keyword))
    }
}

pub fn normalize(record: &RepositoryRecord) -> NormalizedText {
    let description = record.description.as_deref().unwrap_or("");
    let all_text =
        format!("{} {} {}", record.name, description, record.topics.join(" ")).to_lowercase();
    let language = record.language.as_deref().unwrap_or("").trim().to_lowercase();
    let topics = record.topics.iter().map(|t| t.to_lowercase()).collect();

    NormalizedText { all_text, language, topics }
}
