//! Core data types shared across ingest, classification, and rendering.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Schema version written into exported data files.
pub const DATA_SCHEMA_VERSION: &str = "3.0";

/// Language label used when the platform reports none.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Default minimum score a category must strictly exceed to be selected.
pub const DEFAULT_MIN_SCORE: u32 = 4;

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A starred repository as consumed by the classifier.
///
/// Only `name`, `description`, `topics`, and `language` feed classification;
/// everything else is carried through to the export untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stars: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub forks: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topics: Vec<String>,
}

impl RepositoryRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_stars(mut self, stars: u64) -> Self {
        self.stars = stars;
        self
    }

    /// Stable identity used for memoisation and graph node ids.
    pub fn identity(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.name)
    }

    pub fn language_label(&self) -> &str {
        match self.language.as_deref() {
            Some(lang) if !lang.trim().is_empty() => lang,
            _ => UNKNOWN_LANGUAGE,
        }
    }
}

/// Owner as reported by the platform API (`{"login": "..."}`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiOwner {
    #[serde(default)]
    pub login: String,
}

/// Repository object in the platform API's own field naming.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiRepository {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub owner: Option<ApiOwner>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stargazers_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub forks_count: u64,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topics: Vec<String>,
}

impl From<ApiRepository> for RepositoryRecord {
    fn from(api: ApiRepository) -> Self {
        Self {
            id: api.id,
            name: api.name,
            owner: api.owner.map(|o| o.login).filter(|login| !login.is_empty()),
            full_name: api.full_name,
            description: api.description,
            url: api.html_url,
            language: Some(api.language.unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string())),
            stars: api.stargazers_count,
            forks: api.forks_count,
            updated_at: api.updated_at,
            topics: api.topics,
        }
    }
}

/// A record with its selected category attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRepository {
    #[serde(flatten)]
    pub record: RepositoryRecord,
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataMetadata {
    #[serde(default)]
    pub fetched_at: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub min_score: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupStats {
    pub total_repositories: usize,
    pub corrupted_found: usize,
    pub descriptions_fixed: usize,
    pub cleanup_date: String,
}

/// Persisted/exported form consumed by the rendering layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFile {
    pub repositories: Vec<ClassifiedRepository>,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub total_count: usize,
    #[serde(default)]
    pub category_stats: BTreeMap<String, usize>,
    #[serde(default)]
    pub language_stats: BTreeMap<String, usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DataMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_cleaned: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleanup_stats: Option<CleanupStats>,
}

/// Runtime configuration (file < env < CLI).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub min_score: u32,
    pub rules: Option<PathBuf>,
    pub username: Option<String>,
    pub parallel: bool,
    pub label_min_stars: u64,
    pub link_seed_limit: usize,
    pub link_fanout: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            rules: None,
            username: None,
            parallel: true,
            label_min_stars: 30_000,
            link_seed_limit: 20,
            link_fanout: 3,
        }
    }
}
