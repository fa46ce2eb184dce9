//! Exported data file generation.

use crate::domain::{ClassifiedRepository, DataFile, DataMetadata, DATA_SCHEMA_VERSION};
use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub fn category_stats(repos: &[ClassifiedRepository]) -> BTreeMap<String, usize> {
    let mut stats = BTreeMap::new();
    for repo in repos {
        *stats.entry(repo.category.clone()).or_insert(0) += 1;
    }
    stats
}

pub fn language_stats(repos: &[ClassifiedRepository]) -> BTreeMap<String, usize> {
    let mut stats = BTreeMap::new();
    for repo in repos {
        *stats.entry(repo.record.language_label().to_string()).or_insert(0) += 1;
    }
    stats
}

pub fn build_data_file(
    repositories: Vec<ClassifiedRepository>,
    username: Option<&str>,
    min_score: u32,
    now: DateTime<Utc>,
) -> DataFile {
    let stamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    DataFile {
        category_stats: category_stats(&repositories),
        language_stats: language_stats(&repositories),
        total_count: repositories.len(),
        repositories,
        last_updated: stamp.clone(),
        metadata: Some(DataMetadata {
            fetched_at: Some(stamp),
            username: username.map(str::to_string),
            version: DATA_SCHEMA_VERSION.to_string(),
            min_score: Some(min_score),
        }),
        last_cleaned: None,
        cleanup_stats: None,
    }
}

pub fn render_data_file(data: &DataFile) -> Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

pub fn read_data_file(path: &Path) -> Result<DataFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed reading data file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid data file: {}", path.display()))
}

pub fn write_data_file(path: &Path, data: &DataFile) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, render_data_file(data)?)
        .with_context(|| format!("Failed writing data file: {}", path.display()))
}
