//! Description cleanup for previously exported data files

pub mod corrections;

use crate::domain::{CleanupStats, DataFile};
use chrono::{DateTime, SecondsFormat, Utc};
use corrections::{COMMON_R_WORDS, CORRECTIONS, CORRUPTION_PATTERNS, KNOWN_FRAGMENTS, WHITESPACE_RUN};

/// One description that was rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedDescription {
    pub index: usize,
    pub repository: String,
    pub before: String,
    pub after: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanupReport {
    pub stats: CleanupStats,
    pub changes: Vec<CleanedDescription>,
}

pub fn detect_corruption(description: &str) -> bool {
    if description.is_empty() {
        return false;
    }
    CORRUPTION_PATTERNS.iter().any(|re| re.is_match(description))
        || KNOWN_FRAGMENTS.iter().any(|re| re.is_match(description))
}

pub fn clean_description(description: &str) -> String {
    let mut cleaned = description.to_string();

    for correction in CORRECTIONS.iter() {
        cleaned = correction.pattern.replace_all(&cleaned, correction.replacement).into_owned();
    }

    cleaned = restore_dropped_r(&cleaned);

    WHITESPACE_RUN.replace_all(&cleaned, " ").trim().to_string()
}

/// Rejoin adjacent word tokens around a missing `r` when the result is a
/// known common word ("eve y" -> "every").
fn restore_dropped_r(text: &str) -> String {
    let tokens: Vec<&str> = text.split(' ').collect();
    let mut out: Vec<String> = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        if let Some(next) = tokens.get(i + 1) {
            if is_word(tokens[i]) && is_word(next) {
                let joined = format!("{}r{}", tokens[i], next);
                if COMMON_R_WORDS.contains(&joined.to_lowercase().as_str()) {
                    out.push(joined);
                    i += 2;
                    continue;
                }
            }
        }
        out.push(tokens[i].to_string());
        i += 1;
    }
    out.join(" ")
}

fn is_word(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// Clean every corrupted description in `data` and stamp cleanup metadata.
pub fn clean_dataset(data: &mut DataFile, now: DateTime<Utc>) -> CleanupReport {
    let mut corrupted_found = 0;
    let mut changes = Vec::new();

    for (index, repo) in data.repositories.iter_mut().enumerate() {
        let Some(original) = repo.record.description.as_deref() else {
            continue;
        };
        if !detect_corruption(original) {
            continue;
        }
        corrupted_found += 1;
        let cleaned = clean_description(original);
        if cleaned != original {
            tracing::debug!(repo = %repo.record.identity(), "cleaned description");
            changes.push(CleanedDescription {
                index,
                repository: repo.record.identity().to_string(),
                before: original.to_string(),
                after: cleaned.clone(),
            });
            repo.record.description = Some(cleaned);
        }
    }

    let stamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let stats = CleanupStats {
        total_repositories: data.repositories.len(),
        corrupted_found,
        descriptions_fixed: changes.len(),
        cleanup_date: stamp.clone(),
    };
    data.last_cleaned = Some(stamp);
    data.cleanup_stats = Some(stats.clone());

    CleanupReport { stats, changes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClassifiedRepository, RepositoryRecord};

    #[test]
    fn test_detects_spaced_letters() {
        assert!(detect_corruption("f o r free"));
        assert!(detect_corruption("double  space"));
        assert!(detect_corruption("A Tuto ial"));
        assert!(!detect_corruption("A normal description."));
        assert!(!detect_corruption("Speed up what you need"));
        assert!(!detect_corruption(""));
    }

    #[test]
    fn test_clean_known_fragments() {
        assert_eq!(clean_description("Tuto ial fo  Begi  e s"), "Tutorial for Beginners");
        assert_eq!(clean_description("PyTo ch f om sc atch"), "PyTorch from scratch");
    }

    #[test]
    fn test_clean_split_words() {
        assert_eq!(clean_description("learn i n a day"), "learn in a day");
    }

    #[test]
    fn test_fragment_keeps_following_space() {
        assert_eq!(clean_description("fo the web"), "for the web");
        assert_eq!(clean_description("Tools fo  developers"), "Tools for developers");
    }

    #[test]
    fn test_restores_dropped_r() {
        assert_eq!(clean_description("eve y day"), "every day");
        assert_eq!(clean_description("data the web"), "data the web");
    }

    #[test]
    fn test_fragments_respect_word_boundaries() {
        assert_eq!(clean_description("a data tool"), "a data tool");
        assert_eq!(clean_description("information"), "information");
    }

    #[test]
    fn test_clean_dataset_counts_and_stamps() {
        let now = DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z").unwrap().with_timezone(&Utc);
        let mut data = DataFile {
            repositories: vec![
                ClassifiedRepository {
                    record: RepositoryRecord::new("a").with_description("Tuto ial"),
                    category: "learning".into(),
                },
                ClassifiedRepository {
                    record: RepositoryRecord::new("b").with_description("fine text"),
                    category: "other".into(),
                },
                ClassifiedRepository { record: RepositoryRecord::new("c"), category: "other".into() },
            ],
            ..DataFile::default()
        };

        let report = clean_dataset(&mut data, now);
        assert_eq!(report.stats.total_repositories, 3);
        assert_eq!(report.stats.corrupted_found, 1);
        assert_eq!(report.stats.descriptions_fixed, 1);
        assert_eq!(report.changes[0].after, "Tutorial");
        assert_eq!(data.repositories[0].record.description.as_deref(), Some("Tutorial"));
        assert_eq!(data.last_cleaned.as_deref(), Some("2024-05-01T12:00:00.000Z"));
        assert!(data.cleanup_stats.is_some());
    }
}
