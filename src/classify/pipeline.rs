//! Per-record classification pipeline: normalize -> score -> select.
//!
//! Records are independent, so batches can fan out across rayon workers with
//! no coordination; output order always matches input order.

use crate::classify::normalize::normalize;
use crate::classify::rules::{RuleTable, DEFAULT_RULE_TABLE};
use crate::classify::scorer::{score, score_breakdown, ScoreBreakdown};
use crate::classify::selector::select_category;
use crate::domain::{ClassifiedRepository, RepositoryRecord, DEFAULT_MIN_SCORE};
use crate::utils::record_fingerprint;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Arc<RuleTable>,
    min_score: u32,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(Arc::clone(&DEFAULT_RULE_TABLE))
    }
}

/// Score breakdown plus the selected label for one record.
#[derive(Debug, Clone, Serialize)]
pub struct Explanation {
    pub name: String,
    pub category: String,
    pub min_score: u32,
    #[serde(flatten)]
    pub breakdown: ScoreBreakdown,
}

impl Classifier {
    pub fn new(rules: Arc<RuleTable>) -> Self {
        Self { rules, min_score: DEFAULT_MIN_SCORE }
    }

    pub fn min_score(mut self, min_score: u32) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn classify(&self, record: &RepositoryRecord) -> String {
        let scores = score(&normalize(record), &self.rules);
        select_category(&scores, self.min_score, self.rules.catch_all()).to_string()
    }

    pub fn explain(&self, record: &RepositoryRecord) -> Explanation {
        let breakdown = score_breakdown(&normalize(record), &self.rules);
        let category =
            select_category(&breakdown.scores, self.min_score, self.rules.catch_all()).to_string();
        Explanation { name: record.name.clone(), category, min_score: self.min_score, breakdown }
    }

    pub fn classify_record(&self, record: RepositoryRecord) -> ClassifiedRepository {
        let category = self.classify(&record);
        tracing::debug!(repo = %record.name, category = %category, "classified");
        ClassifiedRepository { record, category }
    }

    /// Classify a whole batch, in parallel when `parallel` is set.
    pub fn classify_all(
        &self,
        records: Vec<RepositoryRecord>,
        parallel: bool,
    ) -> Vec<ClassifiedRepository> {
        if parallel {
            records.into_par_iter().map(|r| self.classify_record(r)).collect()
        } else {
            records.into_iter().map(|r| self.classify_record(r)).collect()
        }
    }

    /// Classify, reusing the cached label when the record's classifier
    /// inputs are unchanged since it was last seen.
    pub fn classify_cached(
        &self,
        record: RepositoryRecord,
        cache: &mut ClassificationCache,
    ) -> ClassifiedRepository {
        let fingerprint = record_fingerprint(&record);
        if let Some(category) = cache.lookup(record.identity(), &fingerprint) {
            return ClassifiedRepository { record, category };
        }
        let classified = self.classify_record(record);
        cache.store(classified.record.identity(), fingerprint, &classified.category);
        classified
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    fingerprint: String,
    category: String,
}

/// Memoised labels keyed by repository identity.
///
/// Entries are only valid for the classifier (rule table and threshold)
/// that produced them; call [`ClassificationCache::clear`] when those change.
#[derive(Debug, Default, Clone)]
pub struct ClassificationCache {
    entries: HashMap<String, CacheEntry>,
    hits: usize,
    misses: usize,
}

impl ClassificationCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lookup(&mut self, identity: &str, fingerprint: &str) -> Option<String> {
        match self.entries.get(identity) {
            Some(entry) if entry.fingerprint == fingerprint => {
                self.hits += 1;
                Some(entry.category.clone())
            }
            _ => {
                self.misses += 1;
                None
            }
        }
    }

    fn store(&mut self, identity: &str, fingerprint: String, category: &str) {
        self.entries.insert(
            identity.to_string(),
            CacheEntry { fingerprint, category: category.to_string() },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(record: RepositoryRecord) -> String {
        Classifier::default().classify(&record)
    }

    #[test]
    fn test_no_signal_is_catch_all() {
        assert_eq!(classify(RepositoryRecord::new("zzqx")), "other");
        assert_eq!(classify(RepositoryRecord::new("zzqx").with_language("Unknown")), "other");
    }

    #[test]
    fn test_strong_description_keyword_selects_category() {
        let record = RepositoryRecord::new("zzqx").with_description("Terraform modules");
        assert_eq!(classify(record), "devops");
    }

    #[test]
    fn test_word_boundary_gopher() {
        assert_eq!(classify(RepositoryRecord::new("gopher")), "other");
    }

    #[test]
    fn test_idempotent() {
        let classifier = Classifier::default();
        let record = RepositoryRecord::new("flutter-gallery").with_topics(["dart"]);
        assert_eq!(classifier.classify(&record), classifier.classify(&record));
        assert_eq!(classifier.classify(&record), "mobile");
    }

    #[test]
    fn test_threshold_boundary_resolves_to_catch_all() {
        // example (2) + demo (2) == threshold
        let record = RepositoryRecord::new("zzqx").with_description("demo example");
        let explanation = Classifier::default().explain(&record);
        assert_eq!(explanation.breakdown.scores.get("learning"), DEFAULT_MIN_SCORE);
        assert_eq!(explanation.category, "other");
    }

    #[test]
    fn test_awesome_system_design_scenario() {
        let record = RepositoryRecord::new("awesome-system-design")
            .with_description("A curated list of system design resources")
            .with_topics(["awesome", "list", "system-design"]);
        let explanation = Classifier::default().explain(&record);
        let scores = &explanation.breakdown.scores;
        // curated list (10) + awesome list (10) + awesome (5+3) + resources (2) + awesome-list (12)
        assert_eq!(scores.get("learning"), 42);
        // system design (10) + system-design (10+5)
        assert_eq!(scores.get("system-design"), 25);
        assert_eq!(explanation.category, "learning");
        assert!(scores.margin() > 0);
    }

    #[test]
    fn test_kubernetes_demo_scenario() {
        let record = RepositoryRecord::new("k8s-demo")
            .with_description("kubernetes example app")
            .with_language("Go");
        assert_eq!(classify(record), "devops");
    }

    #[test]
    fn test_language_only_scenario() {
        let record = RepositoryRecord::new("foo").with_description("").with_language("Python");
        assert_eq!(classify(record), "python");
    }

    #[test]
    fn test_tie_breaks_by_table_order() {
        let record = RepositoryRecord::new("zzqx").with_description("docker flutter");
        let explanation = Classifier::default().explain(&record);
        assert_eq!(explanation.breakdown.scores.get("devops"), 10);
        assert_eq!(explanation.breakdown.scores.get("mobile"), 10);
        assert_eq!(explanation.category, "devops");
    }

    #[test]
    fn test_custom_threshold() {
        let record = RepositoryRecord::new("zzqx").with_description("demo example");
        let classifier = Classifier::default().min_score(3);
        assert_eq!(classifier.classify(&record), "learning");
    }

    #[test]
    fn test_classify_all_preserves_order() {
        let records = vec![
            RepositoryRecord::new("pytorch-lightning"),
            RepositoryRecord::new("zzqx"),
            RepositoryRecord::new("helm-charts"),
        ];
        let classifier = Classifier::default();
        let sequential = classifier.classify_all(records.clone(), false);
        let parallel = classifier.classify_all(records, true);
        assert_eq!(sequential, parallel);
        let labels: Vec<&str> = parallel.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(labels, vec!["ai-ml", "other", "devops"]);
    }

    #[test]
    fn test_cache_reuses_unchanged_records() {
        let classifier = Classifier::default();
        let mut cache = ClassificationCache::new();
        let record = RepositoryRecord::new("zzqx").with_description("graphql server");

        let first = classifier.classify_cached(record.clone(), &mut cache);
        let second = classifier.classify_cached(record.clone().with_stars(10), &mut cache);
        assert_eq!(first.category, second.category);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 1);

        let changed = record.with_description("docker compose stack");
        let third = classifier.classify_cached(changed, &mut cache);
        assert_eq!(third.category, "devops");
        assert_eq!(cache.misses(), 2);
        assert_eq!(cache.len(), 1);
    }
}
