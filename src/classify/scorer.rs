//! Category scoring
//!
//! Three passes over a normalized record:
//! 1. tiered keyword hits, with a topic bonus for strong and medium tiers
//! 2. fixed language boosts
//! 3. compound adjustments, summed per category and applied once with a
//!    floor at zero so rule order cannot change the outcome

use crate::classify::normalize::NormalizedText;
use crate::classify::rules::{RuleTable, ScoreDelta, Tier};
use serde::Serialize;
use std::collections::HashMap;

/// Per-category integer scores in rule-table priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreVector {
    entries: Vec<(String, u32)>,
}

impl ScoreVector {
    /// Zero score for every scored category of `table`.
    pub fn zeroed(table: &RuleTable) -> Self {
        Self { entries: table.scored_categories().map(|c| (c.name.clone(), 0)).collect() }
    }

    pub fn get(&self, category: &str) -> u32 {
        self.entries.iter().find(|(name, _)| name == category).map(|(_, s)| *s).unwrap_or(0)
    }

    pub fn add(&mut self, category: &str, points: u32) {
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| name == category) {
            entry.1 = entry.1.saturating_add(points);
        }
    }

    /// Apply a signed change, never dropping below zero.
    pub fn apply_delta(&mut self, category: &str, delta: i64) {
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| name == category) {
            let updated = (i64::from(entry.1) + delta).clamp(0, i64::from(u32::MAX));
            entry.1 = updated as u32;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(name, score)| (name.as_str(), *score))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest score; the earliest category wins ties.
    pub fn best(&self) -> Option<(&str, u32)> {
        let mut best: Option<(&str, u32)> = None;
        for (name, score) in self.iter() {
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((name, score)),
            }
        }
        best
    }

    /// Categories by descending score, ties kept in priority order.
    pub fn ranked(&self) -> Vec<(&str, u32)> {
        let mut ranked: Vec<(&str, u32)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Gap between the top two scores.
    pub fn margin(&self) -> u32 {
        let ranked = self.ranked();
        match (ranked.first(), ranked.get(1)) {
            (Some(first), Some(second)) => first.1 - second.1,
            (Some(first), None) => first.1,
            _ => 0,
        }
    }
}

/// One keyword that contributed points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordHit {
    pub category: String,
    pub keyword: String,
    pub tier: Tier,
    pub points: u32,
    pub topic_bonus: bool,
}

/// Full accounting of how a score vector was produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub scores: ScoreVector,
    pub keyword_hits: Vec<KeywordHit>,
    pub language_boosts: Vec<ScoreDelta>,
    pub fired_adjustments: Vec<String>,
}

pub fn score(text: &NormalizedText, table: &RuleTable) -> ScoreVector {
    score_breakdown(text, table).scores
}

pub fn score_breakdown(text: &NormalizedText, table: &RuleTable) -> ScoreBreakdown {
    let mut scores = ScoreVector::zeroed(table);
    let mut keyword_hits = Vec::new();

    for category in table.scored_categories() {
        for tier in Tier::ALL {
            for matcher in category.keywords(tier) {
                if !matcher.is_match(&text.all_text) {
                    continue;
                }
                let bonus = tier.topic_bonus() > 0 && text.topic_contains(matcher.keyword());
                let points = tier.weight() + if bonus { tier.topic_bonus() } else { 0 };
                scores.add(&category.name, points);
                keyword_hits.push(KeywordHit {
                    category: category.name.clone(),
                    keyword: matcher.keyword().to_string(),
                    tier,
                    points,
                    topic_bonus: bonus,
                });
            }
        }
    }

    let language_boosts = if text.language.is_empty() {
        Vec::new()
    } else {
        table.language_boosts(&text.language).to_vec()
    };
    for boost in &language_boosts {
        scores.apply_delta(&boost.category, i64::from(boost.delta));
    }

    let mut pending: HashMap<&str, i64> = HashMap::new();
    let mut fired_adjustments = Vec::new();
    for adjustment in table.adjustments() {
        if !adjustment.applies(&text.all_text) {
            continue;
        }
        tracing::trace!(rule = %adjustment.name, "adjustment fired");
        fired_adjustments.push(adjustment.name.clone());
        for effect in &adjustment.effects {
            *pending.entry(effect.category.as_str()).or_insert(0) += i64::from(effect.delta);
        }
    }
    for (category, delta) in pending {
        scores.apply_delta(category, delta);
    }

    ScoreBreakdown { scores, keyword_hits, language_boosts, fired_adjustments }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::normalize::normalize;
    use crate::classify::rules::DEFAULT_RULE_TABLE;
    use crate::domain::RepositoryRecord;

    fn scores_for(record: &RepositoryRecord) -> ScoreVector {
        score(&normalize(record), &DEFAULT_RULE_TABLE)
    }

    #[test]
    fn test_vector_excludes_catch_all() {
        let scores = ScoreVector::zeroed(&DEFAULT_RULE_TABLE);
        assert_eq!(scores.len(), DEFAULT_RULE_TABLE.categories().len() - 1);
        assert!(scores.iter().all(|(name, _)| name != "other"));
    }

    #[test]
    fn test_apply_delta_floors_at_zero() {
        let mut scores = ScoreVector::zeroed(&DEFAULT_RULE_TABLE);
        scores.add("learning", 4);
        scores.apply_delta("learning", -6);
        assert_eq!(scores.get("learning"), 0);
        scores.apply_delta("learning", 3);
        assert_eq!(scores.get("learning"), 3);
    }

    #[test]
    fn test_best_prefers_earlier_category_on_tie() {
        let mut scores = ScoreVector::zeroed(&DEFAULT_RULE_TABLE);
        scores.add("mobile", 10);
        scores.add("devops", 10);
        assert_eq!(scores.best(), Some(("devops", 10)));
    }

    #[test]
    fn test_strong_keyword_in_description() {
        let record = RepositoryRecord::new("x").with_description("a graphql gateway");
        let scores = scores_for(&record);
        assert_eq!(scores.get("api"), 10);
    }

    #[test]
    fn test_topic_bonus_strong_tier() {
        let plain = RepositoryRecord::new("x").with_description("a graphql gateway");
        let tagged = plain.clone().with_topics(["graphql"]);
        assert_eq!(scores_for(&tagged).get("api") - scores_for(&plain).get("api"), 5);
    }

    #[test]
    fn test_topic_bonus_medium_tier() {
        let plain = RepositoryRecord::new("x").with_description("a webhook relay");
        let tagged = plain.clone().with_topics(["webhook"]);
        assert_eq!(scores_for(&plain).get("api"), 5);
        assert_eq!(scores_for(&tagged).get("api") - scores_for(&plain).get("api"), 3);
    }

    #[test]
    fn test_weak_tier_gets_no_topic_bonus() {
        let plain = RepositoryRecord::new("x").with_description("an http helper");
        let tagged = plain.clone().with_topics(["http"]);
        assert_eq!(scores_for(&plain).get("api"), 2);
        assert_eq!(scores_for(&tagged).get("api"), 2);
    }

    #[test]
    fn test_no_substring_false_positive() {
        let scores = scores_for(&RepositoryRecord::new("gopher"));
        assert_eq!(scores.get("cloud"), 0);
        assert!(scores.iter().all(|(_, s)| s == 0));
    }

    #[test]
    fn test_language_boost_without_keywords() {
        let scores = scores_for(&RepositoryRecord::new("foo").with_language("Python"));
        assert_eq!(scores.get("python"), 8);
    }

    #[test]
    fn test_unknown_language_has_no_boost() {
        let scores = scores_for(&RepositoryRecord::new("foo").with_language("Unknown"));
        assert!(scores.iter().all(|(_, s)| s == 0));
    }

    #[test]
    fn test_kubernetes_example_adjustment() {
        let record = RepositoryRecord::new("k8s-demo")
            .with_description("kubernetes example app")
            .with_language("Go");
        let breakdown = score_breakdown(&normalize(&record), &DEFAULT_RULE_TABLE);
        assert_eq!(breakdown.fired_adjustments, vec!["kubernetes-example".to_string()]);
        // k8s + kubernetes (20) + adjustment (8)
        assert_eq!(breakdown.scores.get("devops"), 28);
        // example + demo (4) - 6, floored
        assert_eq!(breakdown.scores.get("learning"), 0);
        assert_eq!(breakdown.scores.get("cloud"), 2);
        assert_eq!(breakdown.scores.get("mobile"), 2);
    }

    #[test]
    fn test_crypto_security_adjustment() {
        let record =
            RepositoryRecord::new("x").with_description("crypto library for encryption and hashing");
        let scores = scores_for(&record);
        // crypto (5) minus the adjustment (6), floored
        assert_eq!(scores.get("blockchain"), 0);
        // encryption (10) + crypto weak (2) + adjustment (6)
        assert_eq!(scores.get("security"), 18);
    }

    #[test]
    fn test_breakdown_records_hits() {
        let record = RepositoryRecord::new("x").with_description("graphql").with_topics(["graphql"]);
        let breakdown = score_breakdown(&normalize(&record), &DEFAULT_RULE_TABLE);
        let hit = breakdown
            .keyword_hits
            .iter()
            .find(|h| h.keyword == "graphql")
            .expect("graphql hit");
        assert_eq!(hit.category, "api");
        assert_eq!(hit.tier, Tier::Strong);
        assert_eq!(hit.points, 15);
        assert!(hit.topic_bonus);
    }

    #[test]
    fn test_margin() {
        let mut scores = ScoreVector::zeroed(&DEFAULT_RULE_TABLE);
        scores.add("api", 15);
        scores.add("tools", 4);
        assert_eq!(scores.margin(), 11);
    }
}
