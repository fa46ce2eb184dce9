//! Category selection from a score vector.

use crate::classify::scorer::ScoreVector;

/// Pick the highest-scoring category, or `catch_all` when the best score
/// does not strictly exceed `min_score`. Ties go to the category listed
/// first in the rule table.
pub fn select_category<'a>(scores: &'a ScoreVector, min_score: u32, catch_all: &'a str) -> &'a str {
    match scores.best() {
        Some((category, score)) if score > min_score => category,
        _ => catch_all,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::rules::DEFAULT_RULE_TABLE;
    use crate::domain::DEFAULT_MIN_SCORE;

    fn vector(points: &[(&str, u32)]) -> ScoreVector {
        let mut scores = ScoreVector::zeroed(&DEFAULT_RULE_TABLE);
        for (category, p) in points {
            scores.add(category, *p);
        }
        scores
    }

    #[test]
    fn test_all_zero_is_catch_all() {
        assert_eq!(select_category(&vector(&[]), DEFAULT_MIN_SCORE, "other"), "other");
    }

    #[test]
    fn test_score_at_threshold_is_catch_all() {
        let scores = vector(&[("learning", DEFAULT_MIN_SCORE)]);
        assert_eq!(select_category(&scores, DEFAULT_MIN_SCORE, "other"), "other");
    }

    #[test]
    fn test_score_above_threshold_wins() {
        let scores = vector(&[("learning", DEFAULT_MIN_SCORE + 1), ("tools", 2)]);
        assert_eq!(select_category(&scores, DEFAULT_MIN_SCORE, "other"), "learning");
    }

    #[test]
    fn test_tie_goes_to_table_order() {
        let scores = vector(&[("game-dev", 12), ("web-dev", 12)]);
        assert_eq!(select_category(&scores, DEFAULT_MIN_SCORE, "other"), "web-dev");
    }

    #[test]
    fn test_threshold_is_tunable() {
        let scores = vector(&[("api", 5)]);
        assert_eq!(select_category(&scores, 4, "other"), "api");
        assert_eq!(select_category(&scores, 5, "other"), "other");
    }
}
