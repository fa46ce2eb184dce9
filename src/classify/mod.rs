//! Heuristic repository classification
//!
//! A record flows one way through the engine:
//! normalize ([`normalize`]) -> score every category ([`scorer`]) ->
//! pick one label ([`selector`]). [`Classifier`] wires the stages together
//! over an immutable [`RuleTable`].

pub mod matcher;
pub mod normalize;
pub mod pipeline;
pub mod rules;
pub mod scorer;
pub mod selector;

pub use matcher::{keyword_matches, KeywordMatcher};
pub use normalize::{normalize, NormalizedText};
pub use pipeline::{ClassificationCache, Classifier, Explanation};
pub use rules::{RuleTable, ScoreDelta, Tier, DEFAULT_RULE_TABLE};
pub use scorer::{score, score_breakdown, ScoreBreakdown, ScoreVector};
pub use selector::select_category;
