//! Category rule table
//!
//! The table is pure data: tiered keywords per category, language boosts,
//! and compound adjustments. It is parsed once, validated, and compiled into
//! boundary-anchored keyword matchers. Category order doubles as the
//! tie-break priority used by the selector.

use crate::classify::matcher::KeywordMatcher;
use crate::error::{ClassifyError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Embedded default table.
pub const DEFAULT_RULES_TOML: &str = include_str!("rules.toml");

/// Fallback node color for categories without one.
pub const DEFAULT_COLOR: &str = "#6366F1";

pub static DEFAULT_RULE_TABLE: Lazy<Arc<RuleTable>> = Lazy::new(|| {
    Arc::new(RuleTable::from_toml_str(DEFAULT_RULES_TOML).expect("embedded rule table is valid"))
});

/// Keyword confidence tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Strong,
    Medium,
    Weak,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Strong, Tier::Medium, Tier::Weak];

    pub fn weight(self) -> u32 {
        match self {
            Tier::Strong => 10,
            Tier::Medium => 5,
            Tier::Weak => 2,
        }
    }

    /// Extra points when the keyword also appears in a curated topic.
    pub fn topic_bonus(self) -> u32 {
        match self {
            Tier::Strong => 5,
            Tier::Medium => 3,
            Tier::Weak => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Strong => "strong",
            Tier::Medium => "medium",
            Tier::Weak => "weak",
        }
    }
}

/// Signed score change applied to one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDelta {
    pub category: String,
    pub delta: i32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleTableSpec {
    catch_all: String,
    #[serde(default, rename = "category")]
    categories: Vec<CategorySpec>,
    #[serde(default, rename = "language_boost")]
    language_boosts: Vec<LanguageBoostSpec>,
    #[serde(default, rename = "adjustment")]
    adjustments: Vec<AdjustmentSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CategorySpec {
    name: String,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    strong: Vec<String>,
    #[serde(default)]
    medium: Vec<String>,
    #[serde(default)]
    weak: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LanguageBoostSpec {
    language: String,
    boosts: Vec<ScoreDelta>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AdjustmentSpec {
    name: String,
    all_of: Vec<Vec<String>>,
    effects: Vec<ScoreDelta>,
}

#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub name: String,
    pub color: String,
    strong: Vec<KeywordMatcher>,
    medium: Vec<KeywordMatcher>,
    weak: Vec<KeywordMatcher>,
}

impl CategoryRule {
    pub fn keywords(&self, tier: Tier) -> &[KeywordMatcher] {
        match tier {
            Tier::Strong => &self.strong,
            Tier::Medium => &self.medium,
            Tier::Weak => &self.weak,
        }
    }

    pub fn has_keywords(&self) -> bool {
        Tier::ALL.iter().any(|tier| !self.keywords(*tier).is_empty())
    }
}

/// Compound rule: fires when every group has at least one substring present.
#[derive(Debug, Clone)]
pub struct Adjustment {
    pub name: String,
    all_of: Vec<Vec<String>>,
    pub effects: Vec<ScoreDelta>,
}

impl Adjustment {
    pub fn applies(&self, all_text: &str) -> bool {
        self.all_of.iter().all(|group| group.iter().any(|needle| all_text.contains(needle.as_str())))
    }
}

/// Validated, compiled rule table. Immutable once built.
#[derive(Debug, Clone)]
pub struct RuleTable {
    catch_all: String,
    categories: Vec<CategoryRule>,
    language_boosts: HashMap<String, Vec<ScoreDelta>>,
    adjustments: Vec<Adjustment>,
}

impl RuleTable {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let spec: RuleTableSpec = toml::from_str(content)?;
        Self::compile(spec)
    }

    fn compile(spec: RuleTableSpec) -> Result<Self> {
        if spec.categories.is_empty() {
            return Err(ClassifyError::InvalidRuleTable("no categories defined".into()));
        }

        let mut seen = HashSet::new();
        let mut categories = Vec::with_capacity(spec.categories.len());
        for cat in spec.categories {
            let name = cat.name.trim().to_string();
            if name.is_empty() {
                return Err(ClassifyError::InvalidRuleTable("category with empty name".into()));
            }
            if !seen.insert(name.clone()) {
                return Err(ClassifyError::InvalidRuleTable(format!(
                    "duplicate category '{name}'"
                )));
            }
            categories.push(CategoryRule {
                color: cat.color.unwrap_or_else(|| DEFAULT_COLOR.to_string()),
                strong: compile_tier(&cat.strong)?,
                medium: compile_tier(&cat.medium)?,
                weak: compile_tier(&cat.weak)?,
                name,
            });
        }

        let catch_all = spec.catch_all.trim().to_string();
        match categories.iter().find(|c| c.name == catch_all) {
            None => {
                return Err(ClassifyError::InvalidRuleTable(format!(
                    "catch-all category '{catch_all}' is not defined"
                )))
            }
            Some(rule) if rule.has_keywords() => {
                return Err(ClassifyError::InvalidRuleTable(format!(
                    "catch-all category '{catch_all}' must not carry keywords"
                )))
            }
            Some(_) => {}
        }

        let check_target = |delta: &ScoreDelta, referenced_by: String| -> Result<()> {
            if delta.category == catch_all || !seen.contains(&delta.category) {
                return Err(ClassifyError::UnknownCategory {
                    category: delta.category.clone(),
                    referenced_by,
                });
            }
            Ok(())
        };

        let mut language_boosts: HashMap<String, Vec<ScoreDelta>> = HashMap::new();
        for boost in spec.language_boosts {
            let language = boost.language.trim().to_lowercase();
            for delta in &boost.boosts {
                check_target(delta, format!("language boost '{language}'"))?;
            }
            language_boosts.entry(language).or_default().extend(boost.boosts);
        }

        let mut adjustments = Vec::with_capacity(spec.adjustments.len());
        for adj in spec.adjustments {
            if adj.all_of.is_empty() || adj.all_of.iter().any(|group| group.is_empty()) {
                return Err(ClassifyError::InvalidRuleTable(format!(
                    "adjustment '{}' has an empty condition group",
                    adj.name
                )));
            }
            for delta in &adj.effects {
                check_target(delta, format!("adjustment '{}'", adj.name))?;
            }
            adjustments.push(Adjustment {
                all_of: adj
                    .all_of
                    .into_iter()
                    .map(|group| group.into_iter().map(|s| s.trim().to_lowercase()).collect())
                    .collect(),
                name: adj.name,
                effects: adj.effects,
            });
        }

        Ok(Self { catch_all, categories, language_boosts, adjustments })
    }

    pub fn catch_all(&self) -> &str {
        &self.catch_all
    }

    /// All categories in priority order, catch-all included.
    pub fn categories(&self) -> &[CategoryRule] {
        &self.categories
    }

    /// Categories eligible for keyword scoring (everything but the catch-all).
    pub fn scored_categories(&self) -> impl Iterator<Item = &CategoryRule> {
        self.categories.iter().filter(move |c| c.name != self.catch_all)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c.name == category)
    }

    pub fn color_of(&self, category: &str) -> &str {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.color.as_str())
            .unwrap_or(DEFAULT_COLOR)
    }

    /// Boosts for an already-lowercased language name.
    pub fn language_boosts(&self, language: &str) -> &[ScoreDelta] {
        self.language_boosts.get(language).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn adjustments(&self) -> &[Adjustment] {
        &self.adjustments
    }
}

fn compile_tier(keywords: &[String]) -> Result<Vec<KeywordMatcher>> {
    keywords.iter().map(|kw| KeywordMatcher::new(kw)).collect()
}
