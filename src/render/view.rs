//! Graph view model for the browser front-end.
//!
//! `render` is a pure function: classified repositories plus filters in, a
//! complete [`ViewState`] out. The front-end owns the force layout; this
//! module only decides which nodes exist, how big and what color they are,
//! and which pairs are linked.

use crate::classify::RuleTable;
use crate::domain::{ClassifiedRepository, Config};
use serde::Serialize;
use std::collections::BTreeMap;

const LABEL_MAX_CHARS: usize = 12;

/// Active filters; `None` means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    pub search: String,
    pub category: Option<String>,
    pub language: Option<String>,
    pub min_stars: Option<u64>,
}

impl Filters {
    pub fn matches(&self, repo: &ClassifiedRepository) -> bool {
        let record = &repo.record;
        if !self.search.is_empty() {
            let haystack = format!(
                "{} {} {} {}",
                record.name,
                record.description.as_deref().unwrap_or(""),
                record.language_label(),
                record.full_name.as_deref().unwrap_or("")
            )
            .to_lowercase();
            if !haystack.contains(&self.search.to_lowercase()) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if &repo.category != category {
                return false;
            }
        }
        if let Some(language) = &self.language {
            if record.language_label() != language {
                return false;
            }
        }
        if let Some(min_stars) = self.min_stars {
            if record.stars < min_stars {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphOptions {
    pub label_min_stars: u64,
    pub link_seed_limit: usize,
    pub link_fanout: usize,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for GraphOptions {
    fn from(config: &Config) -> Self {
        Self {
            label_min_stars: config.label_min_stars,
            link_seed_limit: config.link_seed_limit,
            link_fanout: config.link_fanout,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub category: String,
    pub color: String,
    pub radius: f64,
    pub stars: u64,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphLink {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    pub category: String,
    pub display: String,
    pub count: usize,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub filters: Filters,
    pub total: usize,
    pub visible: usize,
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
    pub legend: Vec<LegendEntry>,
}

pub fn render(
    repos: &[ClassifiedRepository],
    filters: &Filters,
    rules: &RuleTable,
    options: &GraphOptions,
) -> ViewState {
    let visible: Vec<&ClassifiedRepository> = repos.iter().filter(|r| filters.matches(r)).collect();

    let nodes = visible
        .iter()
        .map(|repo| GraphNode {
            id: repo.record.identity().to_string(),
            name: repo.record.name.clone(),
            label: (repo.record.stars > options.label_min_stars)
                .then(|| truncate_label(&repo.record.name)),
            category: repo.category.clone(),
            color: rules.color_of(&repo.category).to_string(),
            radius: node_radius(repo.record.stars),
            stars: repo.record.stars,
            language: repo.record.language_label().to_string(),
            url: repo.record.url.clone(),
        })
        .collect();

    ViewState {
        filters: filters.clone(),
        total: repos.len(),
        visible: visible.len(),
        nodes,
        links: build_links(&visible, options),
        legend: build_legend(repos, rules),
    }
}

/// Node radius from star count, clamped to `[4, 25]`.
pub fn node_radius(stars: u64) -> f64 {
    let base = (stars.max(1) as f64).sqrt();
    (base * 0.15 + 3.0).clamp(4.0, 25.0)
}

/// Link repositories within each category: sorted by stars, each of the
/// first `link_seed_limit` is linked to the next `link_fanout` entries.
pub fn build_links(repos: &[&ClassifiedRepository], options: &GraphOptions) -> Vec<GraphLink> {
    let mut groups: BTreeMap<&str, Vec<&ClassifiedRepository>> = BTreeMap::new();
    for repo in repos {
        groups.entry(repo.category.as_str()).or_default().push(repo);
    }

    let mut links = Vec::new();
    for members in groups.values_mut() {
        members.sort_by(|a, b| b.record.stars.cmp(&a.record.stars));
        for i in 0..members.len().min(options.link_seed_limit) {
            let end = members.len().min(i + 1 + options.link_fanout);
            for j in (i + 1)..end {
                links.push(GraphLink {
                    source: members[i].record.identity().to_string(),
                    target: members[j].record.identity().to_string(),
                });
            }
        }
    }
    links
}

/// Per-category counts over the full set, most populous first.
pub fn build_legend(repos: &[ClassifiedRepository], rules: &RuleTable) -> Vec<LegendEntry> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for repo in repos {
        *counts.entry(repo.category.as_str()).or_insert(0) += 1;
    }
    let mut legend: Vec<LegendEntry> = counts
        .into_iter()
        .map(|(category, count)| LegendEntry {
            category: category.to_string(),
            display: display_label(category),
            count,
            color: rules.color_of(category).to_string(),
        })
        .collect();
    legend.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
    legend
}

/// `"web-dev"` -> `"WEB DEV"`.
pub fn display_label(category: &str) -> String {
    category.replace('-', " ").to_uppercase()
}

fn truncate_label(name: &str) -> String {
    if name.chars().count() > LABEL_MAX_CHARS {
        let head: String = name.chars().take(LABEL_MAX_CHARS).collect();
        format!("{head}...")
    } else {
        name.to_string()
    }
}
