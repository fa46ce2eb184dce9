//! Graph command implementation

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use super::utils::{emit, load_rule_table, parse_filter, resolve_config};
use crate::config::CliOverrides;
use crate::render::{read_data_file, render, Filters, GraphOptions};

#[derive(Args)]
pub struct GraphArgs {
    /// Exported data file
    #[arg(value_name = "DATA_FILE")]
    pub data_file: PathBuf,

    /// Case-insensitive text search over name, description and language
    #[arg(short, long, value_name = "TEXT", default_value = "")]
    pub search: String,

    /// Only show this category ('all' for every category)
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Only show this language ('all' for every language)
    #[arg(long, value_name = "LANGUAGE")]
    pub language: Option<String>,

    /// Hide repositories with fewer stars
    #[arg(long, value_name = "N")]
    pub min_stars: Option<u64>,

    /// Label nodes with more stars than this
    #[arg(long, value_name = "N")]
    pub label_min_stars: Option<u64>,

    /// Custom rule table (TOML) for category colors
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Write the view state here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub fn run(args: GraphArgs, config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(
        config_path,
        CliOverrides {
            rules: args.rules.clone(),
            label_min_stars: args.label_min_stars,
            ..CliOverrides::default()
        },
    )?;
    let rules = load_rule_table(&config)?;
    let data = read_data_file(&args.data_file)?;

    let filters = Filters {
        search: args.search.trim().to_string(),
        category: parse_filter(args.category.as_deref()),
        language: parse_filter(args.language.as_deref()),
        min_stars: args.min_stars,
    };
    let view = render(&data.repositories, &filters, &rules, &GraphOptions::from(&config));
    tracing::info!(total = view.total, visible = view.visible, links = view.links.len(), "rendered view");

    emit(args.output.as_deref(), &serde_json::to_string_pretty(&view)?)
}
