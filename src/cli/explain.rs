//! Explain command implementation

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use super::utils::{emit, load_rule_table, resolve_config};
use crate::classify::Classifier;
use crate::config::CliOverrides;
use crate::ingest::load_records;

#[derive(Args)]
pub struct ExplainArgs {
    /// JSON file of repository records
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Only explain records whose name or full name matches
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Score a category must exceed to be selected
    #[arg(long, value_name = "N")]
    pub min_score: Option<u32>,

    /// Custom rule table (TOML)
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,
}

pub fn run(args: ExplainArgs, config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(
        config_path,
        CliOverrides {
            min_score: args.min_score,
            rules: args.rules.clone(),
            ..CliOverrides::default()
        },
    )?;
    let classifier = Classifier::new(load_rule_table(&config)?).min_score(config.min_score);

    let records = load_records(&args.input)?;
    let explanations: Vec<_> = records
        .iter()
        .filter(|record| match &args.name {
            Some(name) => record.name == *name || record.identity() == name,
            None => true,
        })
        .map(|record| classifier.explain(record))
        .collect();

    if explanations.is_empty() {
        if let Some(name) = &args.name {
            anyhow::bail!("No repository named '{}' in {}", name, args.input.display());
        }
    }

    emit(None, &serde_json::to_string_pretty(&explanations)?)
}
