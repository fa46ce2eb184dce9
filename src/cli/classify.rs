//! Classify command implementation

use anyhow::Result;
use chrono::Utc;
use clap::Args;
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::utils::{emit, load_rule_table, resolve_config};
use crate::classify::Classifier;
use crate::config::CliOverrides;
use crate::ingest::load_records;
use crate::render::{build_data_file, render_data_file};
use crate::utils::format_with_commas;

#[derive(Args)]
pub struct ClassifyArgs {
    /// JSON file of repository records (array, or object with `repositories`)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write the data file here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Score a category must exceed to be selected
    #[arg(long, value_name = "N")]
    pub min_score: Option<u32>,

    /// Custom rule table (TOML)
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Owner of the starred list, recorded in the metadata
    #[arg(short, long, value_name = "NAME")]
    pub username: Option<String>,

    /// Classify on a single thread
    #[arg(long)]
    pub sequential: bool,
}

pub fn run(args: ClassifyArgs, config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(
        config_path,
        CliOverrides {
            min_score: args.min_score,
            rules: args.rules.clone(),
            username: args.username.clone(),
            parallel: if args.sequential { Some(false) } else { None },
            ..CliOverrides::default()
        },
    )?;

    let start = Instant::now();
    let records = load_records(&args.input)?;
    let classifier = Classifier::new(load_rule_table(&config)?).min_score(config.min_score);
    let classified = classifier.classify_all(records, config.parallel);

    let data = build_data_file(classified, config.username.as_deref(), config.min_score, Utc::now());
    emit(args.output.as_deref(), &render_data_file(&data)?)?;

    let catch_all = data.category_stats.get(classifier.rules().catch_all()).copied().unwrap_or(0);
    tracing::info!(
        total = data.total_count,
        categories = data.category_stats.len(),
        catch_all,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "classification complete"
    );
    if let Some(output) = &args.output {
        eprintln!(
            "Classified {} repositories into {} categories -> {}",
            format_with_commas(data.total_count as u64),
            data.category_stats.len(),
            output.display()
        );
    }
    Ok(())
}
