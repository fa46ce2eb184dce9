//! Clean command implementation

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};

use crate::clean::clean_dataset;
use crate::render::{read_data_file, write_data_file};

#[derive(Args)]
pub struct CleanArgs {
    /// Exported data file to repair in place
    #[arg(value_name = "DATA_FILE")]
    pub data_file: PathBuf,

    /// Report what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: CleanArgs) -> Result<()> {
    let mut data = read_data_file(&args.data_file)?;
    let report = clean_dataset(&mut data, Utc::now());

    for change in &report.changes {
        println!("{}:", change.repository);
        println!("  - {}", change.before);
        println!("  + {}", change.after);
    }
    println!("Statistics:");
    println!("  Total repositories: {}", report.stats.total_repositories);
    println!("  Corrupted descriptions found: {}", report.stats.corrupted_found);
    println!("  Descriptions fixed: {}", report.stats.descriptions_fixed);

    if args.dry_run {
        println!("Dry run: no files written");
        return Ok(());
    }

    let backup = backup_path(&args.data_file);
    fs::copy(&args.data_file, &backup)
        .with_context(|| format!("Failed writing backup: {}", backup.display()))?;
    tracing::info!(backup = %backup.display(), "wrote backup");

    write_data_file(&args.data_file, &data)?;
    println!("Backup: {}", backup.display());
    Ok(())
}

/// `repositories.json` -> `repositories.backup.json`
fn backup_path(path: &Path) -> PathBuf {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("data");
    path.with_file_name(format!("{stem}.backup.json"))
}
