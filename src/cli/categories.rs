//! Categories command implementation

use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};

use super::utils::{load_rule_table, resolve_config};
use crate::classify::Tier;
use crate::config::CliOverrides;
use crate::render::display_label;

#[derive(Args)]
pub struct CategoriesArgs {
    /// Custom rule table (TOML)
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,
}

pub fn run(args: CategoriesArgs, config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(
        config_path,
        CliOverrides { rules: args.rules.clone(), ..CliOverrides::default() },
    )?;
    let table = load_rule_table(&config)?;

    println!("Categories (priority order):");
    for category in table.categories() {
        let counts: Vec<String> = Tier::ALL
            .iter()
            .map(|tier| format!("{} {}", category.keywords(*tier).len(), tier.as_str()))
            .collect();
        let marker = if category.name == table.catch_all() { " (catch-all)" } else { "" };
        println!(
            "  {:<14} {}  {}{}  [{}]",
            category.name,
            category.color,
            display_label(&category.name),
            marker,
            counts.join(", ")
        );
    }
    Ok(())
}
