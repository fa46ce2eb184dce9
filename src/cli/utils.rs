//! Shared CLI utilities.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use crate::classify::{RuleTable, DEFAULT_RULE_TABLE};
use crate::config::{self, CliOverrides};
use crate::domain::Config;

/// Resolve config relative to the working directory.
pub fn resolve_config(config_path: Option<&Path>, overrides: CliOverrides) -> Result<Config> {
    let cwd = std::env::current_dir()?;
    config::resolve(&cwd, config_path, overrides)
}

/// The built-in rule table, or the one named by `config.rules`.
pub fn load_rule_table(config: &Config) -> Result<Arc<RuleTable>> {
    let Some(path) = config.rules.as_deref() else {
        return Ok(Arc::clone(&DEFAULT_RULE_TABLE));
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed reading rule table: {}", path.display()))?;
    let table = RuleTable::from_toml_str(&content)
        .with_context(|| format!("Invalid rule table: {}", path.display()))?;
    tracing::debug!(path = %path.display(), categories = table.categories().len(), "loaded rule table");
    Ok(Arc::new(table))
}

/// Write to `output` when given, else stdout.
pub fn emit(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(path, content)
                .with_context(|| format!("Failed writing output: {}", path.display()))
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", content)?;
            Ok(())
        }
    }
}

/// Normalise a filter value; empty or `all` means no filter.
pub fn parse_filter(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter() {
        assert_eq!(parse_filter(None), None);
        assert_eq!(parse_filter(Some("all")), None);
        assert_eq!(parse_filter(Some(" ALL ")), None);
        assert_eq!(parse_filter(Some("")), None);
        assert_eq!(parse_filter(Some(" devops ")), Some("devops".to_string()));
    }

    #[test]
    fn test_default_rule_table_when_unset() {
        let table = load_rule_table(&Config::default()).expect("table");
        assert_eq!(table.catch_all(), "other");
    }

    #[test]
    fn test_missing_rule_table_file_is_error() {
        let config = Config { rules: Some("/nonexistent/rules.toml".into()), ..Config::default() };
        assert!(load_rule_table(&config).is_err());
    }
}
