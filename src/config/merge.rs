//! Environment and CLI overrides layered on top of the file config.

use crate::domain::Config;
use anyhow::{Context, Result};
use figment::providers::{Env, Serialized};
use figment::Figment;
use std::path::PathBuf;

/// Environment variables with this prefix override file settings,
/// e.g. `STARS_GRAPH_MIN_SCORE=6`.
pub const ENV_PREFIX: &str = "STARS_GRAPH_";

/// Values given explicitly on the command line. `None` leaves the
/// underlying setting alone.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub min_score: Option<u32>,
    pub rules: Option<PathBuf>,
    pub username: Option<String>,
    pub parallel: Option<bool>,
    pub label_min_stars: Option<u64>,
}

pub fn apply_env_overrides(config: Config) -> Result<Config> {
    apply_env_overrides_from(config, Env::prefixed(ENV_PREFIX))
}

fn apply_env_overrides_from(config: Config, env: Env) -> Result<Config> {
    Figment::from(Serialized::defaults(config))
        .merge(env)
        .extract()
        .context("Invalid configuration in environment")
}

pub fn merge_cli_with_config(mut config: Config, cli: CliOverrides) -> Config {
    if let Some(min_score) = cli.min_score {
        config.min_score = min_score;
    }
    if let Some(rules) = cli.rules {
        config.rules = Some(rules);
    }
    if let Some(username) = cli.username {
        config.username = Some(username);
    }
    if let Some(parallel) = cli.parallel {
        config.parallel = parallel;
    }
    if let Some(label_min_stars) = cli.label_min_stars {
        config.label_min_stars = label_min_stars;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_win() {
        let base = Config { min_score: 7, username: Some("file".into()), ..Config::default() };
        let merged = merge_cli_with_config(
            base,
            CliOverrides {
                min_score: Some(2),
                parallel: Some(false),
                ..CliOverrides::default()
            },
        );
        assert_eq!(merged.min_score, 2);
        assert!(!merged.parallel);
        assert_eq!(merged.username.as_deref(), Some("file"));
    }

    #[test]
    fn test_empty_overrides_keep_config() {
        let base = Config { link_fanout: 5, ..Config::default() };
        assert_eq!(merge_cli_with_config(base.clone(), CliOverrides::default()), base);
    }

    #[test]
    fn test_env_overrides_file_values() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("STARS_GRAPH_MIN_SCORE", "9");
            jail.set_env("STARS_GRAPH_USERNAME", "octocat");
            let base = Config { min_score: 6, link_fanout: 5, ..Config::default() };
            let cfg = apply_env_overrides_from(base, Env::prefixed(ENV_PREFIX))
                .map_err(|e| e.to_string())?;
            assert_eq!(cfg.min_score, 9);
            assert_eq!(cfg.username.as_deref(), Some("octocat"));
            assert_eq!(cfg.link_fanout, 5);
            Ok(())
        });
    }

    #[test]
    fn test_env_with_bad_value_is_error() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("STARS_GRAPH_MIN_SCORE", "lots");
            assert!(apply_env_overrides_from(Config::default(), Env::prefixed(ENV_PREFIX)).is_err());
            Ok(())
        });
    }
}
