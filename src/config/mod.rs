//! Configuration loading and merging
//!
//! Handles loading from config files, environment variables, and CLI arguments
//! with proper precedence (CLI > Env > File > Defaults).

pub mod loader;
pub mod merge;

pub use loader::load_config;
pub use merge::{apply_env_overrides, merge_cli_with_config, CliOverrides, ENV_PREFIX};

use crate::domain::Config;
use anyhow::Result;
use std::path::Path;

/// Resolve the effective config for one invocation.
pub fn resolve(anchor: &Path, config_path: Option<&Path>, cli: CliOverrides) -> Result<Config> {
    let file_config = load_config(anchor, config_path)?;
    let with_env = apply_env_overrides(file_config)?;
    Ok(merge_cli_with_config(with_env, cli))
}
