/// Configuration precedence for a run.
///
/// 1. `--config FILE` if given (it must load).
/// 2. `<config_dir>/pathsize/config.json` if it exists.
/// 3. Built-in defaults.
///
/// Then `--clear-excludes` empties the pattern list and each `--exclude`
/// appends one.
use crate::args::Cli;
use anyhow::Context;
use pathsize_core::config::ScanConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Location of the per-user configuration file, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "pathsize").map(|d| d.config_dir().join("config.json"))
}

/// Resolve the effective configuration for `cli`.
pub fn resolve(cli: &Cli) -> anyhow::Result<ScanConfig> {
    resolve_from(cli, default_config_path().as_deref())
}

/// [`resolve`] with an explicit fallback file location.
pub fn resolve_from(cli: &Cli, default_path: Option<&Path>) -> anyhow::Result<ScanConfig> {
    let mut config = match (&cli.config, default_path) {
        (Some(path), _) => ScanConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        (None, Some(path)) if path.exists() => ScanConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        _ => {
            debug!("no config file; using defaults");
            ScanConfig::default()
        }
    };

    if cli.clear_excludes {
        config.exclusions.clear();
    }
    config.exclusions.extend(cli.exclude.iter().cloned());
    Ok(config)
}
