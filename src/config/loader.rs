//! Configuration loader with XDG-compliant path resolution
//!
//! Loads configuration from multiple locations with layered priority:
//! 1. `/etc/nextflow-devtools/config.toml` (lowest priority)
//! 2. `~/.config/nextflow-devtools/config.toml`
//! 3. `~/.nextflow-devtools.toml`
//! 4. `./.nextflow-devtools.toml`
//! 5. `--config` override file
//! 6. `NEXTFLOW_DEVTOOLS_*` environment variables
//! 7. `NEXTFLOW_DIR` (highest priority, project directory only)

use std::path::PathBuf;

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use super::model::Config;

/// Application name used for XDG directories
const APP_NAME: &str = "nextflow-devtools";

/// Prefix for configuration environment variables
const ENV_PREFIX: &str = "NEXTFLOW_DEVTOOLS_";

/// Environment variable selecting the initial project directory
pub const PROJECT_DIR_ENV: &str = "NEXTFLOW_DIR";

/// Get XDG config search paths in priority order (lowest to highest)
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from(format!("/etc/{}/config.toml", APP_NAME)));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join(APP_NAME).join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(format!(".{}.toml", APP_NAME)));
    }

    paths.push(PathBuf::from(format!(".{}.toml", APP_NAME)));

    paths
}

/// Load configuration with XDG layering
///
/// Configurations are merged in priority order, with later files
/// overriding earlier ones. Environment variables with prefix
/// `NEXTFLOW_DEVTOOLS_` override all file-based configuration, and
/// `NEXTFLOW_DIR` overrides `project.dir`.
///
/// # Arguments
/// * `override_path` - Optional path to a config file that takes priority over the XDG files
pub fn load_config(override_path: Option<&str>) -> Result<Config> {
    let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

    for path in config_paths() {
        if path.exists() {
            tracing::debug!("Loading config from: {}", path.display());
            figment = figment.merge(Toml::file(&path));
        }
    }

    if let Some(path) = override_path {
        let path = PathBuf::from(path);
        if path.exists() {
            tracing::debug!("Loading override config from: {}", path.display());
            figment = figment.merge(Toml::file(&path));
        } else {
            tracing::warn!("Override config not found: {}", path.display());
        }
    }

    // Format: NEXTFLOW_DEVTOOLS_EXECUTION__TIMEOUT_SECS=600
    // Maps to: execution.timeout_secs = 600
    figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

    if let Ok(dir) = std::env::var(PROJECT_DIR_ENV) {
        if !dir.trim().is_empty() {
            tracing::debug!("Using {}={}", PROJECT_DIR_ENV, dir);
            figment = figment.merge(Serialized::default("project.dir", dir));
        }
    }

    figment.extract().context("Failed to load configuration")
}

/// Find all existing config files (for introspection)
pub fn find_config_files() -> Vec<PathBuf> {
    config_paths().into_iter().filter(|p| p.exists()).collect()
}
