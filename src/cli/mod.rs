//! CLI module for nextflow-devtools
//!
//! Provides command-line interface with the following subcommands:
//! - `mcp` - Start MCP server over stdio
//! - `targets` - List make targets
//! - `run` - Run a make target
//! - `build` - Build from source
//! - `test` - Run a single Gradle test
//! - `version` - Show the built launcher version
//! - `config` - Show configuration

pub mod commands;
pub mod mcp;

use anyhow::Result;

use crate::config::{load_config, Config};

pub use commands::{Cli, Commands, LogFormat, OutputFormat};
pub use mcp::run_mcp_server;

/// Load configuration and apply the `--dir` flag on top
pub fn load_cli_config(config_path: Option<&str>, dir: Option<&str>) -> Result<Config> {
    let mut config = load_config(config_path)?;

    if let Some(dir) = dir.filter(|d| !d.trim().is_empty()) {
        config.project.dir = dir.to_string();
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dir_flag_overrides_config() {
        let config = load_cli_config(None, Some("/opt/nextflow")).unwrap();
        assert_eq!(config.project.dir, "/opt/nextflow");
    }

    #[test]
    fn test_blank_dir_flag_is_ignored() {
        let config = load_cli_config(None, Some("  ")).unwrap();
        assert_ne!(config.project.dir.trim(), "");
    }
}
