//! CLI command definitions using clap
//!
//! Defines all CLI subcommands and their arguments.

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::PROJECT_DIR_ENV;

/// Developer tools for a Nextflow checkout, as a CLI and an MCP server.
///
/// Discovers Makefile targets, runs builds and tests, and launches the
/// development version of Nextflow. Use `mcp` to serve the same tools to an
/// MCP client over stdio.
#[derive(Parser, Debug)]
#[command(name = "nextflow-devtools")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path (overrides default XDG paths)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Nextflow checkout to operate on
    #[arg(short, long, global = true, env = PROJECT_DIR_ENV)]
    pub dir: Option<String>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start MCP server over stdio
    Mcp,

    /// List make targets declared in the Makefile
    Targets(TargetsArgs),

    /// Run a make target after checking it is declared
    Run(RunArgs),

    /// Build from source ('compile' target, falling back to 'build')
    Build,

    /// Run a single test through the Gradle wrapper
    Test(TestArgs),

    /// Show the version of the built launcher
    Version,

    /// Show resolved configuration
    Config,
}

/// Arguments for the `targets` subcommand
#[derive(Parser, Debug)]
pub struct TargetsArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the `run` subcommand
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Make target to run (e.g., compile, test, clean)
    #[arg(required = true)]
    pub target: String,
}

/// Arguments for the `test` subcommand
#[derive(Parser, Debug)]
pub struct TestArgs {
    /// Test class or pattern (e.g., nextflow.util.CacheTest)
    #[arg(required = true)]
    pub test_path: String,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable list
    Table,
    /// JSON output
    Json,
    /// Plain text (one target per line)
    Plain,
}

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}
