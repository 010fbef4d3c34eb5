//! nextflow-devtools - MCP server for Nextflow development
//!
//! Lets an MCP client drive the build, test and run lifecycle of a Nextflow
//! checkout without shell access:
//! - **Makefile** targets, discovered and validated before anything runs
//! - **Gradle wrapper** for single tests
//! - **launch.sh** for the development version of Nextflow
//!
//! ## Features
//!
//! - Target discovery with fallback selection (`compile`, then `build`)
//! - Runtime-settable project directory
//! - XDG-compliant layered configuration
//! - Timeouts on every external process
//! - Documentation resources and an error-debugging prompt
//!
//! ## MCP Tools
//!
//! - `list_make_targets` - List targets declared in the Makefile
//! - `set_nextflow_directory` / `get_nextflow_directory` - Project directory
//! - `run_make_command` - Run a declared make target
//! - `run_specific_test` - Run one test through the Gradle wrapper
//! - `build_nextflow` - Build from source
//! - `run_integration_tests` - Run the integration test target
//! - `get_nextflow_version` - Query the built launcher
//! - `run_development_nextflow` - Compile, then run `launch.sh`
//! - `run_plugin_test` - Run the tests of one module

pub mod cli;
pub mod config;
pub mod docs;
pub mod error;
pub mod executor;
pub mod mcp;
pub mod runner;
pub mod tools;

pub use cli::{Cli, Commands};
pub use config::{Config, ProjectDir};
pub use error::{ErrorKind, Report, ToolError, ToolResult};
pub use executor::{exec_command, CommandExecutor, ExecOptions, ExecResult, ProcessExecutor};
pub use mcp::DevToolsServer;
pub use runner::{
    parse_targets, GradleRunner, Invocation, MakefileRunner, ScriptRunner, TargetRegistry, Targets,
};
pub use tools::DevTools;
