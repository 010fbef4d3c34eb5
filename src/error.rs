//! Error types for nextflow-devtools
//!
//! Every tool returns a [`ToolResult`]: either a [`Report`] or a typed
//! [`ToolError`]. Rendering to text happens only at the MCP / CLI boundary.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Result type for tool operations
pub type ToolResult = Result<Report, ToolError>;

/// Coarse classification of a [`ToolError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Project directory or launch script is missing
    Configuration,
    /// Makefile missing or unreadable
    Discovery,
    /// Caller asked for a target that does not exist
    Validation,
    /// External process exited with a nonzero status
    Execution,
    /// External process exceeded the configured timeout
    Timeout,
    /// Anything else (spawn failures, I/O while waiting)
    Unexpected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Configuration => "configuration",
            ErrorKind::Discovery => "discovery",
            ErrorKind::Validation => "validation",
            ErrorKind::Execution => "execution",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Unexpected => "unexpected",
        };
        f.write_str(name)
    }
}

/// Main error type for tool operations
#[derive(Error, Debug)]
pub enum ToolError {
    /// Requested project directory does not exist
    #[error("Error: Directory '{path}' does not exist.")]
    DirectoryNotFound { path: String },

    /// Launch script missing from the project directory
    #[error(
        "Error: launch.sh script not found at {path}. Make sure the Nextflow directory is correct."
    )]
    LaunchScriptMissing { path: String },

    /// No targets could be read from the Makefile
    #[error(
        "Could not read Makefile targets from {makefile}. Please check if the Nextflow directory is set correctly."
    )]
    NoTargets { makefile: String },

    /// Target listing found no Makefile or no rule headers in it
    #[error(
        "Could not find any make targets in {makefile}. Please check if the Nextflow directory is set correctly."
    )]
    NoTargetsListed { makefile: String },

    /// Requested target is not declared in the Makefile
    #[error(
        "Error: '{target}' is not a valid make target. Available targets are:\n{}",
        bullet_list(.available)
    )]
    InvalidTarget {
        target: String,
        available: Vec<String>,
    },

    /// Neither the preferred nor the fallback target is declared
    #[error(
        "Error: Neither '{preferred}' nor '{fallback}' targets found in Makefile. Available targets are:\n{}",
        bullet_list(.available)
    )]
    NoBuildTarget {
        preferred: String,
        fallback: String,
        available: Vec<String>,
    },

    /// Command ran and exited with a nonzero status
    #[error(
        "{label} failed with exit code {}:\nStdout: {stdout}\nStderr: {stderr}",
        exit_code_display(.exit_code)
    )]
    CommandFailed {
        label: String,
        command: String,
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// Failed to spawn the command
    #[error("Exception running {command}: {error}")]
    SpawnFailed { command: String, error: String },

    /// Command timed out
    #[error("Command timed out after {timeout:?}: {command}")]
    Timeout { command: String, timeout: Duration },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ToolError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ToolError::DirectoryNotFound { .. } | ToolError::LaunchScriptMissing { .. } => {
                ErrorKind::Configuration
            }
            ToolError::NoTargets { .. } | ToolError::NoTargetsListed { .. } => {
                ErrorKind::Discovery
            }
            ToolError::InvalidTarget { .. } | ToolError::NoBuildTarget { .. } => {
                ErrorKind::Validation
            }
            ToolError::CommandFailed { .. } => ErrorKind::Execution,
            ToolError::Timeout { .. } => ErrorKind::Timeout,
            ToolError::SpawnFailed { .. } | ToolError::Io(_) => ErrorKind::Unexpected,
        }
    }

    /// Hint for the operator, if the failure matches a known pattern
    pub fn suggestion(&self) -> Option<String> {
        match self {
            ToolError::CommandFailed {
                command, stderr, ..
            } => suggest_fix(command, stderr),
            ToolError::SpawnFailed { command, error } => suggest_fix(command, error),
            ToolError::Timeout { .. } => Some(
                "Increase [execution].timeout_secs or check whether the command hangs".to_string(),
            ),
            ToolError::NoTargets { .. }
            | ToolError::NoTargetsListed { .. }
            | ToolError::DirectoryNotFound { .. } => {
                Some("Point the server at a Nextflow checkout with set_nextflow_directory".to_string())
            }
            _ => None,
        }
    }
}

/// Severity of a successful report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportLevel {
    Info,
    Warning,
}

/// Successful outcome of a tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub level: ReportLevel,
    pub text: String,
}

impl Report {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: ReportLevel::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: ReportLevel::Warning,
            text: text.into(),
        }
    }

    pub fn is_warning(&self) -> bool {
        self.level == ReportLevel::Warning
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Render a tool result as the single text payload returned to the caller
pub fn render(result: &ToolResult) -> String {
    match result {
        Ok(report) => report.text.clone(),
        Err(e) => e.to_string(),
    }
}

/// Format names as a "- name" list, one per line
pub fn bullet_list(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("- {}", name))
        .collect::<Vec<_>>()
        .join("\n")
}

fn exit_code_display(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none (terminated by signal)".to_string(),
    }
}

/// Suggest fixes for common error patterns
pub fn suggest_fix(command: &str, stderr: &str) -> Option<String> {
    // Permission errors
    if stderr.contains("Permission denied") {
        if command.contains("gradlew") || command.contains("launch.sh") {
            return Some(
                "Permission denied. Make the script executable with 'chmod +x'.".to_string(),
            );
        }
        return Some(
            "Permission denied. Check file permissions or run with appropriate access.".to_string(),
        );
    }

    // Java toolchain missing
    if stderr.contains("JAVA_HOME") || stderr.contains("java: command not found") {
        return Some("No Java runtime found. Install a JDK and set JAVA_HOME.".to_string());
    }

    // Command not found
    if stderr.contains("command not found")
        || stderr.contains("not found")
        || stderr.contains("No such file")
    {
        if command.starts_with("make") {
            return Some("'make' command not found. Install build-essential or make.".to_string());
        }
        if command.contains("gradlew") {
            return Some(
                "Gradle wrapper not found. Verify the Nextflow directory is correct.".to_string(),
            );
        }
        if command.contains("launch.sh") || command.contains("nextflow") {
            return Some(
                "Script not found. Run 'make compile' or verify the Nextflow directory.".to_string(),
            );
        }
        return Some("Required command not found. Check PATH and dependencies.".to_string());
    }

    // Make-specific errors
    if stderr.contains("No rule to make target") {
        return Some(
            "Target not found in Makefile. Run 'list_make_targets' to see available targets."
                .to_string(),
        );
    }

    // Gradle-specific errors
    if stderr.contains("No tests found for given includes") {
        return Some(
            "No test matched the filter. Use a fully qualified class name such as 'nextflow.util.CacheTest'."
                .to_string(),
        );
    }

    None
}
