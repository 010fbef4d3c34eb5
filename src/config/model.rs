//! Configuration model for nextflow-devtools
//!
//! Defines the structure for XDG-compliant layered configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Location and shape of the Nextflow checkout
    #[serde(default)]
    pub project: ProjectConfig,

    /// External programs invoked by the tools
    #[serde(default)]
    pub commands: CommandsConfig,

    /// Make targets used by the fixed-purpose tools
    #[serde(default)]
    pub targets: TargetsConfig,

    /// Process execution settings
    #[serde(default)]
    pub execution: ExecutionConfig,
}

/// Project directory settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProjectConfig {
    /// Initial project directory (`~` and `$VAR` are expanded)
    #[serde(default = "default_project_dir")]
    pub dir: String,

    /// Build-description file scanned for targets
    #[serde(default = "default_makefile")]
    pub makefile: String,

    /// Files whose presence marks a directory as a Nextflow checkout
    #[serde(default = "default_markers")]
    pub markers: Vec<String>,
}

fn default_project_dir() -> String {
    "~/nextflow".to_string()
}

fn default_makefile() -> String {
    "Makefile".to_string()
}

fn default_markers() -> Vec<String> {
    vec!["Makefile".to_string(), "build.gradle".to_string()]
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            dir: default_project_dir(),
            makefile: default_makefile(),
            markers: default_markers(),
        }
    }
}

/// External program paths, relative ones resolved against the project directory
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommandsConfig {
    /// Command to execute make
    #[serde(default = "default_make_command")]
    pub make: String,

    /// Gradle wrapper used for single-test runs
    #[serde(default = "default_gradle_command")]
    pub gradle: String,

    /// Versioned launcher binary queried for `-version`
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Development launch script
    #[serde(default = "default_launcher")]
    pub launcher: String,
}

fn default_make_command() -> String {
    "make".to_string()
}

fn default_gradle_command() -> String {
    "./gradlew".to_string()
}

fn default_binary() -> String {
    "./nextflow".to_string()
}

fn default_launcher() -> String {
    "./launch.sh".to_string()
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            make: default_make_command(),
            gradle: default_gradle_command(),
            binary: default_binary(),
            launcher: default_launcher(),
        }
    }
}

/// Make targets used by `build_nextflow`, `run_integration_tests` and friends
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetsConfig {
    /// Target tried first by the build tool
    #[serde(default = "default_build_preferred")]
    pub build_preferred: String,

    /// Target used when the preferred one is not declared
    #[serde(default = "default_build_fallback")]
    pub build_fallback: String,

    /// Target used for integration and module tests
    #[serde(default = "default_integration_test")]
    pub integration_test: String,
}

fn default_build_preferred() -> String {
    "compile".to_string()
}

fn default_build_fallback() -> String {
    "build".to_string()
}

fn default_integration_test() -> String {
    "test".to_string()
}

impl Default for TargetsConfig {
    fn default() -> Self {
        Self {
            build_preferred: default_build_preferred(),
            build_fallback: default_build_fallback(),
            integration_test: default_integration_test(),
        }
    }
}

/// Process execution settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExecutionConfig {
    /// Timeout in seconds for any external process (0 disables)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    3600
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
        }
    }
}

impl ExecutionConfig {
    /// Timeout as a duration, `None` when disabled
    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_secs > 0 {
            Some(Duration::from_secs(self.timeout_secs))
        } else {
            None
        }
    }
}

impl Config {
    /// Initial project directory with `~` and environment variables expanded
    pub fn project_dir(&self) -> PathBuf {
        expand_path(&self.project.dir)
    }
}

/// Expand `~` and `$VAR` in a user-supplied path
///
/// Unknown variables leave the input as-is apart from tilde expansion.
pub fn expand_path(path: &str) -> PathBuf {
    let expanded = match shellexpand::full(path) {
        Ok(expanded) => expanded.into_owned(),
        Err(e) => {
            tracing::debug!("Could not expand '{}': {}", path, e);
            shellexpand::tilde(path).into_owned()
        }
    };
    PathBuf::from(expanded)
}
