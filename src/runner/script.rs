//! Script runner implementation
//!
//! Runs an executable that lives in the project directory, such as the
//! development `launch.sh` or the built `nextflow` launcher. The task string
//! is split on whitespace into arguments; a blank task means no arguments.

use std::path::{Path, PathBuf};

use super::traits::{Invocation, Runner};

/// Runner for a project-local script or binary
pub struct ScriptRunner {
    /// Script path (e.g., "./launch.sh")
    script: String,
}

impl ScriptRunner {
    /// Create a new script runner
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
        }
    }

    /// Location of the script inside a project directory
    pub fn script_path(&self, dir: &Path) -> PathBuf {
        let relative = self.script.strip_prefix("./").unwrap_or(&self.script);
        dir.join(relative)
    }
}

impl Runner for ScriptRunner {
    fn invocation(&self, task: &str) -> Invocation {
        Invocation::new(&self.script).args(task.split_whitespace())
    }
}
