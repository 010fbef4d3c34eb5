//! Makefile runner implementation
//!
//! Builds `make` invocations for Nextflow's Makefile.
//!
//! # Argument Handling
//!
//! Make supports variable assignment: `make target VAR1=value1 VAR2=value2`.
//! The module test tool relies on this: `make test module=nf-amazon class=...`.

use super::traits::{Invocation, RunOptions, Runner};

/// Makefile runner for GNU Make
pub struct MakefileRunner {
    /// Path to the make command
    make_command: String,
}

impl Default for MakefileRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl MakefileRunner {
    /// Create a new Makefile runner using system `make`
    pub fn new() -> Self {
        Self {
            make_command: "make".to_string(),
        }
    }

    /// Create a Makefile runner with a custom make command path
    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            make_command: command.into(),
        }
    }

    /// `make <target>` followed by `key=value` variables in insertion order
    pub fn invocation_with(&self, target: &str, options: &RunOptions) -> Invocation {
        Invocation::new(&self.make_command).arg(target).args(
            options
                .args
                .iter()
                .map(|(key, value)| format!("{}={}", key, value)),
        )
    }
}

impl Runner for MakefileRunner {
    fn invocation(&self, task: &str) -> Invocation {
        self.invocation_with(task, &RunOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_target() {
        let runner = MakefileRunner::new();
        assert_eq!(runner.invocation("compile").to_string(), "make compile");
    }

    #[test]
    fn test_variables_in_order() {
        let runner = MakefileRunner::new();
        let options = RunOptions::default()
            .with_arg("module", "plugins:nf-amazon")
            .with_arg("class", "nextflow.cloud.aws.AwsClientFactoryTest");

        let invocation = runner.invocation_with("test", &options);
        assert_eq!(
            invocation.args,
            vec![
                "test",
                "module=plugins:nf-amazon",
                "class=nextflow.cloud.aws.AwsClientFactoryTest"
            ]
        );
    }

    #[test]
    fn test_custom_make() {
        let runner = MakefileRunner::with_command("gmake");
        assert_eq!(runner.invocation("build").program, "gmake");
    }
}
