//! Gradle wrapper runner
//!
//! Runs a single test (or test pattern) through the Gradle wrapper:
//! `./gradlew test --tests <filter>`.

use super::traits::{Invocation, Runner};

/// Runner for the project's Gradle wrapper
pub struct GradleRunner {
    gradle_command: String,
}

impl Default for GradleRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl GradleRunner {
    /// Use `./gradlew` from the project directory
    pub fn new() -> Self {
        Self {
            gradle_command: "./gradlew".to_string(),
        }
    }

    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            gradle_command: command.into(),
        }
    }
}

impl Runner for GradleRunner {
    /// `task` is the test filter handed to `--tests`
    fn invocation(&self, task: &str) -> Invocation {
        Invocation::new(&self.gradle_command)
            .arg("test")
            .arg("--tests")
            .arg(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_test_invocation() {
        let runner = GradleRunner::new();
        assert_eq!(
            runner.invocation("nextflow.util.CacheTest").to_string(),
            "./gradlew test --tests nextflow.util.CacheTest"
        );
    }

    #[test]
    fn test_filter_is_one_argument() {
        let runner = GradleRunner::new();
        let invocation = runner.invocation("*CacheTest*");
        assert_eq!(invocation.args, vec!["test", "--tests", "*CacheTest*"]);
    }

    #[test]
    fn test_custom_command() {
        let runner = GradleRunner::with_command("gradle");
        assert_eq!(
            runner.invocation("FooTest").to_string(),
            "gradle test --tests FooTest"
        );
    }
}
