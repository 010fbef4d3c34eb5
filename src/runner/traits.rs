//! Common traits and types for command runners
//!
//! Defines the interface that all runners (make, gradle, script) implement:
//! turning a task into a concrete [`Invocation`]. Only make takes extra
//! variables, through [`RunOptions`].

use std::fmt;
use std::path::Path;

use serde::Serialize;

/// Program plus argument vector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: vec![],
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Resolve a relative program path such as `./gradlew` against `dir`
    ///
    /// Bare program names are left for PATH lookup.
    pub fn resolved_in(mut self, dir: &Path) -> Self {
        let program = Path::new(&self.program);
        if program.is_relative() && program.components().count() > 1 {
            let relative = self.program.strip_prefix("./").unwrap_or(&self.program);
            self.program = dir.join(relative).display().to_string();
        }
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Make variables appended to an invocation
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Named arguments (key=value pairs), kept in insertion order
    pub args: Vec<(String, String)>,
}

impl RunOptions {
    /// Add a named argument
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push((key.into(), value.into()));
        self
    }
}

/// Trait for command runners
///
/// Each runner knows how to turn a task into the argument vector of one
/// external program. Execution is handled by the executor.
pub trait Runner: Send + Sync {
    /// Build the invocation for a task
    ///
    /// `task` is a target name, test filter or argument string, depending on
    /// the runner.
    fn invocation(&self, task: &str) -> Invocation;
}
