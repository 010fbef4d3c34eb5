//! Developer tool operations
//!
//! Each operation takes one snapshot of the project directory, validates its
//! inputs against the Makefile where relevant, runs at most a couple of
//! external processes and produces a [`ToolResult`]. Failures are logged here
//! with their kind; rendering to text is left to the caller.

use std::path::Path;
use std::sync::Arc;

use crate::config::{Config, DirectoryChange, ProjectDir};
use crate::error::{bullet_list, Report, ToolError, ToolResult};
use crate::executor::{CommandExecutor, ExecOptions, ExecResult, ProcessExecutor};
use crate::runner::{
    GradleRunner, Invocation, MakefileRunner, RunOptions, Runner, ScriptRunner, TargetRegistry,
    Targets,
};

/// The Nextflow developer tools
pub struct DevTools {
    config: Arc<Config>,
    project: ProjectDir,
    registry: TargetRegistry,
    executor: Arc<dyn CommandExecutor>,
    make: MakefileRunner,
    gradle: GradleRunner,
    launcher: ScriptRunner,
    binary: ScriptRunner,
}

impl DevTools {
    /// Create tools that spawn real processes
    pub fn new(config: Config) -> Self {
        Self::with_executor(config, Arc::new(ProcessExecutor))
    }

    /// Create tools with a custom executor
    pub fn with_executor(config: Config, executor: Arc<dyn CommandExecutor>) -> Self {
        let project = ProjectDir::new(config.project_dir(), config.project.markers.clone());
        let registry = TargetRegistry::new(&config.project.makefile);
        let make = MakefileRunner::with_command(&config.commands.make);
        let gradle = GradleRunner::with_command(&config.commands.gradle);
        let launcher = ScriptRunner::new(&config.commands.launcher);
        let binary = ScriptRunner::new(&config.commands.binary);

        Self {
            config: Arc::new(config),
            project,
            registry,
            executor,
            make,
            gradle,
            launcher,
            binary,
        }
    }

    /// Loaded configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Shared project directory handle
    pub fn project(&self) -> &ProjectDir {
        &self.project
    }

    /// Discover targets in the current project directory
    pub async fn targets(&self) -> Targets {
        let dir = self.project.get().await;
        self.registry.discover(&dir).await
    }

    /// Discover targets, failing when the Makefile yields none
    pub async fn discover_targets(&self) -> Result<Targets, ToolError> {
        let dir = self.project.get().await;
        self.discover_targets_in(&dir).await
    }

    async fn discover_targets_in(&self, dir: &Path) -> Result<Targets, ToolError> {
        let targets = self.registry.discover(dir).await;
        if targets.is_empty() {
            return Err(ToolError::NoTargetsListed {
                makefile: self.registry.makefile_path(dir).display().to_string(),
            });
        }
        Ok(targets)
    }

    /// List the targets declared in the Makefile
    pub async fn list_targets(&self) -> ToolResult {
        let result = self.discover_targets().await.map(|targets| {
            tracing::info!("Listed {} make targets", targets.len());
            Report::info(format!(
                "Available make targets:\n{}",
                bullet_list(&targets.names())
            ))
        });

        finish("list_make_targets", result)
    }

    /// Point the tools at another Nextflow checkout
    pub async fn set_project_directory(&self, path: &str) -> ToolResult {
        tracing::info!("Attempting to set Nextflow directory to: {}", path);

        let result = match self.project.set(path).await {
            Ok(DirectoryChange::Accepted(dir)) => Ok(Report::info(format!(
                "Nextflow directory set to: {}",
                dir.display()
            ))),
            Ok(DirectoryChange::Unrecognized(dir)) => {
                let text = format!(
                    "Warning: '{}' might not be a Nextflow repository. Setting anyway.",
                    dir.display()
                );
                tracing::warn!("{}", text);
                Ok(Report::warning(text))
            }
            Err(e) => Err(e),
        };

        finish("set_nextflow_directory", result)
    }

    /// Report the current project directory
    pub async fn get_project_directory(&self) -> ToolResult {
        let dir = self.project.get().await;
        Ok(Report::info(format!(
            "Current Nextflow directory: {}",
            dir.display()
        )))
    }

    /// Run a Makefile target after checking that it is declared
    pub async fn run_make_command(&self, command: &str) -> ToolResult {
        tracing::info!("Attempting to run make command: {}", command);
        let dir = self.project.get().await;

        let result = self.run_make_command_in(&dir, command).await;
        finish("run_make_command", result)
    }

    async fn run_make_command_in(&self, dir: &Path, command: &str) -> ToolResult {
        let targets = self.registry.discover(dir).await;

        if targets.is_empty() {
            return Err(ToolError::NoTargets {
                makefile: self.registry.makefile_path(dir).display().to_string(),
            });
        }

        if !targets.contains(command) {
            return Err(ToolError::InvalidTarget {
                target: command.to_string(),
                available: targets.names(),
            });
        }

        let invocation = self.make.invocation(command);
        let label = format!("Command '{}'", invocation);
        let result = self.execute(dir, invocation.clone(), label).await?;

        Ok(Report::info(format!(
            "Command '{}' succeeded:\n{}",
            invocation, result.stdout
        )))
    }

    /// Run a single test class or pattern through the Gradle wrapper
    pub async fn run_specific_test(&self, test_path: &str) -> ToolResult {
        let dir = self.project.get().await;
        tracing::info!("Running specific test: {} in {}", test_path, dir.display());

        let invocation = self.gradle.invocation(test_path);
        let result = self
            .execute(&dir, invocation, "Test")
            .await
            .map(|res| Report::info(format!("Test completed successfully:\n{}", res.stdout)));

        finish("run_specific_test", result)
    }

    /// Build from source with the preferred build target, or its fallback
    pub async fn build(&self) -> ToolResult {
        let dir = self.project.get().await;
        tracing::info!("Attempting to build Nextflow in {}", dir.display());

        let result = self.build_in(&dir).await;
        finish("build_nextflow", result)
    }

    async fn build_in(&self, dir: &Path) -> ToolResult {
        let preferred = &self.config.targets.build_preferred;
        let fallback = &self.config.targets.build_fallback;

        let targets = self.registry.discover(dir).await;
        let Some(target) = targets.select(preferred, fallback) else {
            return Err(ToolError::NoBuildTarget {
                preferred: preferred.clone(),
                fallback: fallback.clone(),
                available: targets.names(),
            });
        };

        if &target != preferred {
            tracing::info!("'{}' target not found, using '{}' instead", preferred, target);
        }

        let invocation = self.make.invocation(&target);
        tracing::info!("Building using '{}'", invocation);
        let result = self.execute(dir, invocation, "Build").await?;

        Ok(Report::info(format!("Build succeeded:\n{}", result.stdout)))
    }

    /// Run the integration test target
    ///
    /// The target is fixed, so it is run without consulting the Makefile.
    pub async fn run_integration_tests(&self) -> ToolResult {
        let dir = self.project.get().await;
        tracing::info!("Running integration tests in {}", dir.display());

        let invocation = self.make.invocation(&self.config.targets.integration_test);
        let result = self
            .execute(&dir, invocation, "Integration tests")
            .await
            .map(|res| Report::info(format!("Integration tests completed:\n{}", res.stdout)));

        finish("run_integration_tests", result)
    }

    /// Query the version of the built launcher
    pub async fn get_version(&self) -> ToolResult {
        let dir = self.project.get().await;
        tracing::info!("Getting Nextflow version from {}", dir.display());

        let invocation = self.binary.invocation("-version");
        let result = self
            .execute(&dir, invocation, "Version query")
            .await
            .map(|res| {
                let version = res.stdout.trim();
                tracing::debug!("Version info: {}", version);
                Report::info(version)
            });

        finish("get_nextflow_version", result)
    }

    /// Run the development launcher, compiling first when possible
    ///
    /// `command` is split on whitespace into launcher arguments.
    pub async fn run_development(&self, command: Option<&str>) -> ToolResult {
        let dir = self.project.get().await;

        let result = self.run_development_in(&dir, command.unwrap_or_default()).await;
        finish("run_development_nextflow", result)
    }

    async fn run_development_in(&self, dir: &Path, command: &str) -> ToolResult {
        let script = self.launcher.script_path(dir);
        tracing::info!("Checking for launch script at {}", script.display());

        let is_file = tokio::fs::metadata(&script)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);
        if !is_file {
            return Err(ToolError::LaunchScriptMissing {
                path: script.display().to_string(),
            });
        }

        let compile = &self.config.targets.build_preferred;
        if self.registry.is_valid(dir, compile).await {
            tracing::info!("Compiling Nextflow before running");
            let invocation = self.make.invocation(compile);
            self.execute(dir, invocation, "Compilation before launch")
                .await?;
        } else {
            tracing::info!("No '{}' target, launching without compiling", compile);
        }

        let invocation = self.launcher.invocation(command);
        tracing::info!("Running development Nextflow with command: {}", invocation);
        let result = self
            .execute(dir, invocation, "Development Nextflow execution")
            .await?;

        Ok(Report::info(format!(
            "Development Nextflow execution succeeded:\n{}",
            result.stdout
        )))
    }

    /// Run the tests of one module, optionally narrowed to a class or method
    pub async fn run_module_test(&self, module: &str, class_name: Option<&str>) -> ToolResult {
        let dir = self.project.get().await;
        match class_name {
            Some(class) => tracing::info!("Running plugin test with module={}, class={}", module, class),
            None => tracing::info!("Running plugin test with module={}", module),
        }

        let mut options = RunOptions::default().with_arg("module", module);
        if let Some(class) = class_name {
            options = options.with_arg("class", class);
        }

        let invocation = self
            .make
            .invocation_with(&self.config.targets.integration_test, &options);
        let result = self
            .execute(&dir, invocation, "Plugin test")
            .await
            .map(|res| Report::info(format!("Plugin test completed successfully:\n{}", res.stdout)));

        finish("run_plugin_test", result)
    }

    /// Run an invocation in `dir`, turning a nonzero exit into a failure labelled `label`
    async fn execute(
        &self,
        dir: &Path,
        invocation: Invocation,
        label: impl Into<String>,
    ) -> Result<ExecResult, ToolError> {
        let command = invocation.to_string();
        let options =
            ExecOptions::in_dir(dir).with_timeout_opt(self.config.execution.timeout());

        tracing::info!("Running {} in {}", command, dir.display());
        let result = self
            .executor
            .execute(&invocation.resolved_in(dir), &options)
            .await?;

        tracing::debug!("Stdout: {}", result.stdout);
        tracing::debug!("Stderr: {}", result.stderr);

        if !result.success() {
            return Err(ToolError::CommandFailed {
                label: label.into(),
                command,
                exit_code: result.exit_code,
                stdout: result.stdout,
                stderr: result.stderr,
            });
        }

        tracing::info!("{} completed successfully in {:?}", command, result.duration);
        Ok(result)
    }
}

/// Log the outcome of an operation
fn finish(operation: &str, result: ToolResult) -> ToolResult {
    if let Err(ref e) = result {
        match e.suggestion() {
            Some(suggestion) => tracing::error!(
                operation,
                kind = %e.kind(),
                suggestion = %suggestion,
                "{}",
                e
            ),
            None => tracing::error!(operation, kind = %e.kind(), "{}", e),
        }
    }
    result
}
