//! Async command execution with timeout support
//!
//! Provides a unified interface for running commands with:
//! - Configurable timeouts
//! - Output capture (stdout/stderr), kept verbatim
//! - Working directory control
//!
//! On unix each command runs in its own process group, so a timeout takes
//! down everything the command started, not just the direct child.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::time::timeout;

use crate::error::ToolError;
use crate::runner::Invocation;

/// Options for async command execution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOptions {
    /// Working directory for the command
    pub working_dir: Option<PathBuf>,
    /// Timeout duration (None = no timeout)
    pub timeout: Option<Duration>,
}

impl ExecOptions {
    /// Create options with a working directory
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: Some(dir.into()),
            ..Default::default()
        }
    }

    /// Set an optional timeout
    pub fn with_timeout_opt(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Result of async command execution
#[derive(Debug, Clone, Default)]
pub struct ExecResult {
    /// Exit code if available (None when killed by a signal)
    pub exit_code: Option<i32>,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
    /// Duration of execution
    pub duration: Duration,
}

impl ExecResult {
    /// Whether the command exited with status 0
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Something that can run an [`Invocation`] to completion
///
/// A nonzero exit is a normal result, not an error. Errors are reserved for
/// spawn failures, I/O failures and timeouts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(
        &self,
        invocation: &Invocation,
        options: &ExecOptions,
    ) -> Result<ExecResult, ToolError>;
}

/// Executor that spawns real processes
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

#[async_trait]
impl CommandExecutor for ProcessExecutor {
    async fn execute(
        &self,
        invocation: &Invocation,
        options: &ExecOptions,
    ) -> Result<ExecResult, ToolError> {
        exec_command(invocation, options).await
    }
}

/// Execute a command asynchronously with timeout support
///
/// # Errors
/// * `ToolError::SpawnFailed` - If the command couldn't be spawned
/// * `ToolError::Timeout` - If the command timed out (when timeout is set)
pub async fn exec_command(
    invocation: &Invocation,
    options: &ExecOptions,
) -> Result<ExecResult, ToolError> {
    let start = Instant::now();
    let command_str = invocation.to_string();

    let mut cmd = Command::new(&invocation.program);
    cmd.args(&invocation.args);
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    cmd.kill_on_drop(true); // Kill process if future is dropped
    #[cfg(unix)]
    cmd.process_group(0);

    if let Some(ref dir) = options.working_dir {
        cmd.current_dir(dir);
    }

    tracing::debug!("Executing async: {}", command_str);

    let child = cmd.spawn().map_err(|e| ToolError::SpawnFailed {
        command: command_str.clone(),
        error: e.to_string(),
    })?;
    let pid = child.id();

    let (exit_code, stdout, stderr) = if let Some(timeout_duration) = options.timeout {
        match timeout(timeout_duration, wait_for_output(child)).await {
            Ok(result) => result?,
            Err(_) => {
                // Dropping the child future kills the direct child only
                if let Some(pid) = pid {
                    kill_process_group(pid);
                }
                tracing::warn!(
                    "Command timed out after {:?}: {}",
                    timeout_duration,
                    command_str
                );
                return Err(ToolError::Timeout {
                    command: command_str,
                    timeout: timeout_duration,
                });
            }
        }
    } else {
        wait_for_output(child).await?
    };

    Ok(ExecResult {
        exit_code,
        stdout,
        stderr,
        duration: start.elapsed(),
    })
}

/// Kill every process in the group led by `pid`
#[cfg(unix)]
fn kill_process_group(pid: u32) {
    let Ok(pgid) = libc::pid_t::try_from(pid) else {
        return;
    };
    // SAFETY: killpg only sends a signal; the group was created for this command
    if unsafe { libc::killpg(pgid, libc::SIGKILL) } == -1 {
        tracing::debug!(
            "Failed to kill process group {}: {}",
            pgid,
            std::io::Error::last_os_error()
        );
    }
}

#[cfg(not(unix))]
fn kill_process_group(_pid: u32) {}

/// Wait for a child process and capture its output
async fn wait_for_output(
    mut child: tokio::process::Child,
) -> Result<(Option<i32>, String, String), ToolError> {
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    // Read stdout and stderr concurrently so neither pipe fills up
    let (stdout, stderr, status) =
        tokio::join!(read_all(stdout), read_all(stderr), child.wait());

    let status = status?;

    Ok((status.code(), stdout, stderr))
}

/// Read a whole stream into a string, replacing invalid UTF-8
async fn read_all<R: AsyncRead + Unpin>(reader: Option<R>) -> String {
    let Some(mut reader) = reader else {
        return String::new();
    };

    let mut buf = Vec::with_capacity(8 * 1024);
    if let Err(e) = reader.read_to_end(&mut buf).await {
        tracing::warn!("Error reading output: {}", e);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> Invocation {
        Invocation::new("sh").arg("-c").arg(script)
    }

    #[test]
    fn test_exec_options_default() {
        let options = ExecOptions::default();

        assert!(options.working_dir.is_none());
        assert!(options.timeout.is_none());
    }

    #[test]
    fn test_exec_options_builder() {
        let options = ExecOptions::in_dir("/tmp").with_timeout_opt(Some(Duration::from_secs(60)));

        assert_eq!(options.working_dir, Some(PathBuf::from("/tmp")));
        assert_eq!(options.timeout, Some(Duration::from_secs(60)));

        let cleared = options.with_timeout_opt(None);
        assert!(cleared.timeout.is_none());
    }

    #[test]
    fn test_exec_result_success() {
        let ok = ExecResult {
            exit_code: Some(0),
            ..Default::default()
        };
        let failed = ExecResult {
            exit_code: Some(2),
            ..Default::default()
        };
        let signalled = ExecResult::default();

        assert!(ok.success());
        assert!(!failed.success());
        assert!(!signalled.success());
    }

    #[tokio::test]
    async fn test_exec_command_success() {
        let result = exec_command(&Invocation::new("echo").arg("hello world"), &ExecOptions::default()).await;

        match result {
            Ok(res) => {
                assert!(res.success());
                assert_eq!(res.exit_code, Some(0));
                assert_eq!(res.stdout, "hello world\n");
            }
            Err(ToolError::SpawnFailed { .. }) => {
                eprintln!("Skipping test: echo not available");
            }
            Err(e) => panic!("Unexpected error: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_exec_command_failure_captures_both_streams() {
        let result = exec_command(&sh("echo out; echo err >&2; exit 3"), &ExecOptions::default()).await;

        match result {
            Ok(res) => {
                assert!(!res.success());
                assert_eq!(res.exit_code, Some(3));
                assert_eq!(res.stdout, "out\n");
                assert_eq!(res.stderr, "err\n");
            }
            Err(ToolError::SpawnFailed { .. }) => {
                eprintln!("Skipping test: sh not available");
            }
            Err(e) => panic!("Unexpected error: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_exec_command_timeout() {
        let options = ExecOptions::default().with_timeout_opt(Some(Duration::from_millis(100)));

        let result = exec_command(&Invocation::new("sleep").arg("10"), &options).await;

        match result {
            Err(err @ ToolError::Timeout { .. }) => {
                assert_eq!(err.to_string(), "Command timed out after 100ms: sleep 10");
            }
            Err(ToolError::SpawnFailed { .. }) => {
                eprintln!("Skipping test: sleep not available");
            }
            Ok(_) => panic!("Expected timeout error"),
            Err(e) => panic!("Unexpected error: {:?}", e),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exec_command_timeout_kills_background_children() {
        let dir = tempfile::TempDir::new().unwrap();
        let pid_file = dir.path().join("grandchild.pid");
        let script = format!("sleep 30 & echo $! > {}; wait", pid_file.display());
        let options = ExecOptions::in_dir(dir.path()).with_timeout_opt(Some(Duration::from_millis(500)));

        match exec_command(&sh(&script), &options).await {
            Err(ToolError::Timeout { .. }) => {}
            Err(ToolError::SpawnFailed { .. }) => {
                eprintln!("Skipping test: sh not available");
                return;
            }
            other => panic!("Expected timeout error, got {:?}", other),
        }

        let pid: libc::pid_t = std::fs::read_to_string(&pid_file)
            .unwrap()
            .trim()
            .parse()
            .unwrap();

        // The killed sleep may linger briefly as a zombie until init reaps it
        let mut alive = true;
        for _ in 0..50 {
            alive = unsafe { libc::kill(pid, 0) } == 0 && !is_zombie(pid);
            if !alive {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert!(!alive, "background sleep {} survived the timeout", pid);
    }

    #[cfg(unix)]
    fn is_zombie(pid: libc::pid_t) -> bool {
        std::fs::read_to_string(format!("/proc/{}/stat", pid))
            .map(|stat| {
                stat.rsplit(')')
                    .next()
                    .is_some_and(|rest| rest.trim_start().starts_with('Z'))
            })
            .unwrap_or(false)
    }

    #[tokio::test]
    async fn test_exec_command_large_output_not_truncated() {
        let result = exec_command(
            &sh("for i in $(seq 1 5000); do echo \"line of output $i\"; done"),
            &ExecOptions::default(),
        )
        .await;

        match result {
            Ok(res) => {
                assert_eq!(res.stdout.lines().count(), 5000);
                assert!(res.stdout.ends_with("line of output 5000\n"));
            }
            Err(ToolError::SpawnFailed { .. }) => {
                eprintln!("Skipping test: sh not available");
            }
            Err(e) => panic!("Unexpected error: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_exec_command_working_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "").unwrap();
        let options = ExecOptions::in_dir(dir.path());

        let result = exec_command(&Invocation::new("ls"), &options).await;

        match result {
            Ok(res) => {
                assert!(res.success());
                assert!(res.stdout.contains("marker.txt"));
            }
            Err(ToolError::SpawnFailed { .. }) => {
                eprintln!("Skipping test: ls not available");
            }
            Err(e) => panic!("Unexpected error: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_exec_command_spawn_failed() {
        let result = exec_command(
            &Invocation::new("nonexistent_command_12345"),
            &ExecOptions::default(),
        )
        .await;

        match result {
            Err(ToolError::SpawnFailed { command, .. }) => {
                assert!(command.contains("nonexistent_command_12345"));
            }
            _ => panic!("Expected SpawnFailed error"),
        }
    }

    #[tokio::test]
    async fn test_process_executor_delegates() {
        let executor = ProcessExecutor;
        let result = executor
            .execute(&Invocation::new("echo").arg("via trait"), &ExecOptions::default())
            .await;

        match result {
            Ok(res) => assert!(res.stdout.contains("via trait")),
            Err(ToolError::SpawnFailed { .. }) => {
                eprintln!("Skipping test: echo not available");
            }
            Err(e) => panic!("Unexpected error: {:?}", e),
        }
    }

    #[tokio::test]
    async fn test_mock_executor() {
        let mut mock = MockCommandExecutor::new();
        mock.expect_execute().times(1).returning(|_, _| {
            Ok(ExecResult {
                exit_code: Some(0),
                stdout: "mocked".to_string(),
                ..Default::default()
            })
        });

        let result = mock
            .execute(&Invocation::new("make").arg("compile"), &ExecOptions::default())
            .await
            .unwrap();
        assert_eq!(result.stdout, "mocked");
    }
}
