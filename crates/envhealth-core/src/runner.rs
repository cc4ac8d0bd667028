//! Command Runner (C4).
//!
//! Executes a shell command with a timeout and an optional cancellation
//! signal, capturing combined stdout+stderr and the exit status. There is
//! no process-wide default timeout — every call site supplies its own,
//! per §5 of the engine's contract.

use crate::error::{EngineError, Result};
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::Command;

/// Output of one command execution.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub combined_output: String,
    pub exit_code: i32,
    pub timed_out: bool,
}

impl CommandOutput {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

async fn drain(mut reader: impl tokio::io::AsyncRead + Unpin + Send + 'static) -> Vec<u8> {
    let mut buf = Vec::new();
    let _ = reader.read_to_end(&mut buf).await;
    buf
}

/// Runs `command` under a POSIX shell in `cwd`, bounded by `timeout`.
pub async fn run(command: &str, cwd: &Path, timeout: Duration) -> Result<CommandOutput> {
    run_cancellable(command, cwd, timeout, std::future::pending()).await
}

/// Same as [`run`], but `cancel` resolving early terminates the child and
/// returns [`EngineError::Cancelled`] instead of a partial result.
pub async fn run_cancellable(
    command: &str,
    cwd: &Path,
    timeout: Duration,
    cancel: impl std::future::Future<Output = ()>,
) -> Result<CommandOutput> {
    let (shell, flag) = if cfg!(target_os = "windows") {
        ("cmd", "/C")
    } else {
        ("sh", "-c")
    };

    let mut child = Command::new(shell)
        .arg(flag)
        .arg(command)
        .current_dir(cwd)
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()?;

    let stdout = child.stdout.take().expect("stdout was piped");
    let stderr = child.stderr.take().expect("stderr was piped");
    let stdout_task = tokio::spawn(drain(stdout));
    let stderr_task = tokio::spawn(drain(stderr));

    tokio::pin!(cancel);

    enum Outcome {
        Exited(std::io::Result<std::process::ExitStatus>),
        TimedOut,
        Cancelled,
    }

    let outcome = tokio::select! {
        status = child.wait() => Outcome::Exited(status),
        () = tokio::time::sleep(timeout) => Outcome::TimedOut,
        () = &mut cancel => Outcome::Cancelled,
    };

    match outcome {
        Outcome::Exited(status) => {
            let status = status?;
            let stdout_bytes = stdout_task.await.unwrap_or_default();
            let stderr_bytes = stderr_task.await.unwrap_or_default();
            let mut combined = String::from_utf8_lossy(&stdout_bytes).into_owned();
            combined.push_str(&String::from_utf8_lossy(&stderr_bytes));
            Ok(CommandOutput {
                combined_output: combined,
                exit_code: status.code().unwrap_or(-1),
                timed_out: false,
            })
        }
        Outcome::TimedOut => {
            let _ = child.kill().await;
            Err(EngineError::Timeout(timeout))
        }
        Outcome::Cancelled => {
            let _ = child.kill().await;
            Err(EngineError::Cancelled)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_run_captures_stdout() {
        let dir = tempdir().unwrap();
        let output = run("echo hello", dir.path(), Duration::from_secs(5))
            .await
            .unwrap();
        assert!(output.combined_output.contains("hello"));
        assert!(output.succeeded());
        assert!(!output.timed_out);
    }

    #[tokio::test]
    async fn test_run_captures_nonzero_exit() {
        let dir = tempdir().unwrap();
        let output = run("exit 7", dir.path(), Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(output.exit_code, 7);
        assert!(!output.succeeded());
    }

    #[tokio::test]
    async fn test_run_times_out() {
        let dir = tempdir().unwrap();
        let result = run("sleep 5", dir.path(), Duration::from_millis(100)).await;
        assert!(matches!(result, Err(EngineError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_run_cancellable_cancels_early() {
        let dir = tempdir().unwrap();
        let result = run_cancellable(
            "sleep 5",
            dir.path(),
            Duration::from_secs(5),
            async { tokio::time::sleep(Duration::from_millis(50)).await },
        )
        .await;
        assert!(matches!(result, Err(EngineError::Cancelled)));
    }

    #[tokio::test]
    async fn test_run_uses_working_directory() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "x").unwrap();
        let output = run("ls", dir.path(), Duration::from_secs(5))
            .await
            .unwrap();
        assert!(output.combined_output.contains("marker.txt"));
    }
}
