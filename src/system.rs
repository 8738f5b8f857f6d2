use std::path::{Path, PathBuf};
use std::process::Stdio;

use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::{Duration, timeout};

/// Name the notifier sees as `$0`.
const NOTIFIER_ARGV0: &str = "host-watchdog";

#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: Option<i32>,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("command timed out after {timeout_secs}s: {cmd}")]
    Timeout { cmd: String, timeout_secs: u64 },
    #[error("failed to execute command {cmd}: {source}")]
    Spawn { cmd: String, source: std::io::Error },
    #[error("command {cmd} has no stdout pipe")]
    MissingStdout { cmd: String },
    #[error("failed to write output to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The ways the watchdog runs external tools. Command lines are shell command lines.
pub trait CommandRunner {
    /// Runs to completion and returns stdout.
    async fn capture_output(&self, command_line: &str) -> Result<String, CommandError>;

    /// Streams stdout verbatim into a newly created or truncated `dest`; returns bytes written.
    async fn capture_to_file(&self, command_line: &str, dest: &Path) -> Result<u64, CommandError>;

    /// Runs with `message` as the single positional argument and returns the exit code,
    /// `None` when the process was ended by a signal.
    async fn run_with_message(
        &self,
        command_line: &str,
        message: &str,
    ) -> Result<Option<i32>, CommandError>;
}

#[derive(Debug, Clone)]
pub struct ShellRunner {
    timeout_secs: u64,
}

impl ShellRunner {
    pub fn new(timeout_secs: u64) -> Self {
        Self { timeout_secs }
    }

    fn limit(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn timed_out(&self, cmd: &str) -> CommandError {
        CommandError::Timeout {
            cmd: cmd.to_string(),
            timeout_secs: self.timeout_secs,
        }
    }

    pub async fn run_shell(&self, command_line: &str) -> Result<CommandOutput, CommandError> {
        let output = timeout(self.limit(), shell(command_line).output())
            .await
            .map_err(|_| self.timed_out(command_line))?
            .map_err(|source| CommandError::Spawn {
                cmd: command_line.to_string(),
                source,
            })?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            status: output.status.code(),
        })
    }
}

fn shell(command_line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(command_line).kill_on_drop(true);
    command
}

impl CommandRunner for ShellRunner {
    async fn capture_output(&self, command_line: &str) -> Result<String, CommandError> {
        let output = self.run_shell(command_line).await?;
        if output.status != Some(0) {
            log::debug!(
                "command_nonzero_exit cmd={:?} status={:?} stderr={:?}",
                command_line,
                output.status,
                output.stderr.trim()
            );
        }

        Ok(output.stdout)
    }

    async fn capture_to_file(&self, command_line: &str, dest: &Path) -> Result<u64, CommandError> {
        let mut command = shell(command_line);
        command.stdout(Stdio::piped()).stderr(Stdio::null());
        let mut child = command.spawn().map_err(|source| CommandError::Spawn {
            cmd: command_line.to_string(),
            source,
        })?;
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| CommandError::MissingStdout {
                cmd: command_line.to_string(),
            })?;

        let write_error = |source| CommandError::Write {
            path: dest.to_path_buf(),
            source,
        };
        let mut file = File::create(dest).await.map_err(write_error)?;

        let copy = async {
            let written = tokio::io::copy(&mut stdout, &mut file).await?;
            file.flush().await?;
            Ok::<u64, std::io::Error>(written)
        };
        let written = timeout(self.limit(), copy)
            .await
            .map_err(|_| self.timed_out(command_line))?
            .map_err(write_error)?;

        match timeout(self.limit(), child.wait()).await {
            Ok(Ok(status)) if !status.success() => {
                log::debug!(
                    "command_nonzero_exit cmd={:?} status={:?}",
                    command_line,
                    status.code()
                );
            }
            Ok(Ok(_)) => {}
            Ok(Err(error)) => {
                log::debug!("command_wait_failed cmd={:?} error={}", command_line, error);
            }
            Err(_) => return Err(self.timed_out(command_line)),
        }

        Ok(written)
    }

    async fn run_with_message(
        &self,
        command_line: &str,
        message: &str,
    ) -> Result<Option<i32>, CommandError> {
        let script = format!("{} \"$1\"", command_line);
        let mut command = shell(&script);
        command
            .arg(NOTIFIER_ARGV0)
            .arg(message)
            .stdout(Stdio::null());

        let status = timeout(self.limit(), command.status())
            .await
            .map_err(|_| self.timed_out(command_line))?
            .map_err(|source| CommandError::Spawn {
                cmd: command_line.to_string(),
                source,
            })?;

        Ok(status.code())
    }
}


#[cfg(test)]
mod tests {
    use super::{CommandError, CommandRunner, ShellRunner};

    #[tokio::test]
    async fn captures_stdout_of_a_pipeline() {
        let runner = ShellRunner::new(5);
        let stdout = runner
            .capture_output("printf 'a\\nb\\nc\\n' | tail -n 2")
            .await
            .expect("sh should run");
        assert_eq!(stdout, "b\nc\n");
    }

    #[tokio::test]
    async fn streams_stdout_into_a_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let dest = dir.path().join("report.txt");
        let runner = ShellRunner::new(5);

        let written = runner
            .capture_to_file("printf 'line one\\nline two\\n'", &dest)
            .await
            .expect("capture should succeed");

        assert_eq!(written, 18);
        let content = std::fs::read_to_string(&dest).expect("report readable");
        assert_eq!(content, "line one\nline two\n");
    }

    #[tokio::test]
    async fn unwritable_destination_is_a_write_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let dest = dir.path().join("missing").join("report.txt");
        let runner = ShellRunner::new(5);

        let result = runner.capture_to_file("echo hi", &dest).await;
        assert!(matches!(result, Err(CommandError::Write { .. })));
    }

    #[tokio::test]
    async fn message_is_passed_as_one_argument() {
        let dir = tempfile::tempdir().expect("temp dir");
        let sink = dir.path().join("message.txt");
        let runner = ShellRunner::new(5);
        let command = format!("printf '%s' >{}", sink.display());

        let code = runner
            .run_with_message(&command, "Memory consumption is high. Consumption is 80.00%; $(id)")
            .await
            .expect("notifier should run");

        assert_eq!(code, Some(0));
        let received = std::fs::read_to_string(&sink).expect("sink readable");
        assert_eq!(
            received,
            "Memory consumption is high. Consumption is 80.00%; $(id)"
        );
    }

    #[tokio::test]
    async fn reports_notifier_exit_code() {
        let runner = ShellRunner::new(5);
        let code = runner
            .run_with_message("exit 3 #", "ignored")
            .await
            .expect("sh should run");
        assert_eq!(code, Some(3));
    }

    #[tokio::test]
    async fn slow_commands_time_out() {
        let runner = ShellRunner::new(1);
        let result = runner.capture_output("sleep 5").await;
        assert!(matches!(
            result,
            Err(CommandError::Timeout { timeout_secs: 1, .. })
        ));
    }
}
