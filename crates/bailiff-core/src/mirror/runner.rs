use std::{path::Path, process::Stdio};

use async_trait::async_trait;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader},
    process::Command,
};
use tracing::info;

use crate::MirrorError;

/// Runs one external command, streaming its output to logs.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the command in `working_dir` and return its standard output lines.
    async fn run(&self, working_dir: &Path, args: &[String]) -> Result<Vec<String>, MirrorError>;
}

/// Child process runner.
///
/// The child is killed when the returned future is dropped.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: String,
    envs: Vec<(String, String)>,
}

impl ProcessRunner {
    pub fn new<T: Into<String>>(program: T) -> Self {
        Self {
            program: program.into(),
            envs: Vec::new(),
        }
    }

    /// Git runner authenticating over SSH with a dedicated key.
    pub fn git(private_key_file: &str) -> Self {
        Self::new("git").with_env(
            "GIT_SSH_COMMAND",
            format!(
                "ssh -i {private_key_file} -o IdentitiesOnly=yes -o StrictHostKeyChecking=accept-new"
            ),
        )
    }

    pub fn with_env<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    fn describe(&self, args: &[String]) -> String {
        std::iter::once(self.program.as_str())
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

async fn forward_lines<R: AsyncBufRead + Unpin>(
    reader: R,
    stream: &'static str,
) -> std::io::Result<Vec<String>> {
    let mut lines = reader.lines();
    let mut output = Vec::new();
    while let Some(line) = lines.next_line().await? {
        info!(stream, line = %line, message = "Command output");
        output.push(line);
    }

    Ok(output)
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    #[tracing::instrument(skip(self, working_dir), fields(program = %self.program))]
    async fn run(&self, working_dir: &Path, args: &[String]) -> Result<Vec<String>, MirrorError> {
        let command = self.describe(args);
        let io_error = |e| MirrorError::Io {
            command: command.clone(),
            source: e,
        };

        let mut child = Command::new(&self.program)
            .args(args)
            .envs(self.envs.iter().map(|(k, v)| (k, v)))
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| MirrorError::SpawnFailed {
                command: command.clone(),
                source: e,
            })?;

        let missing_pipe = || std::io::Error::new(std::io::ErrorKind::Other, "output not captured");
        let stdout = child.stdout.take().ok_or_else(missing_pipe).map_err(io_error)?;
        let stderr = child.stderr.take().ok_or_else(missing_pipe).map_err(io_error)?;

        let (stdout_lines, stderr_lines, status) = tokio::join!(
            forward_lines(BufReader::new(stdout), "stdout"),
            forward_lines(BufReader::new(stderr), "stderr"),
            child.wait()
        );

        let status = status.map_err(io_error)?;
        stderr_lines.map_err(io_error)?;
        let stdout_lines = stdout_lines.map_err(io_error)?;

        if !status.success() {
            return Err(MirrorError::CommandFailed { command, status });
        }

        Ok(stdout_lines)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn shell(script: &str) -> Vec<String> {
        vec!["-c".into(), script.into()]
    }

    #[tokio::test]
    async fn run_returns_stdout_lines() {
        let dir = tempfile::tempdir().unwrap();
        let lines = ProcessRunner::new("sh")
            .run(dir.path(), &shell("echo one; echo two >&2; echo three"))
            .await
            .unwrap();

        assert_eq!(lines, vec!["one".to_string(), "three".to_string()]);
    }

    #[tokio::test]
    async fn run_uses_working_dir_and_env() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker"), "").unwrap();

        let lines = ProcessRunner::new("sh")
            .with_env("BAILIFF_TEST_VALUE", "hello")
            .run(dir.path(), &shell("ls; echo $BAILIFF_TEST_VALUE"))
            .await
            .unwrap();

        assert_eq!(lines, vec!["marker".to_string(), "hello".to_string()]);
    }

    #[tokio::test]
    async fn run_reports_failed_status() {
        let dir = tempfile::tempdir().unwrap();
        let result = ProcessRunner::new("sh")
            .run(dir.path(), &shell("echo nope >&2; exit 3"))
            .await;

        match result {
            Err(MirrorError::CommandFailed { command, status }) => {
                assert_eq!(command, "sh -c echo nope >&2; exit 3");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn run_reports_spawn_failure() {
        let dir = tempfile::tempdir().unwrap();
        let result = ProcessRunner::new("bailiff-missing-program")
            .run(dir.path(), &[])
            .await;

        assert!(matches!(result, Err(MirrorError::SpawnFailed { .. })));
    }

    #[test]
    fn git_sets_ssh_command() {
        let runner = ProcessRunner::git("/keys/id_ed25519");
        assert_eq!(runner.program, "git");
        assert_eq!(
            runner.envs,
            vec![(
                "GIT_SSH_COMMAND".to_string(),
                "ssh -i /keys/id_ed25519 -o IdentitiesOnly=yes -o StrictHostKeyChecking=accept-new"
                    .to_string()
            )]
        );
    }
}
