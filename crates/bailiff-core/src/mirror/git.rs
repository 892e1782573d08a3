use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use super::{CommandRunner, MirrorService, RepushTarget};
use crate::MirrorError;

/// Git mirror working on one local checkout.
///
/// A single lock spans `initialize` and every `mirror` call.
pub struct GitMirror<R> {
    runner: R,
    working_dir: PathBuf,
    git_host: String,
    initialized: Mutex<bool>,
}

impl<R: CommandRunner> GitMirror<R> {
    pub fn new(runner: R, working_dir: PathBuf, git_host: String) -> Self {
        Self {
            runner,
            working_dir,
            git_host,
            initialized: Mutex::new(false),
        }
    }

    /// SSH URL of a fork repository.
    pub fn fork_url(&self, fork_repo: &str) -> String {
        format!("git@{}:{}.git", self.git_host, fork_repo)
    }

    async fn git(&self, args: &[&str]) -> Result<Vec<String>, MirrorError> {
        let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
        self.runner.run(&self.working_dir, &args).await
    }

    async fn fetch(&self, target: &RepushTarget) -> Result<(), MirrorError> {
        let refspec = format!("+refs/heads/{}", target.source_branch());
        self.git(&[
            "fetch",
            "--no-tags",
            &self.fork_url(target.fork_repo()),
            &refspec,
        ])
        .await
        .map(|_| ())
    }

    async fn verify(&self, target: &RepushTarget) -> Result<(), MirrorError> {
        let output = self.git(&["rev-parse", "FETCH_HEAD"]).await?;
        let actual = output
            .first()
            .map(|line| line.trim().to_string())
            .unwrap_or_default();

        if actual != target.expected_sha() {
            return Err(MirrorError::ShaMismatch {
                expected: target.expected_sha().to_string(),
                actual,
            });
        }

        Ok(())
    }

    async fn push(&self, target: &RepushTarget) -> Result<(), MirrorError> {
        let refspec = format!(
            "{}:refs/heads/{}",
            target.expected_sha(),
            target.dest_branch()
        );
        self.git(&["push", "--force", "origin", &refspec])
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl<R: CommandRunner> MirrorService for GitMirror<R> {
    #[tracing::instrument(skip(self))]
    async fn initialize(&self, repo_url: &str) -> Result<(), MirrorError> {
        let mut initialized = self.initialized.lock().await;
        if *initialized {
            return Ok(());
        }

        self.git(&["clone", repo_url, "."]).await?;
        *initialized = true;
        info!(message = "Cloned trusted repository");

        Ok(())
    }

    #[tracing::instrument(skip_all, fields(
        fork_repo = target.fork_repo(),
        source_branch = target.source_branch(),
        dest_branch = target.dest_branch(),
        expected_sha = target.expected_sha()
    ))]
    async fn mirror(&self, target: &RepushTarget) -> Result<(), MirrorError> {
        let initialized = self.initialized.lock().await;
        if !*initialized {
            return Err(MirrorError::NotInitialized);
        }

        self.fetch(target).await?;
        self.verify(target).await?;
        self.push(target).await?;
        info!(message = "Mirrored fork branch");

        Ok(())
    }
}
